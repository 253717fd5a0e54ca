use std::time::Duration;

/// Total connection attempts per fact, the first included.
pub const MAX_SEND_ATTEMPTS: u32 = 3;
/// Backoff unit multiplied by the failed attempt number.
pub const BASE_BACKOFF_MS: u64 = 200;
/// Connect/write budget for a single attempt.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(3);

/// Linear backoff delay after a failed attempt: 200ms after the first,
/// 400ms after the second.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS * u64::from(attempt))
}
