//! Startup configuration: loopback port and the edit permission mode.
//!
//! Both values are resolved once in `main` and threaded into constructors;
//! nothing deeper in the stack reads the environment or the config file.

use std::env;
use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

use crate::paths;

/// Port facts travel over unless overridden by [`PORT_ENV_VAR`].
pub const DEFAULT_BRIDGE_PORT: u16 = 41234;
/// Environment override for the loopback port.
pub const PORT_ENV_VAR: &str = "EDIT_BRIDGE_PORT";

/// Whether tool edits are transmitted immediately or held for approval.
///
/// Resolved once per process; the selected mode decides which family of
/// lifecycle events the emitter acts on for its entire lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPermissionMode {
    /// Tool edit/write events produce facts as soon as the tool reports them.
    Direct,
    /// Facts are computed from permission-ask diffs and held until a
    /// one-time grant arrives.
    Gated,
}

#[derive(Debug, Deserialize)]
struct PermissionConfigFile {
    #[serde(default)]
    permission: Option<PermissionSection>,
}

#[derive(Debug, Deserialize)]
struct PermissionSection {
    #[serde(default)]
    edit: Option<String>,
}

impl EditPermissionMode {
    #[must_use]
    pub fn is_gated(self) -> bool {
        matches!(self, Self::Gated)
    }

    /// Reads the per-user config file. Only the `permission.edit` field is
    /// consulted: `"ask"` selects [`Self::Gated`]; any other value, a
    /// missing field, or any read/parse failure selects [`Self::Direct`].
    #[must_use]
    pub fn resolve() -> Self {
        match paths::permission_config_path() {
            Some(path) => Self::from_config_file(&path),
            None => Self::Direct,
        }
    }

    #[must_use]
    pub fn from_config_file(path: &Path) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            return Self::Direct;
        };
        let Ok(parsed) = serde_json::from_str::<PermissionConfigFile>(&raw) else {
            return Self::Direct;
        };

        let edit = parsed.permission.and_then(|section| section.edit);
        match edit.as_deref() {
            Some("ask") => Self::Gated,
            _ => Self::Direct,
        }
    }
}

/// Immutable transport configuration shared by both roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    pub port: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_BRIDGE_PORT,
        }
    }
}

impl BridgeConfig {
    #[must_use]
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Builds the config from the process environment. A missing or
    /// unparseable [`PORT_ENV_VAR`] falls back to the default port.
    #[must_use]
    pub fn from_env() -> Self {
        let port = env::var(PORT_ENV_VAR)
            .ok()
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_BRIDGE_PORT);
        Self { port }
    }

    /// Loopback address both roles agree on.
    #[must_use]
    pub fn loopback_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.port))
    }
}
