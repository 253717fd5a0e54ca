use std::time::Duration;

use bridge_transport::FactListener;
use edit_bridge::wire::{encode_fact_line, EditFact};
use edit_bridge::BridgeConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{sleep, timeout};

async fn spawn_listener(
    idle_timeout: Option<Duration>,
) -> (std::net::SocketAddr, UnboundedReceiver<EditFact>) {
    let mut listener = FactListener::bind(&BridgeConfig::new(0))
        .await
        .expect("listener should bind an ephemeral port");
    if let Some(idle_timeout) = idle_timeout {
        listener = listener.with_idle_timeout(idle_timeout);
    }
    let addr = listener.local_addr().expect("bound listener has an address");

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(listener.run(tx));
    (addr, rx)
}

async fn recv_fact(rx: &mut UnboundedReceiver<EditFact>) -> EditFact {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("fact should arrive in time")
        .expect("fact channel should stay open")
}

async fn assert_no_more_facts(rx: &mut UnboundedReceiver<EditFact>) {
    sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err(), "no further facts expected");
}

#[tokio::test]
async fn split_chunks_reassemble_into_one_fact() {
    let (addr, mut rx) = spawn_listener(None).await;
    let mut client = TcpStream::connect(addr).await.expect("client connects");

    let line = encode_fact_line(&EditFact::new("/tmp/split.rs", "chunked"))
        .expect("fact should serialize");
    let (head, tail) = line.split_at(15);

    client
        .write_all(head.as_bytes())
        .await
        .expect("head chunk writes");
    sleep(Duration::from_millis(50)).await;
    client
        .write_all(tail.as_bytes())
        .await
        .expect("tail chunk writes");

    let fact = recv_fact(&mut rx).await;
    assert_eq!(fact.file, "/tmp/split.rs");
    assert_eq!(fact.content_new, "chunked");
    assert_no_more_facts(&mut rx).await;
}

#[tokio::test]
async fn malformed_line_is_skipped_without_closing_connection() {
    let (addr, mut rx) = spawn_listener(None).await;
    let mut client = TcpStream::connect(addr).await.expect("client connects");

    let mut payload = String::new();
    payload.push_str(&encode_fact_line(&EditFact::new("/a", "1")).expect("serialize"));
    payload.push_str(&encode_fact_line(&EditFact::new("/b", "2")).expect("serialize"));
    payload.push_str("{this is not json\n");
    payload.push_str(&encode_fact_line(&EditFact::new("/c", "3")).expect("serialize"));

    client
        .write_all(payload.as_bytes())
        .await
        .expect("payload writes");

    let files: Vec<String> = vec![
        recv_fact(&mut rx).await.file,
        recv_fact(&mut rx).await.file,
        recv_fact(&mut rx).await.file,
    ];
    assert_eq!(files, vec!["/a", "/b", "/c"]);
    assert_no_more_facts(&mut rx).await;
}

#[tokio::test]
async fn residual_buffer_is_processed_on_clean_close() {
    let (addr, mut rx) = spawn_listener(None).await;
    let mut client = TcpStream::connect(addr).await.expect("client connects");

    let line = encode_fact_line(&EditFact::new("/tmp/residue.rs", "no newline"))
        .expect("fact should serialize");
    client
        .write_all(line.trim_end().as_bytes())
        .await
        .expect("unterminated line writes");
    client.shutdown().await.expect("clean shutdown");

    let fact = recv_fact(&mut rx).await;
    assert_eq!(fact.file, "/tmp/residue.rs");
}

#[tokio::test]
async fn unknown_discriminants_are_ignored() {
    let (addr, mut rx) = spawn_listener(None).await;
    let mut client = TcpStream::connect(addr).await.expect("client connects");

    client
        .write_all(b"{\"type\":\"session.ping\",\"properties\":{}}\n")
        .await
        .expect("line writes");
    client
        .write_all(
            encode_fact_line(&EditFact::new("/real", "yes"))
                .expect("serialize")
                .as_bytes(),
        )
        .await
        .expect("line writes");

    assert_eq!(recv_fact(&mut rx).await.file, "/real");
    assert_no_more_facts(&mut rx).await;
}

#[tokio::test]
async fn idle_connection_is_force_closed_without_flushing_buffer() {
    let (addr, mut rx) = spawn_listener(Some(Duration::from_millis(100))).await;
    let mut client = TcpStream::connect(addr).await.expect("client connects");

    client
        .write_all(b"{\"type\":\"file.e")
        .await
        .expect("partial line writes");
    sleep(Duration::from_millis(300)).await;

    // The server dropped the connection; a read observes EOF or a reset.
    let mut sink = [0u8; 16];
    let observed_close = matches!(client.read(&mut sink).await, Ok(0) | Err(_));
    assert!(observed_close, "server should have closed the idle connection");
    assert!(rx.try_recv().is_err(), "partial buffer must not dispatch");
}

#[tokio::test]
async fn concurrent_connections_have_independent_buffers() {
    let (addr, mut rx) = spawn_listener(None).await;

    let mut one = TcpStream::connect(addr).await.expect("first client connects");
    let mut two = TcpStream::connect(addr).await.expect("second client connects");

    // Interleave partial writes from both peers.
    one.write_all(b"{\"type\":\"file.edited\",\"properties\":")
        .await
        .expect("first half writes");
    two.write_all(
        encode_fact_line(&EditFact::new("/two", "2"))
            .expect("serialize")
            .as_bytes(),
    )
    .await
    .expect("second fact writes");
    one.write_all(b"{\"file\":\"/one\",\"contentNew\":\"1\"}}\n")
        .await
        .expect("second half writes");

    let mut files = vec![recv_fact(&mut rx).await.file, recv_fact(&mut rx).await.file];
    files.sort();
    assert_eq!(files, vec!["/one", "/two"]);
}
