//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use itsalive::config::{AppConfig, TargetConfig};
use itsalive::events::StatusChangeEvent;
use itsalive::notify::{Sink, SinkError};

/// Request as seen by a mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

/// Start a programmable mock backend on an ephemeral loopback port.
///
/// 3xx responses carry `Location: /redirected`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(RecordedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(request).await;
                        let location = if (300..400).contains(&status) {
                            "Location: /redirected\r\n"
                        } else {
                            ""
                        };

                        let response_str = format!(
                            "HTTP/1.1 {} {}\r\n{}Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            status_text(status),
                            location,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// A target with fast timings for tests.
pub fn target(name: &str, url: String, ok_periods: usize, alarm_periods: usize) -> TargetConfig {
    TargetConfig {
        name: name.to_string(),
        url,
        ok_statuses: vec![200],
        check_interval_ms: 30,
        http_timeout_ms: 500,
        ok_periods,
        alarm_periods,
    }
}

pub fn app_config(items: Vec<TargetConfig>) -> AppConfig {
    AppConfig {
        items,
        slack_token: "xoxb-test".into(),
        slack_channel: "#alerts".into(),
        bot_name: "itsalive".into(),
        ..Default::default()
    }
}

/// Sink that forwards every delivered event to a channel.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<StatusChangeEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StatusChangeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Sink for ChannelSink {
    async fn deliver(&self, event: &StatusChangeEvent) -> Result<(), SinkError> {
        let _ = self.tx.send(event.clone());
        Ok(())
    }
}

/// Sink that rejects every event.
#[derive(Clone)]
pub struct FailingSink;

impl Sink for FailingSink {
    async fn deliver(&self, _event: &StatusChangeEvent) -> Result<(), SinkError> {
        Err(SinkError::Rejected("invalid_auth".into()))
    }
}

/// Receive the next event or fail the test after `wait`.
pub async fn next_event(
    rx: &mut mpsc::UnboundedReceiver<StatusChangeEvent>,
    wait: Duration,
) -> StatusChangeEvent {
    tokio::time::timeout(wait, rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("sink channel closed")
}
