//! Scripted HTTP/1.1 server for exercising [`IgClient`](crate::IgClient)
//! without the network.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Serves one canned response per accepted connection, in order, and
/// records every request it received (lowercased).
pub(crate) struct TestServer {
    pub(crate) base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub(crate) async fn start(responses: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            for reply in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                log.lock().unwrap().push(request);
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Builds a raw response that closes the connection after the body.
pub(crate) fn response(status: u16, headers: &[(&str, &str)], body: &str) -> String {
    let mut out = format!(
        "HTTP/1.1 {status} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n",
        body.len()
    );
    for (name, value) in headers {
        out.push_str(&format!("{name}: {value}\r\n"));
    }
    out.push_str("\r\n");
    out.push_str(body);
    out
}

/// A successful login carrying both session tokens.
pub(crate) fn login_ok() -> String {
    response(200, &[("cst", "cst-token"), ("x-security-token", "sec-token")], "{}")
}

/// A snapshot with `count` complete one-minute points.
pub(crate) fn snapshot(count: usize) -> String {
    let points: Vec<String> = (0..count)
        .map(|i| {
            let ts = 1_735_800_000_000_i64 + i as i64 * 60_000;
            format!(
                r#"{{"timestamp":{ts},"openPrice":{{"bid":2649.0,"ask":2650.0}},"highPrice":{{"bid":2651.0,"ask":2652.0}},"lowPrice":{{"bid":2648.0,"ask":2649.0}},"closePrice":{{"bid":2650.0,"ask":2651.0}},"lastTradedVolume":5}}"#
            )
        })
        .collect();
    let body = format!(r#"{{"intervalsDataPoints":[{{"dataPoints":[{}]}}]}}"#, points.join(","));
    response(200, &[], &body)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).to_lowercase()
}
