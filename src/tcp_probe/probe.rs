use std::time::{Duration, Instant};

use tokio::net::TcpStream;
use tokio::time::timeout;

use super::prelude::*;

/// Open and immediately close one TCP connection to `host:port`.
///
/// The host is resolved by the runtime itself, independent of the DNS stage.
/// Nothing is written to or read from the socket.
pub async fn check_connect(host: &str, port: u16, limit: Duration) -> SocketResult {
    let start = Instant::now();
    let result = match timeout(limit, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => {
            let latency_ms = start.elapsed().as_millis() as u64;
            match stream.peer_addr() {
                Ok(peername) => SocketResult::Connected {
                    latency_ms,
                    peername,
                },
                Err(e) => SocketResult::Failed {
                    error: e.to_string(),
                },
            }
        }
        Ok(Err(e)) => SocketResult::Failed {
            error: e.to_string(),
        },
        Err(_) => SocketResult::Failed {
            error: format!("connect to {host}:{port} timed out after {limit:?}"),
        },
    };

    match &result {
        SocketResult::Connected { latency_ms, peername } => {
            log::debug!("TCP connect to {host}:{port} via {peername} took {latency_ms}ms")
        }
        SocketResult::Failed { error } => log::warn!("TCP connect to {host}:{port} failed: {error}"),
    }
    result
}
