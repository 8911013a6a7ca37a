// Author: Dustin Pilgrim
// License: MIT

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::UnixStream,
    time::{timeout, Duration},
};

use crate::services::sink::READY_TIMEOUT;

const IO_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to wait for the reply. A start is answered only after the cue
/// sink's warm-up, which is bounded by `READY_TIMEOUT`.
fn reply_timeout(cmd: &str) -> Duration {
    match cmd.split_whitespace().next() {
        Some("start" | "toggle") => READY_TIMEOUT + IO_TIMEOUT,
        _ => IO_TIMEOUT,
    }
}

/// Sends one request line to the daemon and returns its full reply.
pub async fn send_raw(cmd: &str) -> Result<String, String> {
    let path = crate::ipc::socket_path()?;

    if !path.exists() {
        return Err("daemon not running".to_string());
    }

    let mut stream = match timeout(IO_TIMEOUT, UnixStream::connect(&path)).await {
        Ok(Ok(s)) => s,
        Ok(Err(e)) => return Err(format!("failed to connect to {}: {e}", path.display())),
        Err(_) => return Err("timeout connecting to daemon".to_string()),
    };

    timeout(IO_TIMEOUT, stream.write_all(cmd.as_bytes()))
        .await
        .map_err(|_| "timeout writing to daemon".to_string())?
        .map_err(|e| format!("write failed: {e}"))?;

    // closing our write half is how the daemon knows the request is complete
    timeout(IO_TIMEOUT, stream.shutdown())
        .await
        .map_err(|_| "timeout finalizing request".to_string())?
        .map_err(|e| format!("shutdown failed: {e}"))?;

    let mut resp = Vec::new();
    timeout(reply_timeout(cmd), stream.read_to_end(&mut resp))
        .await
        .map_err(|_| "timeout reading response".to_string())?
        .map_err(|e| format!("read failed: {e}"))?;

    Ok(String::from_utf8_lossy(&resp).to_string())
}
