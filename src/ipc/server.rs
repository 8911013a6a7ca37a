// Author: Dustin Pilgrim
// License: MIT

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::{mpsc, oneshot},
    time::{timeout, Duration},
};

use crate::core::manager_msg::ManagerMsg;

use super::router::{parse_request, Request};

const MAX_REQUEST_BYTES: u64 = 4096;
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Binds the control socket and serves it on a background task.
pub async fn spawn_ipc_server(tx: mpsc::Sender<ManagerMsg>) -> std::io::Result<()> {
    let path = super::socket_path()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // stale socket from a crashed run; the instance lock already guarantees we are alone
    if path.exists() {
        let _ = std::fs::remove_file(&path);
    }

    let listener = UnixListener::bind(&path)?;
    crate::sinfo!("Ipc", "listening on {}", path.display());

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut stream, _addr)) => {
                    let tx = tx.clone();

                    tokio::spawn(async move {
                        let result = timeout(CONNECTION_TIMEOUT, async {
                            if let Err(e) = handle_connection(&mut stream, tx).await {
                                crate::serror!("Ipc", "error handling connection: {}", e);
                            }
                        })
                        .await;

                        if result.is_err() {
                            crate::serror!("Ipc", "connection timed out");
                        }

                        let _ = stream.shutdown().await;
                    });
                }
                Err(e) => crate::serror!("Ipc", "failed to accept connection: {}", e),
            }
        }
    });

    Ok(())
}

async fn handle_connection(
    stream: &mut UnixStream,
    tx: mpsc::Sender<ManagerMsg>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    (&mut *stream).take(MAX_REQUEST_BYTES).read_to_end(&mut buf).await?;

    let cmd = String::from_utf8_lossy(&buf).trim().to_string();
    if cmd.is_empty() {
        return Ok(());
    }

    if !cmd.starts_with("info") {
        crate::sdebug!("Ipc", "received: {}", cmd);
    }

    let response = respond(&cmd, &tx).await;

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

/// Turns one request line into the text sent back to the client.
pub async fn respond(cmd: &str, tx: &mpsc::Sender<ManagerMsg>) -> String {
    let request = match parse_request(cmd) {
        Ok(r) => r,
        Err(e) => {
            crate::swarn!("Ipc", "bad request '{}': {}", cmd, e);
            return format!("ERROR: {e}");
        }
    };

    match request {
        Request::Help(text) => text.to_string(),

        Request::Info { json } => {
            let (reply, rx) = oneshot::channel();
            if tx.send(ManagerMsg::GetInfo { reply }).await.is_err() {
                return "ERROR: daemon is shutting down".to_string();
            }

            match rx.await {
                Ok(snap) if json => snap.to_json(),
                Ok(snap) => snap.pretty_text,
                Err(_) => "ERROR: no reply from daemon".to_string(),
            }
        }

        Request::Command(event) => ask(tx, |reply| ManagerMsg::Command { event, reply }).await,
        Request::Reload => ask(tx, |reply| ManagerMsg::ReloadConfig { reply }).await,
        Request::Stop => ask(tx, |reply| ManagerMsg::StopDaemon { reply }).await,
    }
}

async fn ask(
    tx: &mpsc::Sender<ManagerMsg>,
    build: impl FnOnce(oneshot::Sender<Result<String, String>>) -> ManagerMsg,
) -> String {
    let (reply, rx) = oneshot::channel();

    if tx.send(build(reply)).await.is_err() {
        return "ERROR: daemon is shutting down".to_string();
    }

    match rx.await {
        Ok(Ok(msg)) => msg,
        Ok(Err(e)) => format!("ERROR: {e}"),
        Err(_) => "ERROR: no reply from daemon".to_string(),
    }
}
