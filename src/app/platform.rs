// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;

// ---------------- single-instance lock ----------------

fn lock_path() -> Result<PathBuf, String> {
    let dir = crate::ipc::runtime_dir()
        .map_err(|e| format!("{e} (cannot create instance lock)"))?;
    Ok(dir.join("intervals").join("intervals.lock"))
}

/// Holds a bound socket for the lifetime of the daemon. A second daemon fails
/// to bind; a lock left by a dead process refuses connections and is replaced.
pub fn acquire_single_instance_lock() -> Result<UnixListener, String> {
    let path = lock_path()?;
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match UnixListener::bind(&path) {
        Ok(l) => Ok(l),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => match UnixStream::connect(&path) {
            Ok(_) => Err(format!(
                "intervals is already running (another instance holds {})",
                path.display()
            )),
            Err(_) => {
                let _ = std::fs::remove_file(&path);
                UnixListener::bind(&path)
                    .map_err(|e| format!("failed to bind instance lock {}: {e}", path.display()))
            }
        },
        Err(e) => Err(format!("failed to bind instance lock {}: {e}", path.display())),
    }
}
