/// Session commands
/// IPC surface for shell sessions: one session per terminal window.
/// The frontend mirrors the returned cwd for display; the backend value is
/// the authoritative one.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tauri::State;

use crate::models::RunResult;
use crate::services::SessionManager;

/// Open a new shell session, optionally rooted somewhere other than the
/// configured default. Returns the session id used by all other calls.
#[tauri::command]
pub fn open_session(
    root: Option<String>,
    manager: State<Arc<Mutex<SessionManager>>>,
) -> u32 {
    manager.lock().open(root.map(PathBuf::from))
}

/// Execute one command line in a session and return its output together
/// with the working directory for the next command.
#[tauri::command]
pub fn run_command(
    id: u32,
    line: String,
    manager: State<Arc<Mutex<SessionManager>>>,
) -> Result<RunResult, String> {
    // Clone the handle and drop the manager lock before execution so other
    // windows stay responsive while this command runs.
    let session = manager.lock().session(id)?;
    let result = session.lock().run(&line);
    Ok(result)
}

/// The session's current working directory.
#[tauri::command]
pub fn current_dir(
    id: u32,
    manager: State<Arc<Mutex<SessionManager>>>,
) -> Result<String, String> {
    let session = manager.lock().session(id)?;
    let cwd = session.lock().cwd();
    Ok(cwd)
}

#[tauri::command]
pub fn close_session(
    id: u32,
    manager: State<Arc<Mutex<SessionManager>>>,
) -> Result<(), String> {
    manager.lock().close(id)
}
