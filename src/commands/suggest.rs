/// Suggestion commands
/// IPC surface for autocomplete: ranked candidates for a partial command
/// line, plus runtime catalog registration.

use std::sync::Arc;

use parking_lot::Mutex;
use tauri::State;

use crate::models::CommandEntry;
use crate::services::{suggest, CommandCatalog};

/// Ranked suggestions for partial input, best match first. Empty input
/// yields an empty list; `limit` caps the result when the caller wants one.
#[tauri::command]
pub fn get_suggestions(
    partial: String,
    limit: Option<usize>,
    catalog: State<Arc<Mutex<CommandCatalog>>>,
) -> Vec<CommandEntry> {
    let mut matches = suggest::suggest(&catalog.lock(), &partial);
    if let Some(limit) = limit {
        matches.truncate(limit);
    }
    matches
}

/// Register a command (or update its description) in the shared catalog.
/// Returns true when the name was new.
#[tauri::command]
pub fn register_command(
    name: String,
    description: String,
    catalog: State<Arc<Mutex<CommandCatalog>>>,
) -> bool {
    catalog.lock().extend(CommandEntry::new(name, description))
}
