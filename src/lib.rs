/// Glassterm backend
/// Desktop terminal emulator with a webview frontend and this Tauri backend.
/// The frontend only renders; shell state and process execution live here.
///
/// Module structure:
/// - commands: Tauri IPC handlers (frontend → backend)
/// - services: shell sessions, command execution, suggestion logic
/// - models: shared data types

mod commands;
mod config;
mod models;
mod services;

use std::sync::Arc;

use parking_lot::Mutex;

use config::SessionConfig;
use services::{CommandCatalog, SessionManager};

/// Build the command catalog: built-ins, then the optional user catalog
/// file, then executables discovered on PATH.
fn build_catalog() -> CommandCatalog {
    let mut catalog = CommandCatalog::builtin();

    if let Ok(path) = std::env::var("GLASSTERM_COMMANDS") {
        match catalog.load_entries(&path) {
            Ok(applied) => log::info!("loaded {} catalog entries from {}", applied, path),
            Err(e) => log::warn!("could not read catalog file {}: {}", path, e),
        }
    }

    let discovered = catalog.extend_from_path();
    log::info!(
        "command catalog ready: {} entries ({} discovered on PATH)",
        catalog.len(),
        discovered
    );
    catalog
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let manager = Arc::new(Mutex::new(SessionManager::new(SessionConfig::from_env())));
    let catalog = Arc::new(Mutex::new(build_catalog()));

    tauri::Builder::default()
        .manage(manager)
        .manage(catalog)
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::session::open_session,
            commands::session::run_command,
            commands::session::current_dir,
            commands::session::close_session,
            commands::suggest::get_suggestions,
            commands::suggest::register_command,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
