/// Commands module
/// All Tauri commands (IPC handlers) are defined here
/// Commands act as the boundary between frontend and backend

pub mod session;
pub mod suggest;
