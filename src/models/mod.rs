/// Models module
/// Shared data types between frontend and backend
/// All types here cross the IPC boundary and must be serializable

use serde::{Deserialize, Serialize};

/// One known command: its name and a one-line description.
/// Names are unique within a catalog (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub name: String,
    pub description: String,
}

impl CommandEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Why a command produced no usable exit status.
/// Distinct from "the process ran and reported failure".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecErrorKind {
    /// The command interpreter could not be started at all.
    Spawn,
    /// The process outlived the configured bound and was killed.
    Timeout,
}

/// Result of one process execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    /// Combined stdout and stderr text, possibly empty.
    pub output: String,
    /// Exit-status success. False on non-zero exit, spawn failure or timeout.
    pub succeeded: bool,
    pub error_kind: Option<ExecErrorKind>,
}

/// Result of one coordinator run: executor output plus the authoritative
/// working directory for the next command. The frontend mirrors `cwd` for
/// display and must re-synchronize from it on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub output: String,
    pub cwd: String,
    pub succeeded: bool,
    pub error_kind: Option<ExecErrorKind>,
}
