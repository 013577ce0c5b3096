/// Shell session coordinator
/// Composes the tracker and the executor: parses directory directives from
/// the raw command line, orders execute-then-commit so the tracker never
/// moves into a directory the interpreter rejected, and returns output plus
/// the authoritative working directory. A manager owns one independent
/// session per frontend window.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::SessionConfig;
use crate::models::{CommandResult, RunResult};
use crate::services::executor::ShellExecutor;
use crate::services::workdir::WorkdirTracker;

/// Interpreter complaints that mean a `cd` target does not exist. Checked
/// as a fallback next to the exit status; kept in one list so a locale or
/// interpreter swap touches a single constant.
#[cfg(windows)]
const MISSING_PATH_MARKERS: &[&str] = &[
    "The system cannot find the path specified",
    "The system cannot find the file specified",
];

#[cfg(not(windows))]
const MISSING_PATH_MARKERS: &[&str] = &["No such file or directory", "can't cd to"];

fn mentions_missing_path(output: &str) -> bool {
    MISSING_PATH_MARKERS
        .iter()
        .any(|marker| output.contains(marker))
}

/// Directory semantics recognized in a command line, parsed once before
/// dispatch. Everything else passes through to the interpreter untouched.
///
/// The prefix match is the literal, case-sensitive `"cd "`: `"CD "` and
/// `"cd\t"` are plain pass-through lines.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Ascend,
    Descend(String),
    PassThrough,
}

impl Directive {
    fn parse(line: &str) -> Directive {
        let line = line.trim();
        if line == "cd .." {
            return Directive::Ascend;
        }
        if let Some(target) = line.strip_prefix("cd ") {
            let target = target.trim();
            return match target {
                "" => Directive::PassThrough,
                ".." => Directive::Ascend,
                _ => Directive::Descend(target.to_string()),
            };
        }
        Directive::PassThrough
    }
}

/// One terminal window's shell state: a directory tracker plus an executor.
pub struct ShellSession {
    tracker: WorkdirTracker,
    executor: ShellExecutor,
}

impl ShellSession {
    pub fn new(root: impl Into<PathBuf>, config: &SessionConfig) -> Self {
        ShellSession {
            tracker: WorkdirTracker::new(root),
            executor: ShellExecutor::new(config.timeout),
        }
    }

    /// The directory the next command will run in.
    pub fn cwd(&self) -> String {
        self.tracker.current().display().to_string()
    }

    /// Execute one command line and commit its directory effects.
    ///
    /// The command always runs, `cd` included: the interpreter produces the
    /// diagnostic text the user sees, while the tracker decides what the
    /// directory for the *next* command is. For a descend the commit happens
    /// only after the result is observed, so a rejected target leaves the
    /// tracker exactly where it was.
    pub fn run(&mut self, line: &str) -> RunResult {
        let directive = Directive::parse(line);
        let result = self
            .executor
            .execute(line.trim(), self.tracker.current());
        self.apply(&directive, &result);

        RunResult {
            output: result.output,
            cwd: self.cwd(),
            succeeded: result.succeeded,
            error_kind: result.error_kind,
        }
    }

    fn apply(&mut self, directive: &Directive, result: &CommandResult) {
        match directive {
            Directive::Ascend => {
                self.tracker.ascend();
            }
            Directive::Descend(target) => {
                let committable = result.error_kind.is_none()
                    && result.succeeded
                    && !mentions_missing_path(&result.output);
                if committable {
                    self.tracker.descend(target);
                } else {
                    log::debug!("cd target {:?} rejected, keeping {}", target, self.cwd());
                }
            }
            Directive::PassThrough => {}
        }
    }
}

/// Owns every open session, keyed by an incrementing id handed to the
/// frontend when a window opens. Sessions share nothing with each other.
pub struct SessionManager {
    sessions: HashMap<u32, Arc<Mutex<ShellSession>>>,
    next_id: u32,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        SessionManager {
            sessions: HashMap::new(),
            next_id: 1,
            config,
        }
    }

    /// Open a session rooted at `root`, or at the configured default.
    pub fn open(&mut self, root: Option<PathBuf>) -> u32 {
        let root = root.unwrap_or_else(|| self.config.root.clone());
        let session = ShellSession::new(root, &self.config);

        let id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(id, Arc::new(Mutex::new(session)));
        log::info!("opened shell session {}", id);
        id
    }

    /// Look up a session. Callers clone the handle and release the manager
    /// lock before running commands, so one window's long-running child
    /// never blocks the others.
    pub fn session(&self, id: u32) -> Result<Arc<Mutex<ShellSession>>, String> {
        self.sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| "session not found".to_string())
    }

    pub fn close(&mut self, id: u32) -> Result<(), String> {
        match self.sessions.remove(&id) {
            Some(_) => {
                log::info!("closed shell session {}", id);
                Ok(())
            }
            None => Err("session not found".to_string()),
        }
    }
}
