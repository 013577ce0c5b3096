/// Session configuration
/// Environment-driven settings for shell sessions

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings applied to every session a manager opens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Root directory new sessions start in. Also the floor `cd ..` cannot
    /// climb above.
    pub root: PathBuf,
    /// Bound on a single command execution before the child is killed.
    pub timeout: Duration,
}

impl SessionConfig {
    /// Build the config from the environment, falling back to the defaults.
    pub fn from_env() -> Self {
        let root = match env::var("GLASSTERM_ROOT") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_root(),
        };

        let timeout = env::var("GLASSTERM_COMMAND_TIMEOUT")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        SessionConfig { root, timeout }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            root: default_root(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// The user's home directory, or the filesystem root when the environment
/// does not provide one (bundled apps can start with a stripped environment).
fn default_root() -> PathBuf {
    #[cfg(windows)]
    {
        env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\"))
    }

    #[cfg(not(windows))]
    {
        env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/"))
    }
}
