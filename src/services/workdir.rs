/// Working-directory tracker
/// Owns the authoritative "where the user is" for one session. Each command
/// runs in a fresh stateless process, so no child ever carries a cwd of its
/// own; this tracker is the only source of truth between commands.

use std::path::{Path, PathBuf};

/// A virtual working directory floored at a configured root.
///
/// The tracker never touches the filesystem. Whether a `descend` target
/// actually exists is decided by whoever calls it, by inspecting the outcome
/// of the command that was executed against the candidate path.
#[derive(Debug, Clone)]
pub struct WorkdirTracker {
    root: PathBuf,
    current: PathBuf,
}

impl WorkdirTracker {
    /// Start a tracker at `root`. Invariant from here on: `current` always
    /// starts with `root` and is never empty.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        WorkdirTracker {
            current: root.clone(),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn is_at_root(&self) -> bool {
        self.current == self.root
    }

    /// Move one segment toward the root. Fixed point at the root: calling
    /// this there returns the root unchanged, never an error.
    pub fn ascend(&mut self) -> &Path {
        if !self.is_at_root() {
            self.current.pop();
            if !self.current.starts_with(&self.root) {
                self.current = self.root.clone();
            }
        }
        &self.current
    }

    /// Append `target` to the current directory, one path component at a
    /// time. `.` and empty components are dropped, `..` ascends (floored at
    /// the root), so the result always stays under the root.
    pub fn descend(&mut self, target: &str) -> &Path {
        for part in target.split(['/', '\\']) {
            match part {
                "" | "." => {}
                ".." => {
                    self.ascend();
                }
                segment => self.current.push(segment),
            }
        }
        &self.current
    }
}
