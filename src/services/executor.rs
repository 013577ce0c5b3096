/// Command executor
/// One stateless process spawn per request: the command line runs through
/// the platform interpreter in a caller-supplied working directory, with
/// both output streams captured. The executor never interprets the command
/// line itself; directory semantics belong to the session coordinator.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::models::{CommandResult, ExecErrorKind};

/// How often a running child is polled for completion.
const WAIT_POLL: Duration = Duration::from_millis(25);

/// Spawns one interpreter process per `execute` call and classifies the
/// outcome. A failing command is a normal result, not an error; only the
/// inability to spawn (or a timeout kill) sets an error kind.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    timeout: Duration,
}

impl ShellExecutor {
    pub fn new(timeout: Duration) -> Self {
        ShellExecutor { timeout }
    }

    /// Run `command_line` through the host interpreter with `cwd` as the
    /// working directory. Always returns a result; stdout and stderr are
    /// combined into one text in stream order (best effort).
    pub fn execute(&self, command_line: &str, cwd: &Path) -> CommandResult {
        let mut cmd = interpreter(command_line);
        cmd.current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                log::warn!("failed to start command interpreter: {}", e);
                return CommandResult {
                    output: format!("failed to start command interpreter: {}", e),
                    succeeded: false,
                    error_kind: Some(ExecErrorKind::Spawn),
                };
            }
        };

        // Drain both pipes on their own threads so a chatty child can never
        // deadlock against a full pipe buffer while we wait on it.
        let stdout_reader = reader_thread(child.stdout.take());
        let stderr_reader = reader_thread(child.stderr.take());

        let status = self.wait_with_deadline(&mut child);

        let stdout = stdout_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        let mut output = combine(&stdout, &stderr);

        match status {
            WaitOutcome::Exited(success) => CommandResult {
                output,
                succeeded: success,
                error_kind: None,
            },
            WaitOutcome::TimedOut => {
                if !output.is_empty() && !output.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str(&format!(
                    "command timed out after {} seconds",
                    self.timeout.as_secs()
                ));
                CommandResult {
                    output,
                    succeeded: false,
                    error_kind: Some(ExecErrorKind::Timeout),
                }
            }
            WaitOutcome::WaitFailed(e) => CommandResult {
                output: format!("failed to wait for command: {}", e),
                succeeded: false,
                error_kind: Some(ExecErrorKind::Spawn),
            },
        }
    }

    /// Poll the child until it exits or the timeout elapses. A timed-out
    /// child is killed and reaped so no zombie is left behind.
    fn wait_with_deadline(&self, child: &mut Child) -> WaitOutcome {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return WaitOutcome::Exited(status.success()),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        log::warn!(
                            "command exceeded {}s timeout, killing child",
                            self.timeout.as_secs()
                        );
                        let _ = child.kill();
                        let _ = child.wait();
                        return WaitOutcome::TimedOut;
                    }
                    thread::sleep(WAIT_POLL);
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return WaitOutcome::WaitFailed(e);
                }
            }
        }
    }
}

enum WaitOutcome {
    Exited(bool),
    TimedOut,
    WaitFailed(std::io::Error),
}

/// The platform's standard command interpreter, ready to take a raw line.
fn interpreter(command_line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command_line);
        cmd
    }

    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}

fn reader_thread(
    pipe: Option<impl Read + Send + 'static>,
) -> Option<thread::JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

/// Success stream first, diagnostic stream after, separated by a newline
/// when both carry text.
fn combine(stdout: &[u8], stderr: &[u8]) -> String {
    let mut output = String::from_utf8_lossy(stdout).into_owned();
    if !stderr.is_empty() {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&String::from_utf8_lossy(stderr));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_joins_both_streams() {
        assert_eq!(combine(b"out", b"err"), "out\nerr");
        assert_eq!(combine(b"out\n", b"err"), "out\nerr");
        assert_eq!(combine(b"", b"err"), "err");
        assert_eq!(combine(b"out", b""), "out");
        assert_eq!(combine(b"", b""), "");
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::path::PathBuf;

        fn executor() -> ShellExecutor {
            ShellExecutor::new(Duration::from_secs(10))
        }

        #[test]
        fn captures_stdout() {
            let result = executor().execute("echo hello", Path::new("/"));
            assert!(result.succeeded);
            assert!(result.error_kind.is_none());
            assert_eq!(result.output.trim(), "hello");
        }

        #[test]
        fn captures_both_streams() {
            let result = executor().execute("echo out; echo err 1>&2", Path::new("/"));
            assert!(result.succeeded);
            assert!(result.output.contains("out"));
            assert!(result.output.contains("err"));
        }

        #[test]
        fn nonzero_exit_is_a_normal_failed_result() {
            let result = executor().execute("exit 3", Path::new("/"));
            assert!(!result.succeeded);
            assert!(result.error_kind.is_none());
        }

        #[test]
        fn runs_in_the_requested_directory() {
            let result = executor().execute("pwd", Path::new("/tmp"));
            assert!(result.succeeded);
            // /tmp may be a symlink (macOS), so only check the suffix.
            assert!(result.output.trim().ends_with("tmp"));
        }

        #[test]
        fn missing_cwd_is_a_spawn_failure() {
            let cwd = PathBuf::from("/nonexistent-glassterm-test-dir");
            let result = executor().execute("echo hi", &cwd);
            assert!(!result.succeeded);
            assert_eq!(result.error_kind, Some(ExecErrorKind::Spawn));
            assert!(!result.output.is_empty());
        }

        #[test]
        fn hung_command_is_killed_and_reported() {
            let executor = ShellExecutor::new(Duration::from_millis(200));
            let started = Instant::now();
            let result = executor.execute("sleep 5", Path::new("/"));
            assert!(started.elapsed() < Duration::from_secs(5));
            assert!(!result.succeeded);
            assert_eq!(result.error_kind, Some(ExecErrorKind::Timeout));
            assert!(result.output.contains("timed out"));
        }
    }
}
