use std::fmt;
use std::time::Duration;

/// Structured error type for control-plane CLI operations.
///
/// Machine-actionable variants instead of a flat string so callers can tell
/// a timeout from a missing binary from a remote-side refusal.
#[derive(Debug)]
pub enum RemoteError {
    /// Control-plane command timed out.
    Timeout { command: String, timeout: Duration },

    /// Control-plane command ran but returned non-zero exit.
    CommandFailed {
        command: String,
        stderr: String,
        exit_code: Option<i32>,
    },

    /// Control-plane binary couldn't be executed (not in PATH, permission denied).
    ExecFailed {
        command: String,
        source: std::io::Error,
    },
}

impl RemoteError {
    /// Create a timeout error.
    pub fn timeout(cmd: impl Into<String>, dur: Duration) -> Self {
        RemoteError::Timeout {
            command: cmd.into(),
            timeout: dur,
        }
    }

    /// Create a command-failed error from an `std::process::Output`.
    pub fn failed(cmd: impl Into<String>, output: &std::process::Output) -> Self {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        RemoteError::CommandFailed {
            command: cmd.into(),
            stderr,
            exit_code: output.status.code(),
        }
    }

    /// Create an exec-failed error (binary not found / permission denied).
    pub fn exec_failed(cmd: impl Into<String>, err: std::io::Error) -> Self {
        RemoteError::ExecFailed {
            command: cmd.into(),
            source: err,
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Timeout { command, timeout } => {
                write!(
                    f,
                    "Timed out running '{}' (exceeded {} seconds)",
                    command,
                    timeout.as_secs()
                )
            }
            RemoteError::CommandFailed {
                command,
                stderr,
                exit_code,
            } => {
                if command.is_empty() {
                    write!(f, "{}", stderr)
                } else if let Some(code) = exit_code {
                    write!(f, "'{}' failed (exit code {}): {}", command, code, stderr)
                } else {
                    write!(f, "'{}' failed: {}", command, stderr)
                }
            }
            RemoteError::ExecFailed { command, source } => {
                write!(f, "Failed to execute '{}': {}", command, source)
            }
        }
    }
}

impl std::error::Error for RemoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RemoteError::ExecFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Custom error message helper used by test doubles.
impl RemoteError {
    pub fn message(msg: impl Into<String>) -> Self {
        RemoteError::CommandFailed {
            command: String::new(),
            stderr: msg.into(),
            exit_code: None,
        }
    }
}
