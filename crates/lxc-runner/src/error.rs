//! Error types for command execution

use thiserror::Error;

/// Unified error type for command execution
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch a local process
    #[error("failed to spawn `{command}`: {reason}")]
    Spawn {
        /// The command line that could not be launched
        command: String,
        /// The reason for the spawn failure
        reason: String,
    },

    /// The remote session could not be established or dropped mid-command
    #[error("connection to {host} failed: {reason}")]
    Connection {
        /// The destination the session was opened against
        host: String,
        /// The detailed reason for the connection failure
        reason: String,
    },

    /// The command ran but exited unsuccessfully
    #[error("`{command}` failed with {}: {}", exit_code_label(*.exit_code), .stderr.trim())]
    Execution {
        /// The command line that was executed
        command: String,
        /// Exit code, `None` when terminated by a signal
        exit_code: Option<i32>,
        /// Everything the command wrote to stdout before exiting
        stdout: String,
        /// Everything the command wrote to stderr before exiting
        stderr: String,
    },
}

fn exit_code_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

impl Error {
    /// Create a spawn error
    pub fn spawn(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Spawn {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a connection error
    pub fn connection(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Connection {
            host: host.into(),
            reason: reason.into(),
        }
    }

    /// Output the underlying tool produced before failing, if any.
    ///
    /// Stdout and stderr are joined so callers can show the tool's own diagnostics.
    pub fn captured_output(&self) -> Option<String> {
        match self {
            Error::Execution { stdout, stderr, .. } => {
                let mut out = stdout.clone();
                if !stdout.is_empty() && !stderr.is_empty() && !stdout.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(stderr);
                Some(out)
            }
            _ => None,
        }
    }

    /// Whether the command could not be found (spawn failure or shell exit 127)
    pub fn is_command_not_found(&self) -> bool {
        match self {
            Error::Spawn { .. } => true,
            Error::Execution { exit_code, .. } => *exit_code == Some(127),
            _ => false,
        }
    }

    /// Add layer context to a spawn error message
    pub fn with_layer_context(self, layer: impl Into<String>) -> Self {
        match self {
            Error::Spawn { command, reason } => Error::Spawn {
                command,
                reason: format!("in {} layer: {}", layer.into(), reason),
            },
            other => other,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
