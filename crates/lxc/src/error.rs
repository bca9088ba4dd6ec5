//! Error types for the LXC client

use thiserror::Error;

/// Errors surfaced by client operations
#[derive(Error, Debug)]
pub enum Error {
    /// The command could not be run, or ran and failed
    #[error(transparent)]
    Runner(#[from] lxc_runner::Error),

    /// The version probe printed nothing usable
    #[error("could not determine the LXC version from {output:?}")]
    VersionParse {
        /// What the probe printed
        output: String,
    },

    /// Output of a command could not be understood at all
    #[error("could not parse output of `{command}`: {reason}")]
    OutputParse {
        /// The command whose output was rejected
        command: String,
        /// Why it was rejected
        reason: String,
    },
}

impl Error {
    /// Create a version parse error
    pub fn version_parse(output: impl Into<String>) -> Self {
        Self::VersionParse {
            output: output.into(),
        }
    }

    /// Create an output parse error
    pub fn output_parse(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OutputParse {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Text the underlying tool printed before the failure, when there is any
    pub fn captured_output(&self) -> Option<String> {
        match self {
            Error::Runner(e) => e.captured_output(),
            Error::VersionParse { output } => Some(output.clone()),
            Error::OutputParse { .. } => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
