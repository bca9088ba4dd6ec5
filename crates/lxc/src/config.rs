//! Handle on the system-wide LXC configuration file

use std::path::{Path, PathBuf};

/// Location of the main LXC configuration file
pub const DEFAULT_CONFIG_FILE: &str = "/etc/lxc/lxc.conf";

/// Read-only handle on the LXC configuration file.
///
/// The file is owned by the toolset; this client neither parses nor writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    filename: PathBuf,
}

impl Config {
    /// Handle on a configuration file at a non-standard location
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    /// Path of the configuration file
    pub fn filename(&self) -> &Path {
        &self.filename
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}
