//! YAML settings for building a client
//!
//! ```yaml
//! runner:
//!   type: remote
//!   host: 10.0.3.1
//!   user: ubuntu
//!   auth:
//!     method: key
//!     identity_file: /home/ubuntu/.ssh/id_rsa
//! use_sudo: true
//! ```

use lxc_runner::RunnerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::version::parse_version;

/// Settings error types
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read settings file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid settings
    #[error("Invalid settings: {0}")]
    Validation(String),
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// How a client reaches and drives the toolset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Local or remote execution
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Prefix every command with `sudo -n`
    #[serde(default)]
    pub use_sudo: bool,

    /// Known toolset version; skips the version probe when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Location of lxc.conf when not the standard one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Parse a YAML settings file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parse YAML settings from a string
pub fn parse_str(content: &str) -> Result<Settings> {
    let settings: Settings = serde_yaml::from_str(content)?;
    validate(&settings)?;
    Ok(settings)
}

/// Validate settings
pub fn validate(settings: &Settings) -> Result<()> {
    if let RunnerConfig::Remote(ssh) = &settings.runner {
        if ssh.host.trim().is_empty() {
            return Err(SettingsError::Validation(
                "remote runner needs a host".to_string(),
            ));
        }
        if ssh.connect_timeout == 0 {
            return Err(SettingsError::Validation(
                "connect_timeout must be at least one second".to_string(),
            ));
        }
    }

    if let Some(version) = &settings.version {
        match parse_version(version) {
            Ok(token) if token == version.trim() => {}
            _ => {
                return Err(SettingsError::Validation(format!(
                    "'{}' is not an LXC version",
                    version
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lxc_runner::backends::ssh::SshAuth;
    use std::io::Write;

    #[test]
    fn test_empty_settings_are_local() {
        let settings = parse_str("{}").unwrap();
        assert_eq!(settings.runner, RunnerConfig::Local);
        assert!(!settings.use_sudo);
        assert_eq!(settings.version, None);
    }

    #[test]
    fn test_remote_settings() {
        let settings = parse_str(
            r#"
runner:
  type: remote
  host: 10.0.3.1
  user: ubuntu
  auth:
    method: password
    password: hunter2
use_sudo: true
version: 0.8.0-rc1
"#,
        )
        .unwrap();

        let RunnerConfig::Remote(ssh) = &settings.runner else {
            panic!("expected remote runner");
        };
        assert_eq!(ssh.destination(), "ubuntu@10.0.3.1");
        assert_eq!(
            ssh.auth,
            SshAuth::Password {
                password: "hunter2".to_string()
            }
        );
        assert!(settings.use_sudo);
        assert_eq!(settings.version.as_deref(), Some("0.8.0-rc1"));
    }

    #[test]
    fn test_remote_without_host_is_rejected() {
        let err = parse_str("runner:\n  type: remote\n  host: ''\n").unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)));
    }

    #[test]
    fn test_bad_version_is_rejected() {
        let err = parse_str("version: latest\n").unwrap_err();
        assert!(err.to_string().contains("not an LXC version"));
    }

    #[test]
    fn test_unknown_runner_type() {
        assert!(matches!(
            parse_str("runner:\n  type: docker\n"),
            Err(SettingsError::Yaml(_))
        ));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "runner:\n  type: local\nuse_sudo: true").unwrap();

        let settings = parse_file(file.path()).unwrap();
        assert!(settings.use_sudo);

        assert!(matches!(
            parse_file("/nonexistent/lxc-client.yaml"),
            Err(SettingsError::Read(_))
        ));
    }
}
