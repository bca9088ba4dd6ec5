//! Selection of the runner a client executes through

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::backends::local::LocalRunner;
use crate::backends::ssh::{SshConfig, SshRunner};
use crate::error::Result;
use crate::runner::Runner;

/// Where commands run: on this host, or on a remote one over SSH
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunnerConfig {
    /// Run against the current host
    #[default]
    Local,
    /// Run over an SSH session
    Remote(SshConfig),
}

impl RunnerConfig {
    /// Build the configured runner, establishing the SSH session for remote hosts
    pub async fn connect(self) -> Result<Arc<dyn Runner>> {
        match self {
            RunnerConfig::Local => Ok(Arc::new(LocalRunner)),
            RunnerConfig::Remote(config) => Ok(Arc::new(SshRunner::connect(config).await?)),
        }
    }

    /// Whether this selects a remote host
    pub fn is_remote(&self) -> bool {
        matches!(self, RunnerConfig::Remote(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_from_yaml() {
        let config: RunnerConfig = serde_yaml::from_str("type: local\n").unwrap();
        assert_eq!(config, RunnerConfig::Local);
        assert!(!config.is_remote());
    }

    #[test]
    fn test_remote_from_yaml() {
        let config: RunnerConfig = serde_yaml::from_str(
            "type: remote\nhost: 10.0.3.15\nuser: ubuntu\nport: 2222\nhost_key_policy: ignore\n",
        )
        .unwrap();

        let RunnerConfig::Remote(ssh) = config else {
            panic!("expected a remote runner config");
        };
        assert_eq!(ssh.destination(), "ubuntu@10.0.3.15");
        assert_eq!(ssh.port, Some(2222));
    }

    #[smol_potat::test]
    async fn test_local_connect() {
        let runner = RunnerConfig::Local.connect().await.unwrap();
        assert_eq!(runner.description(), "local");
    }
}
