//! Subcommand implementations

pub mod container;
pub mod exec;
pub mod host;
pub mod list;
pub mod ps;

use anyhow::{Context, Result};
use lxc::Lxc;
use lxc::settings::{self, Settings};
use lxc_runner::RunnerConfig;
use lxc_runner::backends::ssh::SshConfig;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable tables
    Table,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Invalid format: {}. Must be 'table' or 'json'", other),
        }
    }
}

/// Where the client runs its commands; flags override the settings file
#[derive(Debug, Default)]
pub struct Connection {
    pub settings: Option<PathBuf>,
    pub host: Option<String>,
    pub user: Option<String>,
    pub port: Option<u16>,
    pub identity_file: Option<PathBuf>,
    pub sudo: bool,
}

impl Connection {
    /// Merge the settings file with the command line flags
    pub fn resolve(&self) -> Result<Settings> {
        let mut resolved = match &self.settings {
            Some(path) => settings::parse_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(host) = &self.host {
            let mut ssh = match resolved.runner {
                RunnerConfig::Remote(existing) => SshConfig {
                    host: host.clone(),
                    ..existing
                },
                RunnerConfig::Local => SshConfig::new(host.clone()),
            };
            if let Some(user) = &self.user {
                ssh = ssh.with_user(user.clone());
            }
            if let Some(port) = self.port {
                ssh = ssh.with_port(port);
            }
            if let Some(identity) = &self.identity_file {
                ssh = ssh.with_identity_file(identity.clone());
            }
            resolved.runner = RunnerConfig::Remote(ssh);
        } else if self.user.is_some() || self.port.is_some() || self.identity_file.is_some() {
            anyhow::bail!("--user, --port and --identity-file need --host");
        }

        resolved.use_sudo |= self.sudo;
        settings::validate(&resolved).context("Invalid connection settings")?;
        Ok(resolved)
    }

    /// Build the client, opening the SSH session when the runner is remote
    pub async fn open(&self) -> Result<Lxc> {
        let resolved = self.resolve()?;
        debug!(remote = resolved.runner.is_remote(), sudo = resolved.use_sudo, "connecting");
        Lxc::from_settings(&resolved)
            .await
            .context("Failed to reach the LXC host")
    }
}

/// Print `value` as pretty JSON
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
