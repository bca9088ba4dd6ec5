//! SSH remote execution backend using the system `ssh` client

use async_trait::async_trait;
use futures::lock::Mutex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::backends::local::LocalRunner;
use crate::command::{Command, shell_escape};
use crate::error::{Error, Result};
use crate::output::CommandOutput;
use crate::runner::Runner;

/// Exit code the OpenSSH client reserves for its own failures
const SSH_CLIENT_FAILURE: i32 = 255;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// How the session authenticates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SshAuth {
    /// Whatever identities the ssh client and agent offer
    #[default]
    Agent,
    /// A specific private key, no other identities are tried
    Key {
        /// Path to the private key
        identity_file: PathBuf,
    },
    /// Password authentication, handed to `sshpass` through the environment
    Password {
        /// The account password
        password: String,
    },
}

/// What to do with unknown or changed host keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostKeyPolicy {
    /// Only connect to hosts already in known_hosts
    Strict,
    /// Record keys of new hosts, refuse changed ones
    #[default]
    AcceptNew,
    /// Skip host key verification entirely
    Ignore,
}

/// SSH connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshConfig {
    /// Target host (hostname or IP)
    pub host: String,
    /// SSH user (optional, uses system default if not specified)
    #[serde(default)]
    pub user: Option<String>,
    /// SSH port (optional, defaults to 22)
    #[serde(default)]
    pub port: Option<u16>,
    /// Authentication material
    #[serde(default)]
    pub auth: SshAuth,
    /// Seconds to wait for the connection to come up
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Host key verification policy
    #[serde(default)]
    pub host_key_policy: HostKeyPolicy,
    /// Additional SSH arguments
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT
}

impl SshConfig {
    /// Create a new SSH configuration for the given host
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: None,
            port: None,
            auth: SshAuth::Agent,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            host_key_policy: HostKeyPolicy::AcceptNew,
            extra_args: Vec::new(),
        }
    }

    /// Set the SSH user
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Authenticate with the given private key only
    pub fn with_identity_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.auth = SshAuth::Key {
            identity_file: path.into(),
        };
        self
    }

    /// Authenticate with a password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.auth = SshAuth::Password {
            password: password.into(),
        };
        self
    }

    /// Set the connection timeout in seconds
    pub fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout = seconds;
        self
    }

    /// Set the host key policy
    pub fn with_host_key_policy(mut self, policy: HostKeyPolicy) -> Self {
        self.host_key_policy = policy;
        self
    }

    /// Add extra SSH arguments
    pub fn with_extra_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Get the destination string (user@host if user is specified)
    pub fn destination(&self) -> String {
        if let Some(user) = &self.user {
            format!("{}@{}", user, self.host)
        } else {
            self.host.clone()
        }
    }

    /// Build the local command that runs `remote` on the configured host
    fn ssh_command(&self, remote: &Command) -> Command {
        let mut ssh_cmd = match &self.auth {
            SshAuth::Password { password } => {
                let mut cmd = Command::new("sshpass");
                cmd.arg("-e").arg("ssh").env("SSHPASS", password.as_str());
                cmd
            }
            _ => {
                let mut cmd = Command::new("ssh");
                cmd.arg("-o").arg("BatchMode=yes");
                cmd
            }
        };

        ssh_cmd
            .arg("-o")
            .arg(format!("ConnectTimeout={}", self.connect_timeout));

        match self.host_key_policy {
            HostKeyPolicy::Strict => {
                ssh_cmd.arg("-o").arg("StrictHostKeyChecking=yes");
            }
            HostKeyPolicy::AcceptNew => {
                ssh_cmd.arg("-o").arg("StrictHostKeyChecking=accept-new");
            }
            HostKeyPolicy::Ignore => {
                ssh_cmd
                    .arg("-o")
                    .arg("StrictHostKeyChecking=no")
                    .arg("-o")
                    .arg("UserKnownHostsFile=/dev/null");
            }
        }

        if let Some(port) = self.port {
            ssh_cmd.arg("-p").arg(port.to_string());
        }

        if let SshAuth::Key { identity_file } = &self.auth {
            ssh_cmd
                .arg("-i")
                .arg(identity_file.to_string_lossy().to_string())
                .arg("-o")
                .arg("IdentitiesOnly=yes");
        }

        ssh_cmd.args(self.extra_args.iter().cloned());
        ssh_cmd.arg(self.destination()).arg("--");
        ssh_cmd.arg(format_remote_command(remote));
        ssh_cmd
    }
}

/// Runner that executes commands on a remote host over SSH.
///
/// Commands are handed to an inner runner (the local one by default) wrapped in an `ssh`
/// invocation. Only one command is in flight per session; concurrent callers queue up.
#[derive(Debug)]
pub struct SshRunner<R = LocalRunner> {
    inner: R,
    config: SshConfig,
    session: Mutex<()>,
}

impl SshRunner<LocalRunner> {
    /// Open a session to the configured host and verify it is usable
    pub async fn connect(config: SshConfig) -> Result<Self> {
        let runner = Self::with_runner(LocalRunner, config);
        runner.verify().await?;
        Ok(runner)
    }
}

impl<R: Runner> SshRunner<R> {
    /// Create a runner wrapping the given inner runner without probing the host
    pub fn with_runner(inner: R, config: SshConfig) -> Self {
        Self {
            inner,
            config,
            session: Mutex::new(()),
        }
    }

    /// The session configuration
    pub fn config(&self) -> &SshConfig {
        &self.config
    }

    /// The runner the `ssh` client itself is launched through
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Run a no-op on the remote host to check the session can be established
    pub async fn verify(&self) -> Result<()> {
        match self.execute(&Command::new("true")).await {
            Ok(_) => Ok(()),
            Err(Error::Connection { host, reason }) => Err(Error::Connection { host, reason }),
            Err(e) => Err(Error::connection(
                self.config.destination(),
                format!("session probe failed: {}", e),
            )),
        }
    }
}

#[async_trait]
impl<R: Runner> Runner for SshRunner<R> {
    async fn run(&self, command: &Command) -> Result<CommandOutput> {
        let destination = self.config.destination();
        let ssh_cmd = self.config.ssh_command(command);

        let _session = self.session.lock().await;
        debug!(host = %destination, command = %command, "running remote command");

        let output = match self.inner.run(&ssh_cmd).await {
            Ok(output) => output,
            Err(Error::Spawn { reason, .. }) => {
                return Err(Error::connection(
                    destination,
                    format!("could not start ssh client: {}", reason),
                ));
            }
            Err(e) => return Err(e),
        };

        if output.status.code == Some(SSH_CLIENT_FAILURE) {
            let reason = output.stderr.trim();
            warn!(host = %destination, %reason, "ssh session failed");
            return Err(Error::connection(
                destination,
                if reason.is_empty() {
                    "ssh exited with status 255".to_string()
                } else {
                    reason.to_string()
                },
            ));
        }

        Ok(output)
    }

    fn description(&self) -> String {
        format!(
            "ssh://{}:{}",
            self.config.destination(),
            self.config.port.unwrap_or(22)
        )
    }
}

/// Format a command for remote execution via SSH
fn format_remote_command(cmd: &Command) -> String {
    let mut remote = String::new();
    for (key, value) in cmd.get_envs() {
        remote.push_str(&format!("{}={} ", shell_escape(key), shell_escape(value)));
    }
    remote.push_str(&cmd.to_shell_string());
    remote
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<&str> {
        cmd.get_args().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_ssh_config() {
        let config = SshConfig::new("example.com")
            .with_user("alice")
            .with_port(2222)
            .with_identity_file("/home/alice/.ssh/id_rsa");

        assert_eq!(config.destination(), "alice@example.com");
        assert_eq!(config.port, Some(2222));
    }

    #[test]
    fn test_key_auth_command() {
        let config = SshConfig::new("10.0.3.1")
            .with_user("root")
            .with_port(2222)
            .with_identity_file("/root/.ssh/id_rsa")
            .with_host_key_policy(HostKeyPolicy::Ignore);

        let remote = Command::builder("lxc-ls").arg("-1").build();
        let cmd = config.ssh_command(&remote);

        assert_eq!(cmd.get_program(), "ssh");
        assert_eq!(
            args_of(&cmd),
            vec![
                "-o",
                "BatchMode=yes",
                "-o",
                "ConnectTimeout=10",
                "-o",
                "StrictHostKeyChecking=no",
                "-o",
                "UserKnownHostsFile=/dev/null",
                "-p",
                "2222",
                "-i",
                "/root/.ssh/id_rsa",
                "-o",
                "IdentitiesOnly=yes",
                "root@10.0.3.1",
                "--",
                "lxc-ls -1",
            ]
        );
    }

    #[test]
    fn test_password_auth_uses_environment() {
        let config = SshConfig::new("host").with_password("s3cret");
        let cmd = config.ssh_command(&Command::new("lxc-version"));

        assert_eq!(cmd.get_program(), "sshpass");
        assert_eq!(&args_of(&cmd)[..2], ["-e", "ssh"]);
        assert!(!cmd.to_shell_string().contains("s3cret"));
        assert_eq!(cmd.get_envs().get("SSHPASS").map(String::as_str), Some("s3cret"));
        assert!(!args_of(&cmd).contains(&"BatchMode=yes"));
    }

    #[test]
    fn test_remote_command_carries_env() {
        let remote = Command::builder("lxc-attach")
            .args(["-n", "web", "--", "echo", "hello world"])
            .env("LANG", "C")
            .build();
        assert_eq!(
            format_remote_command(&remote),
            "LANG=C lxc-attach -n web -- echo 'hello world'"
        );
    }

    #[test]
    fn test_description() {
        let runner = SshRunner::with_runner(LocalRunner, SshConfig::new("box").with_user("ops"));
        assert_eq!(runner.description(), "ssh://ops@box:22");
    }

    #[test]
    fn test_config_from_yaml() {
        let config: SshConfig = serde_yaml::from_str(
            "host: 10.0.3.1\nuser: ubuntu\nauth:\n  method: key\n  identity_file: /home/ubuntu/.ssh/id_rsa\n",
        )
        .unwrap();

        assert_eq!(config.destination(), "ubuntu@10.0.3.1");
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.host_key_policy, HostKeyPolicy::AcceptNew);
        assert_eq!(
            config.auth,
            SshAuth::Key {
                identity_file: PathBuf::from("/home/ubuntu/.ssh/id_rsa")
            }
        );
    }
}
