//! Sudo runner for privilege escalation
//!
//! The wrapped runner executes `sudo -n <program> <args>`. Non-interactive mode means sudo
//! fails immediately instead of prompting when a password would be required, so configure
//! sudoers with NOPASSWD for the `lxc-*` tools (or rely on cached credentials).
//!
//! Environment variables are passed through `env` after sudo, since sudo's `env_reset`
//! would drop them from its own environment.
//!
//! # Example
//!
//! ```no_run
//! use lxc_runner::{Command, Runner};
//! use lxc_runner::backends::{local::LocalRunner, sudo::SudoRunner};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // This will run: sudo -n lxc-start -d -n web
//! let runner = SudoRunner::new(LocalRunner);
//! let cmd = Command::builder("lxc-start").args(["-d", "-n", "web"]).build();
//! runner.execute(&cmd).await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    Command,
    error::Result,
    output::{CommandOutput, ExitStatus},
    runner::Runner,
};
use async_trait::async_trait;

/// Status sudo exits with when it cannot run the target
const SUDO_FAILURE: i32 = 1;

/// Shell status for a missing program
const COMMAND_NOT_FOUND: i32 = 127;

/// Runner that wraps another runner to execute commands with sudo
#[derive(Debug, Clone)]
pub struct SudoRunner<R> {
    inner: R,
}

impl<R> SudoRunner<R> {
    /// Create a new sudo runner wrapping the given runner
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Build the sudo command around `command`
    fn wrap(command: &Command) -> Command {
        let mut builder = Command::builder("sudo").arg("-n");

        let envs = command.get_envs();
        if !envs.is_empty() {
            builder = builder.arg("env");
            for (key, val) in envs {
                builder = builder.arg(format!("{}={}", key, val));
            }
        }

        builder
            .arg(command.get_program())
            .args(command.get_args().iter().cloned())
            .build()
    }
}

#[async_trait]
impl<R: Runner> Runner for SudoRunner<R> {
    async fn run(&self, command: &Command) -> Result<CommandOutput> {
        let mut output = self
            .inner
            .run(&Self::wrap(command))
            .await
            .map_err(|e| e.with_layer_context("Sudo"))?;

        // sudo reports a missing target as a plain failure, not the shell's 127
        let not_found = format!("sudo: {}: command not found", command.get_program());
        if output.status.code == Some(SUDO_FAILURE) && output.stderr.contains(&not_found) {
            output.status = ExitStatus::from_code(COMMAND_NOT_FOUND);
        }

        Ok(output)
    }

    fn description(&self) -> String {
        format!("sudo({})", self.inner.description())
    }
}
