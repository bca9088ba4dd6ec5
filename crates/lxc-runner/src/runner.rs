//! Runner trait for executing commands in different contexts

use crate::command::Command;
use crate::error::{Error, Result};
use crate::output::CommandOutput;
use async_trait::async_trait;
use std::sync::Arc;

/// A runner that can execute commands in a specific context
#[async_trait]
pub trait Runner: Send + Sync {
    /// Run a command to completion and capture everything it produced.
    ///
    /// A non-zero exit is not an error at this level; transport and launch failures are.
    async fn run(&self, command: &Command) -> Result<CommandOutput>;

    /// Short label for the runner kind, used in debugging output
    fn description(&self) -> String;

    /// Execute a command and return its stdout, failing on a non-zero exit
    async fn execute(&self, command: &Command) -> Result<String> {
        let output = self.run(command).await?;
        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(Error::Execution {
                command: command.to_shell_string(),
                exit_code: output.status.code,
                stdout: output.stdout,
                stderr: output.stderr,
            })
        }
    }
}

#[async_trait]
impl<R: Runner + ?Sized> Runner for Arc<R> {
    async fn run(&self, command: &Command) -> Result<CommandOutput> {
        (**self).run(command).await
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

#[async_trait]
impl<R: Runner + ?Sized> Runner for Box<R> {
    async fn run(&self, command: &Command) -> Result<CommandOutput> {
        (**self).run(command).await
    }

    fn description(&self) -> String {
        (**self).description()
    }
}
