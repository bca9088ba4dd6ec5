//! Scripted runner for tests
//!
//! Responses are keyed by the command's shell line, so a test states exactly which commands
//! it expects and what they print.
//!
//! ```
//! use lxc_runner::{Command, Runner, backends::fake::FakeRunner};
//!
//! # futures::executor::block_on(async {
//! let runner = FakeRunner::new().with_stdout("lxc-ls -1", "web\ndb\n");
//! let out = runner.execute(&Command::builder("lxc-ls").arg("-1").build()).await.unwrap();
//! assert_eq!(out, "web\ndb\n");
//! assert_eq!(runner.commands(), vec!["lxc-ls -1".to_string()]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use crate::command::Command;
use crate::error::Result;
use crate::output::CommandOutput;
use crate::runner::Runner;

/// Runner answering from a table of canned outputs
#[derive(Debug, Default)]
pub struct FakeRunner {
    responses: HashMap<String, CommandOutput>,
    fallback: Option<CommandOutput>,
    history: Mutex<Vec<String>>,
}

impl FakeRunner {
    /// Create a runner with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `line` with the given output
    pub fn with_output(mut self, line: impl Into<String>, output: CommandOutput) -> Self {
        self.responses.insert(line.into(), output);
        self
    }

    /// Answer `line` with a successful run printing `stdout`
    pub fn with_stdout(self, line: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.with_output(line, CommandOutput::success(stdout))
    }

    /// Answer every unscripted command with the given output
    pub fn with_fallback(mut self, output: CommandOutput) -> Self {
        self.fallback = Some(output);
        self
    }

    /// Shell lines of every command run so far, oldest first
    pub fn commands(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Runner for FakeRunner {
    async fn run(&self, command: &Command) -> Result<CommandOutput> {
        let line = command.to_shell_string();
        debug!(command = %line, "fake runner received command");
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.clone());

        let output = self
            .responses
            .get(&line)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or_else(|| {
                CommandOutput::failure(127, format!("sh: {}: command not found\n", command.get_program()))
            });
        Ok(output)
    }

    fn description(&self) -> String {
        "fake".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[smol_potat::test]
    async fn test_unscripted_command_is_not_found() {
        let runner = FakeRunner::new();
        let err = runner.execute(&Command::new("lxc-version")).await.unwrap_err();

        assert!(err.is_command_not_found());
        match err {
            Error::Execution { exit_code, stderr, .. } => {
                assert_eq!(exit_code, Some(127));
                assert!(stderr.contains("lxc-version"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[smol_potat::test]
    async fn test_fallback_answers_everything() {
        let runner = FakeRunner::new().with_fallback(CommandOutput::success("same\n"));
        let out = runner.execute(&Command::new("anything")).await.unwrap();
        assert_eq!(out, "same\n");
    }

    #[smol_potat::test]
    async fn test_failure_output_is_surfaced() {
        let runner = FakeRunner::new().with_output(
            "lxc-start -d -n web",
            CommandOutput::failure(1, "lxc-start: failed to spawn 'web'\n"),
        );
        let cmd = Command::builder("lxc-start").args(["-d", "-n", "web"]).build();

        let err = runner.execute(&cmd).await.unwrap_err();
        assert_eq!(
            err.captured_output().as_deref(),
            Some("lxc-start: failed to spawn 'web'\n")
        );
    }
}
