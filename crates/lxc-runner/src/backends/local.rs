//! Local process execution backend

use async_process::Stdio;
use async_trait::async_trait;
use tracing::debug;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::output::CommandOutput;
use crate::runner::Runner;

/// Runner for executing processes on the current host
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRunner;

impl LocalRunner {
    /// Create a local runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Runner for LocalRunner {
    async fn run(&self, command: &Command) -> Result<CommandOutput> {
        let line = command.to_shell_string();
        debug!(command = %line, "running local command");

        let mut async_cmd = command.prepare();
        async_cmd.stdin(Stdio::null());
        async_cmd.stdout(Stdio::piped());
        async_cmd.stderr(Stdio::piped());

        let output = async_cmd
            .output()
            .await
            .map_err(|e| Error::spawn(line.clone(), e.to_string()))?;

        let output = CommandOutput::from_std(output);
        debug!(command = %line, code = ?output.status.code, "local command finished");
        Ok(output)
    }

    fn description(&self) -> String {
        "local".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_description() {
        assert_eq!(LocalRunner::new().description(), "local");
    }

    #[smol_potat::test]
    async fn test_captures_stdout() {
        let cmd = Command::builder("sh")
            .arg("-c")
            .arg("printf 'devop-test-1\\nabc-other-name\\n'")
            .build();

        let stdout = LocalRunner.execute(&cmd).await.unwrap();
        assert_eq!(stdout, "devop-test-1\nabc-other-name\n");
    }

    #[smol_potat::test]
    async fn test_env_is_forwarded() {
        let cmd = Command::builder("sh")
            .arg("-c")
            .arg("echo $LXC_TEST_VAR")
            .env("LXC_TEST_VAR", "test_value")
            .build();

        let stdout = LocalRunner.execute(&cmd).await.unwrap();
        assert_eq!(stdout.trim(), "test_value");
    }
}
