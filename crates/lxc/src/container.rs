//! Per-container operations
//!
//! A [`Container`] is a name plus the client it was obtained from. Every operation runs the
//! matching `lxc-*` tool through that client's runner.

use crate::client::Lxc;
use crate::error::Result;
use crate::parser::{self, ContainerInfo, ContainerState, ProcessEntry};

/// A named container on the client's host
#[derive(Debug, Clone)]
pub struct Container<'a> {
    name: String,
    lxc: &'a Lxc,
}

impl<'a> Container<'a> {
    pub(crate) fn new(name: impl Into<String>, lxc: &'a Lxc) -> Self {
        Self {
            name: name.into(),
            lxc,
        }
    }

    /// The container name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the container is listed by `lxc-ls`
    pub async fn exists(&self) -> Result<bool> {
        self.lxc.exists(&self.name).await
    }

    /// State and pid as reported by `lxc-info`
    pub async fn info(&self) -> Result<ContainerInfo> {
        let output = self.lxc.exec("info", ["-n", self.name.as_str()]).await?;
        parser::parse_info(&self.name, &output)
    }

    /// Current state
    pub async fn state(&self) -> Result<ContainerState> {
        Ok(self.info().await?.state)
    }

    /// Pid of the container's init, `None` when not running
    pub async fn pid(&self) -> Result<Option<u32>> {
        Ok(self.info().await?.pid)
    }

    /// Whether the container is running
    pub async fn is_running(&self) -> Result<bool> {
        Ok(self.state().await? == ContainerState::Running)
    }

    /// Whether the container is stopped
    pub async fn is_stopped(&self) -> Result<bool> {
        Ok(self.state().await? == ContainerState::Stopped)
    }

    /// Whether the container is frozen
    pub async fn is_frozen(&self) -> Result<bool> {
        Ok(self.state().await? == ContainerState::Frozen)
    }

    /// Start the container in the background
    pub async fn start(&self) -> Result<()> {
        self.run("start", &["-d"]).await
    }

    /// Stop the container
    pub async fn stop(&self) -> Result<()> {
        self.run("stop", &[]).await
    }

    /// Stop, then start the container
    pub async fn restart(&self) -> Result<()> {
        self.stop().await?;
        self.start().await
    }

    /// Suspend every process in the container
    pub async fn freeze(&self) -> Result<()> {
        self.run("freeze", &[]).await
    }

    /// Resume a frozen container
    pub async fn unfreeze(&self) -> Result<()> {
        self.run("unfreeze", &[]).await
    }

    /// Block until the container reaches `state`
    pub async fn wait(&self, state: &ContainerState) -> Result<()> {
        self.run("wait", &["-s", state.as_str()]).await
    }

    /// Remove the container
    pub async fn destroy(&self) -> Result<()> {
        self.run("destroy", &[]).await
    }

    /// Run a command inside the container and return its stdout
    pub async fn attach<I, S>(&self, command: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = vec!["-n".to_string(), self.name.clone(), "--".to_string()];
        args.extend(command.into_iter().map(Into::into));
        self.lxc.exec("attach", args).await
    }

    /// Rows of the process table belonging to this container
    pub async fn processes(&self) -> Result<Vec<ProcessEntry>> {
        Ok(self
            .lxc
            .process_table()
            .await?
            .into_iter()
            .filter(|entry| entry.container.as_deref() == Some(self.name.as_str()))
            .collect())
    }

    async fn run(&self, subcommand: &str, extra: &[&str]) -> Result<()> {
        let mut args = Vec::with_capacity(extra.len() + 2);
        args.extend_from_slice(extra);
        args.push("-n");
        args.push(self.name.as_str());
        self.lxc.exec(subcommand, args).await?;
        Ok(())
    }
}
