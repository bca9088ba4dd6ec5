//! The `Lxc` client facade
//!
//! Every operation runs one `lxc-*` command through the client's runner and hands the output
//! to the parser selected by the resolved [`VersionProfile`]. The profile is probed on first
//! use and then pinned for the client's lifetime.
//!
//! ```no_run
//! use lxc::Lxc;
//! use lxc_runner::backends::local::LocalRunner;
//!
//! # async fn example() -> lxc::Result<()> {
//! let lxc = Lxc::new(LocalRunner);
//! for name in lxc.list().await? {
//!     println!("{name}");
//! }
//! # Ok(())
//! # }
//! ```

use lxc_runner::backends::local::LocalRunner;
use lxc_runner::backends::sudo::SudoRunner;
use lxc_runner::{Command, Runner};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::config::Config;
use crate::container::Container;
use crate::error::Result;
use crate::parser::{self, ProcessEntry};
use crate::settings::Settings;
use crate::version::{self, VersionProfile};

/// Client for the LXC toolset on one host
pub struct Lxc {
    runner: Arc<dyn Runner>,
    config: Config,
    profile: OnceLock<VersionProfile>,
}

impl std::fmt::Debug for Lxc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lxc")
            .field("runner", &self.runner.description())
            .field("config", &self.config)
            .field("profile", &self.profile.get())
            .finish()
    }
}

impl Lxc {
    /// Client executing through `runner`, with default configuration
    pub fn new(runner: impl Runner + 'static) -> Self {
        Self::builder().runner(runner).build()
    }

    /// Start building a client
    pub fn builder() -> LxcBuilder {
        LxcBuilder::default()
    }

    /// Build a client from settings, establishing the remote session if one is configured
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let runner = settings.runner.clone().connect().await?;

        let mut builder = Self::builder()
            .shared_runner(runner)
            .use_sudo(settings.use_sudo);
        if let Some(version) = &settings.version {
            builder = builder.profile(VersionProfile::from_version(version.trim()));
        }
        if let Some(path) = &settings.config_file {
            builder = builder.config(Config::new(path));
        }
        Ok(builder.build())
    }

    /// The runner every command goes through
    pub fn runner(&self) -> &Arc<dyn Runner> {
        &self.runner
    }

    /// The main LXC configuration file
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The version profile, probing the toolset on first use
    pub async fn profile(&self) -> Result<&VersionProfile> {
        if let Some(profile) = self.profile.get() {
            return Ok(profile);
        }
        let resolved = version::resolve(self.runner.as_ref()).await?;
        // A concurrent first call may have won; its profile stays pinned.
        Ok(self.profile.get_or_init(|| resolved))
    }

    /// Run an `lxc-*` tool and return its stdout.
    ///
    /// The `lxc-` prefix is added when missing, so `exec("version", ..)` and
    /// `exec("lxc-version", ..)` run the same command.
    pub async fn exec<I, S>(&self, subcommand: &str, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = if subcommand.starts_with("lxc-") {
            subcommand.to_string()
        } else {
            format!("lxc-{}", subcommand)
        };
        let command = Command::builder(program).args(args).build();
        debug!(command = %command, runner = %self.runner.description(), "exec");
        Ok(self.runner.execute(&command).await?)
    }

    /// Run a whitespace-separated command line such as `"ls --fancy"` through [`Lxc::exec`].
    ///
    /// No quoting rules apply; use [`Lxc::exec`] for arguments containing spaces.
    pub async fn exec_line(&self, line: &str) -> Result<String> {
        let command = Command::parse_line(line)
            .ok_or_else(|| lxc_runner::Error::spawn(line, "empty command line"))?;
        self.exec(command.get_program(), command.get_args().iter().cloned())
            .await
    }

    /// Names of all containers, in the order the toolset lists them
    pub async fn list(&self) -> Result<Vec<String>> {
        let kind = self.profile().await?.kind();
        let output = self.exec("ls", NO_ARGS).await?;
        Ok(parser::parse_list(&output, kind))
    }

    /// Whether a container with exactly this name exists
    pub async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.list().await?.iter().any(|n| n == name))
    }

    /// Processes running in containers, plus host rows when the toolset prints them
    pub async fn process_table(&self) -> Result<Vec<ProcessEntry>> {
        let kind = self.profile().await?.kind();
        let output = self.exec("ps", ["--lxc"]).await?;
        Ok(parser::parse_process_table(&output, kind))
    }

    /// The toolset version exactly as reported
    pub async fn tool_version(&self) -> Result<String> {
        Ok(self.profile().await?.version().to_string())
    }

    /// Kernel capability report from `lxc-checkconfig`, line by line
    pub async fn checkconfig(&self) -> Result<Vec<String>> {
        let output = self.exec("checkconfig", NO_ARGS).await?;
        Ok(parser::parse_checkconfig(&output))
    }

    /// One-line summary of version and runner, for debugging
    pub async fn describe(&self) -> Result<String> {
        let profile = self.profile().await?;
        Ok(format!(
            "LXC {} (profile {}, runner {})",
            profile.version(),
            profile.kind(),
            self.runner.description()
        ))
    }

    /// Handle on a single container; does not check that it exists
    pub fn container(&self, name: impl Into<String>) -> Container<'_> {
        Container::new(name, self)
    }

    /// Handles on every listed container
    pub async fn containers(&self) -> Result<Vec<Container<'_>>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|name| self.container(name))
            .collect())
    }
}

const NO_ARGS: [&str; 0] = [];

/// Builder for [`Lxc`]
#[derive(Default)]
pub struct LxcBuilder {
    runner: Option<Arc<dyn Runner>>,
    use_sudo: bool,
    profile: Option<VersionProfile>,
    config: Option<Config>,
}

impl LxcBuilder {
    /// Execute through `runner`; the local runner is used when none is set
    pub fn runner(self, runner: impl Runner + 'static) -> Self {
        self.shared_runner(Arc::new(runner))
    }

    /// Execute through an already shared runner
    pub fn shared_runner(mut self, runner: Arc<dyn Runner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Prefix every command with `sudo -n`
    pub fn use_sudo(mut self, enabled: bool) -> Self {
        self.use_sudo = enabled;
        self
    }

    /// Pin the version profile instead of probing for it
    pub fn profile(mut self, profile: VersionProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Use a non-standard lxc.conf location
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the client
    pub fn build(self) -> Lxc {
        let runner = self
            .runner
            .unwrap_or_else(|| Arc::new(LocalRunner) as Arc<dyn Runner>);
        let runner: Arc<dyn Runner> = if self.use_sudo {
            Arc::new(SudoRunner::new(runner))
        } else {
            runner
        };

        let profile = OnceLock::new();
        if let Some(pinned) = self.profile {
            let _ = profile.set(pinned);
        }

        Lxc {
            runner,
            config: self.config.unwrap_or_default(),
            profile,
        }
    }
}
