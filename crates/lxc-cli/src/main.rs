//! `lxc-client`: query and drive the LXC toolset on this host or over SSH

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod commands;

use commands::{Connection, OutputFormat};

#[derive(Parser)]
#[command(name = "lxc-client")]
#[command(about = "Query and drive LXC containers, locally or over SSH")]
#[command(version)]
struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Run commands on this host over SSH
    #[arg(long, global = true)]
    host: Option<String>,

    /// SSH user
    #[arg(long, global = true)]
    user: Option<String>,

    /// SSH port
    #[arg(long, global = true)]
    port: Option<u16>,

    /// SSH private key
    #[arg(long, global = true)]
    identity_file: Option<PathBuf>,

    /// Prefix every command with `sudo -n`
    #[arg(long, global = true)]
    sudo: bool,

    /// Output format: table or json
    #[arg(short, long, global = true, default_value = "table")]
    format: String,

    /// Log debug output (same as --log-level debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List containers
    Ls,

    /// Check whether a container exists
    Exists {
        /// Container name
        name: String,
    },

    /// Show processes running in containers
    Ps {
        /// Only show this container's processes
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the LXC version
    Version,

    /// Report kernel support for containers
    Checkconfig,

    /// Show a container's state
    Info {
        /// Container name
        name: String,
    },

    /// Start a container in the background
    Start {
        /// Container name
        name: String,
    },

    /// Stop a container
    Stop {
        /// Container name
        name: String,
    },

    /// Freeze a container
    Freeze {
        /// Container name
        name: String,
    },

    /// Unfreeze a container
    Unfreeze {
        /// Container name
        name: String,
    },

    /// Run any lxc-* tool and print its output
    Exec {
        /// Tool name, with or without the `lxc-` prefix, or a quoted command line
        subcommand: String,

        /// Arguments passed through unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Summarize version, profile and runner
    Describe,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { cli.log_level };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let format: OutputFormat = cli.format.parse()?;
    let connection = Connection {
        settings: cli.config,
        host: cli.host,
        user: cli.user,
        port: cli.port,
        identity_file: cli.identity_file,
        sudo: cli.sudo,
    };

    smol::block_on(async {
        let lxc = connection.open().await?;

        match cli.command {
            Commands::Ls => commands::list::run(&lxc, format).await,
            Commands::Exists { name } => commands::list::exists(&lxc, &name).await,
            Commands::Ps { name } => commands::ps::run(&lxc, name.as_deref(), format).await,
            Commands::Version => commands::host::version(&lxc).await,
            Commands::Checkconfig => commands::host::checkconfig(&lxc, format).await,
            Commands::Describe => commands::host::describe(&lxc).await,
            Commands::Info { name } => commands::container::info(&lxc, &name, format).await,
            Commands::Start { name } => {
                commands::container::apply(&lxc, &name, commands::container::Action::Start).await
            }
            Commands::Stop { name } => {
                commands::container::apply(&lxc, &name, commands::container::Action::Stop).await
            }
            Commands::Freeze { name } => {
                commands::container::apply(&lxc, &name, commands::container::Action::Freeze).await
            }
            Commands::Unfreeze { name } => {
                commands::container::apply(&lxc, &name, commands::container::Action::Unfreeze)
                    .await
            }
            Commands::Exec { subcommand, args } => {
                commands::exec::run(&lxc, &subcommand, args).await
            }
        }
    })
}
