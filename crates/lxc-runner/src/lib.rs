//! Runtime-agnostic command runners for the LXC toolchain
//!
//! This crate provides a unified interface for executing commands across different
//! contexts: local processes, remote SSH hosts, sudo-wrapped execution and scripted
//! fakes for tests.

#![warn(missing_docs)]

pub mod backends;
pub mod command;
pub mod config;
pub mod error;
pub mod output;
pub mod runner;

pub use command::Command;
pub use config::RunnerConfig;
pub use error::{Error, Result};
pub use output::{CommandOutput, ExitStatus};
pub use runner::Runner;
