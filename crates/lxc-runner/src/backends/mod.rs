//! Backend implementations for different execution contexts
//!
//! This module provides built-in runners for the contexts the LXC client needs.
//! Users can also implement their own runners by implementing the [`Runner`](crate::runner::Runner) trait.
//!
//! # Example: Custom Runner
//!
//! ```ignore
//! use lxc_runner::{Command, CommandOutput, Runner, Result};
//! use async_trait::async_trait;
//!
//! struct ContainerShellRunner {
//!     // backend-specific fields
//! }
//!
//! #[async_trait]
//! impl Runner for ContainerShellRunner {
//!     async fn run(&self, command: &Command) -> Result<CommandOutput> {
//!         // Custom implementation
//!     }
//!
//!     fn description(&self) -> String {
//!         "container-shell".to_string()
//!     }
//! }
//! ```

pub mod fake;
pub mod local;
pub mod ssh;
pub mod sudo;

pub use fake::FakeRunner;
pub use local::LocalRunner;
pub use ssh::{HostKeyPolicy, SshAuth, SshConfig, SshRunner};
pub use sudo::SudoRunner;
