//! # LXC
//!
//! Client for the `lxc-*` container toolchain on a local or remote host.
//!
//! Commands go through a [`Runner`](lxc_runner::Runner) (local process, SSH session, sudo
//! wrapper or a scripted fake) and their text output is parsed according to the
//! [`VersionProfile`] detected for the installed release.

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod container;
pub mod error;
pub mod parser;
pub mod settings;
pub mod version;

pub use client::{Lxc, LxcBuilder};
pub use config::Config;
pub use container::Container;
pub use error::{Error, Result};
pub use parser::{ContainerInfo, ContainerState, ProcessEntry};
pub use settings::Settings;
pub use version::{ProfileKind, VersionProfile};
