//! `lxc-info -n NAME` output

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::significant_lines;
use crate::error::{Error, Result};

/// Lifecycle state reported by the toolset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContainerState {
    /// Not running
    Stopped,
    /// Booting
    Starting,
    /// Up
    Running,
    /// Shutting down
    Stopping,
    /// Failed while starting
    Aborting,
    /// Being frozen
    Freezing,
    /// All processes suspended
    Frozen,
    /// Resumed after a freeze
    Thawed,
    /// A state this client does not know about
    Unknown(String),
}

impl ContainerState {
    /// The spelling `lxc-wait -s` and `lxc-info` use
    pub fn as_str(&self) -> &str {
        match self {
            ContainerState::Stopped => "STOPPED",
            ContainerState::Starting => "STARTING",
            ContainerState::Running => "RUNNING",
            ContainerState::Stopping => "STOPPING",
            ContainerState::Aborting => "ABORTING",
            ContainerState::Freezing => "FREEZING",
            ContainerState::Frozen => "FROZEN",
            ContainerState::Thawed => "THAWED",
            ContainerState::Unknown(raw) => raw,
        }
    }
}

impl FromStr for ContainerState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "STOPPED" => ContainerState::Stopped,
            "STARTING" => ContainerState::Starting,
            "RUNNING" => ContainerState::Running,
            "STOPPING" => ContainerState::Stopping,
            "ABORTING" => ContainerState::Aborting,
            "FREEZING" => ContainerState::Freezing,
            "FROZEN" => ContainerState::Frozen,
            "THAWED" => ContainerState::Thawed,
            _ => ContainerState::Unknown(s.trim().to_string()),
        })
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What `lxc-info` reports about one container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    /// Container name
    pub name: String,
    /// Current state
    pub state: ContainerState,
    /// Init pid, `None` when the container is not running
    pub pid: Option<u32>,
    /// Every `key: value` line in output order, keys lower-cased
    pub fields: Vec<(String, String)>,
}

/// Parse `lxc-info` output for container `name`.
///
/// Legacy releases print `state:` and `pid:`, later ones `State:` and `PID:` among other
/// fields; keys are compared case-insensitively. A pid of `-1` means not running.
pub fn parse_info(name: &str, output: &str) -> Result<ContainerInfo> {
    let fields: Vec<(String, String)> = significant_lines(output)
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let lookup = |key: &str| {
        fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let state = match lookup("state") {
        Some(value) if !value.is_empty() => value
            .parse::<ContainerState>()
            .unwrap_or_else(|never| match never {}),
        _ => {
            return Err(Error::output_parse(
                format!("lxc-info -n {}", name),
                "no state line",
            ));
        }
    };
    let pid = lookup("pid").and_then(|value| value.parse::<u32>().ok());

    Ok(ContainerInfo {
        name: name.to_string(),
        state,
        pid,
        fields,
    })
}
