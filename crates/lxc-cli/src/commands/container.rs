use super::{OutputFormat, print_json};
use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};
use lxc::{ContainerState, Lxc};
use tracing::info;

/// Lifecycle change requested from the command line
#[derive(Debug, Clone, Copy)]
pub enum Action {
    Start,
    Stop,
    Freeze,
    Unfreeze,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Freeze => "freeze",
            Action::Unfreeze => "unfreeze",
        }
    }
}

pub async fn info(lxc: &Lxc, name: &str, format: OutputFormat) -> Result<()> {
    let info = lxc
        .container(name)
        .info()
        .await
        .with_context(|| format!("Failed to get info for '{}'", name))?;

    if format == OutputFormat::Json {
        return print_json(&info);
    }

    let state_color = match info.state {
        ContainerState::Running => Color::Green,
        ContainerState::Stopped => Color::DarkGrey,
        ContainerState::Frozen | ContainerState::Freezing => Color::Cyan,
        ContainerState::Aborting | ContainerState::Unknown(_) => Color::Red,
        _ => Color::Yellow,
    };

    let mut table = Table::new();
    table.set_header(vec!["CONTAINER", "STATE", "PID"]);
    table.add_row(vec![
        Cell::new(&info.name),
        Cell::new(info.state.as_str()).fg(state_color),
        Cell::new(info.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())),
    ]);
    println!("{}", table);
    Ok(())
}

pub async fn apply(lxc: &Lxc, name: &str, action: Action) -> Result<()> {
    let container = lxc.container(name);
    let result = match action {
        Action::Start => container.start().await,
        Action::Stop => container.stop().await,
        Action::Freeze => container.freeze().await,
        Action::Unfreeze => container.unfreeze().await,
    };
    result.with_context(|| format!("Failed to {} '{}'", action.verb(), name))?;

    info!(container = name, action = action.verb(), "done");
    println!("✓ {} {}", action.verb(), name);
    Ok(())
}
