use super::{OutputFormat, print_json};
use anyhow::{Context, Result};
use lxc::Lxc;

pub async fn version(lxc: &Lxc) -> Result<()> {
    let version = lxc
        .tool_version()
        .await
        .context("Failed to determine the LXC version")?;
    println!("{}", version);
    Ok(())
}

pub async fn checkconfig(lxc: &Lxc, format: OutputFormat) -> Result<()> {
    let lines = lxc
        .checkconfig()
        .await
        .context("Failed to run lxc-checkconfig")?;

    match format {
        OutputFormat::Json => print_json(&lines)?,
        OutputFormat::Table => {
            for line in &lines {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

pub async fn describe(lxc: &Lxc) -> Result<()> {
    println!("{}", lxc.describe().await?);
    println!("Config: {}", lxc.config().filename().display());
    Ok(())
}
