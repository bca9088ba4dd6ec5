use super::{OutputFormat, print_json};
use anyhow::{Context, Result};
use comfy_table::Table;
use lxc::Lxc;

pub async fn run(lxc: &Lxc, format: OutputFormat) -> Result<()> {
    let names = lxc.list().await.context("Failed to list containers")?;

    match format {
        OutputFormat::Json => print_json(&names)?,
        OutputFormat::Table => {
            if names.is_empty() {
                println!("No containers");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_header(vec!["CONTAINER"]);
            for name in &names {
                table.add_row(vec![name]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

/// Prints `true` or `false`; the exit status stays zero either way
pub async fn exists(lxc: &Lxc, name: &str) -> Result<()> {
    let exists = lxc
        .exists(name)
        .await
        .with_context(|| format!("Failed to look up container '{}'", name))?;
    println!("{}", exists);
    Ok(())
}
