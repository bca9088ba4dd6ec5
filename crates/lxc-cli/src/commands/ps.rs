use super::{OutputFormat, print_json};
use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};
use lxc::{Lxc, ProcessEntry};

pub async fn run(lxc: &Lxc, name: Option<&str>, format: OutputFormat) -> Result<()> {
    let rows = match name {
        Some(name) => lxc.container(name).processes().await,
        None => lxc.process_table().await,
    }
    .context("Failed to read the process table")?;

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            display_table(&rows);
            Ok(())
        }
    }
}

fn display_table(rows: &[ProcessEntry]) {
    let mut table = Table::new();
    table.set_header(vec!["CONTAINER", "PID", "TTY", "TIME", "CMD"]);

    for row in rows {
        if !row.is_well_formed() {
            // Shown as printed so nothing the tool reported is hidden
            table.add_row(vec![
                Cell::new("?").fg(Color::Yellow),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new(&row.raw).fg(Color::Yellow),
            ]);
            continue;
        }

        let container = match &row.container {
            Some(name) => Cell::new(name),
            None => Cell::new("(host)").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            container,
            Cell::new(row.pid.map(|p| p.to_string()).unwrap_or_default()),
            Cell::new(row.tty.as_deref().unwrap_or("-")),
            Cell::new(row.time.as_deref().unwrap_or("-")),
            Cell::new(&row.command),
        ]);
    }

    println!("{}", table);
}
