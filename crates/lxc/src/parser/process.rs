//! `lxc-ps --lxc` output

use serde::Serialize;
use tracing::warn;

use super::significant_lines;
use crate::version::ProfileKind;

/// Columns assumed when a legacy listing arrives without its header
const DEFAULT_COLUMNS: [&str; 5] = ["CONTAINER", "PID", "TTY", "TIME", "CMD"];

/// One row of the process table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessEntry {
    /// Container the process runs in, `None` for host processes
    pub container: Option<String>,
    /// Process id, `None` when the row did not match the column layout
    pub pid: Option<u32>,
    /// Controlling terminal
    pub tty: Option<String>,
    /// Accumulated CPU time
    pub time: Option<String>,
    /// Command line, or the whole row for unparsed rows
    pub command: String,
    /// The row as printed, trimmed
    pub raw: String,
}

impl ProcessEntry {
    /// Keep a row that did not fit the expected columns
    fn unparsed(line: &str) -> Self {
        let line = line.trim();
        Self {
            container: None,
            pid: None,
            tty: None,
            time: None,
            command: line.to_string(),
            raw: line.to_string(),
        }
    }

    /// Whether the row matched the column layout of its profile
    pub fn is_well_formed(&self) -> bool {
        self.pid.is_some()
    }
}

/// Rows of the process table in output order.
///
/// Legacy releases and any output carrying a `CONTAINER` header are parsed by column;
/// headerless output from other releases falls back to the pid heuristic. Header lines are
/// consumed. Rows that do not fit the layout are kept as unparsed entries.
pub fn parse_process_table(output: &str, profile: ProfileKind) -> Vec<ProcessEntry> {
    let entries = if profile.is_legacy() || has_container_header(output) {
        parse_headered(output)
    } else {
        parse_heuristic(output)
    };

    let unparsed = entries.iter().filter(|e| !e.is_well_formed()).count();
    if unparsed > 0 {
        warn!(%profile, unparsed, "kept lxc-ps rows that did not match the column layout");
    }
    entries
}

fn has_container_header(output: &str) -> bool {
    significant_lines(output).any(|line| line.split_whitespace().next() == Some("CONTAINER"))
}

/// Legacy layout: a `CONTAINER PID TTY TIME CMD` header names the columns, host processes
/// leave the container column blank and the last column takes the rest of the line.
fn parse_headered(output: &str) -> Vec<ProcessEntry> {
    let mut columns: Vec<String> = DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut entries = Vec::new();

    for line in significant_lines(output) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&"CONTAINER") {
            columns = tokens.iter().map(|t| t.to_ascii_uppercase()).collect();
            continue;
        }

        let fields = if line.starts_with(char::is_whitespace) {
            &columns[1..]
        } else {
            &columns[..]
        };

        match row_from_columns(line, fields, &tokens) {
            Some(entry) => entries.push(entry),
            None => entries.push(ProcessEntry::unparsed(line)),
        }
    }

    entries
}

fn row_from_columns(line: &str, fields: &[String], tokens: &[&str]) -> Option<ProcessEntry> {
    if fields.is_empty() || tokens.len() < fields.len() {
        return None;
    }

    let mut entry = ProcessEntry::unparsed(line);
    let last = fields.len() - 1;
    for (i, column) in fields.iter().enumerate() {
        let value = if i == last {
            tokens[i..].join(" ")
        } else {
            tokens[i].to_string()
        };
        match column.as_str() {
            "CONTAINER" => entry.container = Some(value),
            "PID" => entry.pid = Some(value.parse().ok()?),
            "TTY" => entry.tty = Some(value),
            "TIME" => entry.time = Some(value),
            "CMD" | "COMMAND" => entry.command = value,
            _ => {}
        }
    }

    entry.pid.is_some().then_some(entry)
}

/// Headerless layouts: the first all-digit token is the pid, a single token before it names
/// the container, and `TTY TIME CMD` follow when the time column looks like one.
fn parse_heuristic(output: &str) -> Vec<ProcessEntry> {
    significant_lines(output)
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.first() {
                Some(&"CONTAINER") | Some(&"PID") => None,
                _ => Some(heuristic_row(line, &tokens).unwrap_or_else(|| ProcessEntry::unparsed(line))),
            }
        })
        .collect()
}

fn heuristic_row(line: &str, tokens: &[&str]) -> Option<ProcessEntry> {
    let pid_at = tokens
        .iter()
        .position(|t| t.chars().all(|c| c.is_ascii_digit()))?;
    let container = match pid_at {
        0 => None,
        1 => Some(tokens[0].to_string()),
        _ => return None,
    };
    let pid = tokens[pid_at].parse().ok()?;
    let rest = &tokens[pid_at + 1..];

    let mut entry = ProcessEntry::unparsed(line);
    entry.container = container;
    entry.pid = Some(pid);

    if rest.len() >= 3 && rest[1].contains(':') {
        entry.tty = Some(rest[0].to_string());
        entry.time = Some(rest[1].to_string());
        entry.command = rest[2..].join(" ");
    } else if !rest.is_empty() {
        entry.command = rest.join(" ");
    } else {
        return None;
    }

    Some(entry)
}
