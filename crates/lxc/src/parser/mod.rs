//! Parsers turning raw `lxc-*` output into structured values
//!
//! Every parser treats blank and whitespace-only lines as noise, so empty output always
//! maps to an empty result.

mod info;
mod list;
mod process;

pub use info::{ContainerInfo, ContainerState, parse_info};
pub use list::parse_list;
pub use process::{ProcessEntry, parse_process_table};

/// Non-blank lines of `output`, untouched
pub(crate) fn significant_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter(|line| !line.trim().is_empty())
}

/// Lines of `lxc-checkconfig` output in order, verbatim.
///
/// Each line already names a kernel feature and its status; section headings and notes are
/// kept because their position groups the features.
pub fn parse_checkconfig(output: &str) -> Vec<String> {
    significant_lines(output)
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}
