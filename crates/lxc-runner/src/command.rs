//! Command type for building executable commands

use async_process::Command as AsyncCommand;
use std::collections::BTreeMap;
use std::fmt;

/// A command to be executed
///
/// This is a builder for creating commands that can be converted to `async_process::Command`
/// when needed, or rendered into a single shell-safe line for remote execution.
/// Unlike `AsyncCommand`, this type is `Clone` and can be reused multiple times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The program to execute
    program: String,
    /// The arguments to pass to the program
    args: Vec<String>,
    /// Environment variables to set
    env: BTreeMap<String, String>,
}

impl Command {
    /// Create a new command for the given program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Split a command line on whitespace into program and arguments.
    ///
    /// No quoting rules apply; returns `None` for a blank line.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let mut cmd = Command::new(parts.next()?);
        cmd.args(parts);
        Some(cmd)
    }

    /// Add an argument to the command
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    /// Set an environment variable
    pub fn env(&mut self, key: impl Into<String>, val: impl Into<String>) -> &mut Self {
        self.env.insert(key.into(), val.into());
        self
    }

    /// Get the program name
    pub fn get_program(&self) -> &str {
        &self.program
    }

    /// Get the arguments
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the environment variables
    pub fn get_envs(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Render the program and its arguments as one line for a POSIX shell.
    ///
    /// Environment variables are not part of the rendered line.
    pub fn to_shell_string(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| shell_escape(part))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Prepare this command for execution by converting to an `async_process::Command`
    pub fn prepare(&self) -> AsyncCommand {
        let mut cmd = AsyncCommand::new(&self.program);
        cmd.args(&self.args);
        for (key, val) in &self.env {
            cmd.env(key, val);
        }
        cmd
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

/// Builder pattern helper
impl Command {
    /// Create a builder for this command (for chaining)
    pub fn builder(program: impl Into<String>) -> CommandBuilder {
        CommandBuilder(Command::new(program))
    }
}

/// Builder wrapper for more ergonomic command construction
pub struct CommandBuilder(Command);

impl CommandBuilder {
    /// Add an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.0.arg(arg);
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.args(args);
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.0.env(key, val);
        self
    }

    /// Build the command
    pub fn build(self) -> Command {
        self.0
    }
}

/// Escape a string for safe inclusion in a shell command
pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.contains(|c: char| c.is_whitespace() || "\"'\\$`!*?<>|&;()[]{}#~".contains(c)) {
        // Use single quotes and escape any single quotes in the string
        format!("'{}'", s.replace('\'', "'\"'\"'"))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_creation() {
        let cmd = Command::new("lxc-ls");
        assert_eq!(cmd.get_program(), "lxc-ls");
        assert_eq!(cmd.get_args().len(), 0);
    }

    #[test]
    fn test_command_with_args() {
        let mut cmd = Command::new("lxc-start");
        cmd.arg("-d").arg("-n").arg("web");

        assert_eq!(cmd.get_args(), ["-d", "-n", "web"]);
        assert_eq!(cmd.to_shell_string(), "lxc-start -d -n web");
    }

    #[test]
    fn test_command_builder() {
        let cmd = Command::builder("lxc-attach")
            .arg("-n")
            .arg("web")
            .env("LANG", "C")
            .build();

        assert_eq!(cmd.get_program(), "lxc-attach");
        assert_eq!(cmd.get_args().len(), 2);
        assert_eq!(cmd.get_envs().get("LANG").map(String::as_str), Some("C"));
    }

    #[test]
    fn test_parse_line() {
        let cmd = Command::parse_line("  lxc-ps   --lxc ").unwrap();
        assert_eq!(cmd.get_program(), "lxc-ps");
        assert_eq!(cmd.get_args(), ["--lxc"]);

        assert!(Command::parse_line("   ").is_none());
    }

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape("simple"), "simple");
        assert_eq!(shell_escape("with space"), "'with space'");
        assert_eq!(shell_escape("with'quote"), "'with'\"'\"'quote'");
        assert_eq!(shell_escape("$variable"), "'$variable'");
        assert_eq!(shell_escape("path/to/file"), "path/to/file");
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn test_shell_string_quotes_arguments() {
        let cmd = Command::builder("lxc-attach")
            .args(["-n", "web", "--", "sh", "-c", "echo $HOME"])
            .build();
        assert_eq!(
            cmd.to_shell_string(),
            "lxc-attach -n web -- sh -c 'echo $HOME'"
        );
        assert_eq!(cmd.to_string(), cmd.to_shell_string());
    }
}
