//! Detection of the installed LXC release and the output format it implies
//!
//! The `lxc-*` tools changed their output between releases: 0.7 and 0.8 print a
//! `CONTAINER` header over `lxc-ps` and one name per line from `lxc-ls`, while later
//! releases print multi-column listings. A [`VersionProfile`] is resolved once per client
//! and every parser is pinned to it.

use lxc_runner::{Command, Runner};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Releases with a captured output format, matched exactly
const KNOWN_VERSIONS: &[(&str, ProfileKind)] = &[
    ("0.7.5", ProfileKind::Lxc07),
    ("0.8.0-rc1", ProfileKind::Lxc08),
];

/// Output format family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    /// LXC 0.7.x
    Lxc07,
    /// LXC 0.8.x
    Lxc08,
    /// Unknown or newer releases, parsed with whitespace heuristics
    Generic,
}

impl ProfileKind {
    /// Pick the profile for a version token: exact match first, then the `major.minor` family
    pub fn for_version(version: &str) -> Self {
        if let Some((_, kind)) = KNOWN_VERSIONS.iter().find(|(known, _)| *known == version) {
            return *kind;
        }

        let mut parts = version.split(|c: char| c == '.' || c == '-');
        match (parts.next(), parts.next()) {
            (Some("0"), Some("7")) => ProfileKind::Lxc07,
            (Some("0"), Some("8")) => ProfileKind::Lxc08,
            _ => ProfileKind::Generic,
        }
    }

    /// Whether output carries fixed headers the parsers can rely on
    pub fn is_legacy(&self) -> bool {
        matches!(self, ProfileKind::Lxc07 | ProfileKind::Lxc08)
    }

    /// Short name used in logs and `describe()`
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Lxc07 => "lxc-0.7",
            ProfileKind::Lxc08 => "lxc-0.8",
            ProfileKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved version of the toolset and the parsing rules it selects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionProfile {
    kind: ProfileKind,
    version: String,
}

impl VersionProfile {
    /// Build a profile for an already known version token
    pub fn from_version(version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            kind: ProfileKind::for_version(&version),
            version,
        }
    }

    /// The parsing rule family
    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    /// The version token exactly as the toolset reported it
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Extract the version token from version probe output.
///
/// The first non-blank line is used; a leading `label:` such as `lxc version:` is dropped.
pub fn parse_version(output: &str) -> Result<String> {
    let line = output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| Error::version_parse(output))?;

    let value = match line.split_once(':') {
        Some((label, rest)) if !label.trim_start().starts_with(|c: char| c.is_ascii_digit()) => {
            rest.trim()
        }
        _ => line,
    };

    match value.split_whitespace().next() {
        Some(token) if token.starts_with(|c: char| c.is_ascii_digit()) => Ok(token.to_string()),
        _ => Err(Error::version_parse(output)),
    }
}

/// Probe the toolset through `runner` and pick the matching profile.
///
/// `lxc-version` was dropped in later releases; when it is missing `lxc-ls --version` is
/// asked instead.
pub async fn resolve(runner: &dyn Runner) -> Result<VersionProfile> {
    let output = match runner.execute(&Command::new("lxc-version")).await {
        Ok(output) => output,
        Err(e) if e.is_command_not_found() => {
            warn!(error = %e, "lxc-version unavailable, falling back to lxc-ls --version");
            runner
                .execute(&Command::builder("lxc-ls").arg("--version").build())
                .await?
        }
        Err(e) => return Err(e.into()),
    };

    let profile = VersionProfile::from_version(parse_version(&output)?);
    debug!(version = %profile.version(), profile = %profile.kind(), "resolved LXC version");
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lxc_runner::backends::fake::FakeRunner;

    #[test]
    fn test_parse_labelled_version() {
        assert_eq!(parse_version("lxc version: 0.7.5\n").unwrap(), "0.7.5");
        assert_eq!(parse_version("\n  lxc version:   0.8.0-rc1  \n").unwrap(), "0.8.0-rc1");
    }

    #[test]
    fn test_parse_bare_version() {
        assert_eq!(parse_version("1.0.8\n").unwrap(), "1.0.8");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_version(""), Err(Error::VersionParse { .. })));
        assert!(matches!(parse_version("  \n\n"), Err(Error::VersionParse { .. })));
        assert!(matches!(
            parse_version("usage: lxc-version\n"),
            Err(Error::VersionParse { .. })
        ));
        assert!(matches!(parse_version("lxc version:\n"), Err(Error::VersionParse { .. })));
    }

    #[test]
    fn test_profile_selection() {
        assert_eq!(ProfileKind::for_version("0.7.5"), ProfileKind::Lxc07);
        assert_eq!(ProfileKind::for_version("0.8.0-rc1"), ProfileKind::Lxc08);
        assert_eq!(ProfileKind::for_version("0.7.4.2"), ProfileKind::Lxc07);
        assert_eq!(ProfileKind::for_version("0.8.0"), ProfileKind::Lxc08);
        assert_eq!(ProfileKind::for_version("0.9.0"), ProfileKind::Generic);
        assert_eq!(ProfileKind::for_version("5.0.3"), ProfileKind::Generic);
    }

    #[test]
    fn test_profile_keeps_token_verbatim() {
        let profile = VersionProfile::from_version("0.8.0-rc1");
        assert_eq!(profile.version(), "0.8.0-rc1");
        assert_eq!(profile.kind(), ProfileKind::Lxc08);
        assert!(profile.kind().is_legacy());
    }

    #[smol_potat::test]
    async fn test_resolve_from_lxc_version() {
        let runner = FakeRunner::new().with_stdout("lxc-version", "lxc version: 0.7.5\n");
        let profile = resolve(&runner).await.unwrap();

        assert_eq!(profile.version(), "0.7.5");
        assert_eq!(profile.kind(), ProfileKind::Lxc07);
        assert_eq!(runner.commands(), vec!["lxc-version".to_string()]);
    }

    #[smol_potat::test]
    async fn test_resolve_falls_back_when_probe_missing() {
        let runner = FakeRunner::new().with_stdout("lxc-ls --version", "1.0.8\n");
        let profile = resolve(&runner).await.unwrap();

        assert_eq!(profile.version(), "1.0.8");
        assert_eq!(profile.kind(), ProfileKind::Generic);
        assert_eq!(
            runner.commands(),
            vec!["lxc-version".to_string(), "lxc-ls --version".to_string()]
        );
    }

    #[smol_potat::test]
    async fn test_resolve_empty_output_fails() {
        let runner = FakeRunner::new().with_stdout("lxc-version", "");
        assert!(matches!(
            resolve(&runner).await,
            Err(Error::VersionParse { .. })
        ));
    }
}
