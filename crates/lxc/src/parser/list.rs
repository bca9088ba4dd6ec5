//! `lxc-ls` output

use super::significant_lines;
use crate::version::ProfileKind;

/// Container names in output order.
///
/// Legacy releases print one name per line; later ones lay names out in columns, so the
/// generic profile splits on any whitespace. Repeated names are kept.
pub fn parse_list(output: &str, profile: ProfileKind) -> Vec<String> {
    if profile.is_legacy() {
        significant_lines(output)
            .map(|line| line.trim().to_string())
            .collect()
    } else {
        output.split_whitespace().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ProfileKind; 3] = [ProfileKind::Lxc07, ProfileKind::Lxc08, ProfileKind::Generic];

    #[test]
    fn test_one_name_per_line() {
        for profile in ALL {
            assert_eq!(
                parse_list("devop-test-1\nabc-other-name\n", profile),
                vec!["devop-test-1", "abc-other-name"]
            );
        }
    }

    #[test]
    fn test_empty_output_is_empty_list() {
        for profile in ALL {
            assert!(parse_list("", profile).is_empty());
            assert!(parse_list("\n", profile).is_empty());
            assert!(parse_list("  \n\t\n", profile).is_empty());
        }
    }

    #[test]
    fn test_generic_columns() {
        assert_eq!(
            parse_list("web   db\ncache\n", ProfileKind::Generic),
            vec!["web", "db", "cache"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(
            parse_list("web\nweb\n", ProfileKind::Lxc07),
            vec!["web", "web"]
        );
    }
}
