//! Dotted version strings and specifier matching.

use std::cmp::Ordering;
use std::fmt;

/// Keyword specifier that matches every version.
pub const LATEST: &str = "latest";

/// A single component of a dotted version.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Component {
    Number(u64),
    Text(String),
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Greater,
            (Self::Text(_), Self::Number(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A concrete version such as `1.0.1`.
///
/// Ordering is component-wise: numeric components compare numerically,
/// text components lexically, and a numeric component sorts above text.
/// When one version is a prefix of the other, the shorter one is lower.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
    components: Vec<Component>,
}

impl Version {
    /// Parse a version string. Any non-empty string is accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let components = raw
            .split('.')
            .map(|part| match part.parse::<u64>() {
                Ok(n) => Component::Number(n),
                Err(_) => Component::Text(part.to_string()),
            })
            .collect();
        Some(Self {
            raw: raw.to_string(),
            components,
        })
    }

    /// The version exactly as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check whether this version satisfies a specifier.
    ///
    /// `latest` matches everything. Otherwise the version must equal the
    /// specifier or extend it with further dotted components, so `1` matches
    /// `1.0.1` but not `10.0.0`.
    pub fn matches(&self, specifier: &str) -> bool {
        let specifier = specifier.trim();
        if specifier == LATEST {
            return true;
        }
        self.raw == specifier
            || self
                .raw
                .strip_prefix(specifier)
                .is_some_and(|rest| rest.starts_with('.'))
    }

    /// Compute the specifier that tracks this version after a bump.
    ///
    /// The new specifier is this version's leading component, whatever the
    /// precision of `previous`. `latest` is kept as-is.
    pub fn bumped_specifier(&self, previous: &str) -> String {
        if previous.trim() == LATEST {
            return LATEST.to_string();
        }
        self.raw
            .split('.')
            .next()
            .unwrap_or(&self.raw)
            .to_string()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components
            .cmp(&other.components)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn orders_patch_minor_and_major() {
        assert!(v("1.0.1") > v("1.0.0"));
        assert!(v("1.1.0") > v("1.0.1"));
        assert!(v("3.1.0") > v("1.1.0"));
    }

    #[test]
    fn orders_numerically_not_lexically() {
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("10") > v("9.9.9"));
    }

    #[test]
    fn shorter_prefix_sorts_lower() {
        assert!(v("1.0") < v("1.0.0"));
    }

    #[test]
    fn numeric_component_beats_text() {
        assert!(v("1.0.0") > v("1.0.rc1"));
    }

    #[test]
    fn sorting_a_list() {
        let mut versions = vec![v("1.1.0"), v("1.0.0"), v("3.1.0"), v("1.0.1")];
        versions.sort();
        let raw: Vec<_> = versions.iter().map(Version::as_str).collect();
        assert_eq!(raw, ["1.0.0", "1.0.1", "1.1.0", "3.1.0"]);
    }

    #[test]
    fn matches_dotted_prefix() {
        assert!(v("1.0.1").matches("1"));
        assert!(v("1.0.1").matches("1.0"));
        assert!(v("1.0.1").matches("1.0.1"));
        assert!(!v("10.0.0").matches("1"));
        assert!(!v("1.0.1").matches("1.0.10"));
        assert!(!v("2.0.0").matches("1"));
    }

    #[test]
    fn latest_matches_everything() {
        assert!(v("0.0.1").matches("latest"));
        assert!(v("3.1.0").matches(" latest "));
    }

    #[test]
    fn bumped_specifier_is_leading_component() {
        assert_eq!(v("3.1.0").bumped_specifier("1"), "3");
        assert_eq!(v("3.1.0").bumped_specifier("1.0"), "3");
        assert_eq!(v("3.1.0").bumped_specifier("1.0.0"), "3");
        assert_eq!(v("3").bumped_specifier("1.0.0"), "3");
        assert_eq!(v("3.1.0").bumped_specifier("latest"), "latest");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(Version::parse("").is_none());
        assert!(Version::parse("   ").is_none());
    }

    #[test]
    fn display_round_trips_raw_text() {
        assert_eq!(v("1.2.3-beta").to_string(), "1.2.3-beta");
    }
}
