// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Four-component version numbers (major.minor.build.revision)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The component of a [`Version`] that a version range advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum VersionComponent {
    /// First component
    Major,
    /// Second component
    Minor,
    /// Third component
    #[default]
    Build,
    /// Fourth component
    Revision,
}

impl VersionComponent {
    /// All components, most significant first
    pub const ALL: [Self; 4] = [Self::Major, Self::Minor, Self::Build, Self::Revision];

    /// Lower-case name used in messages
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Build => "build",
            Self::Revision => "revision",
        }
    }
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionComponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "build" => Ok(Self::Build),
            "revision" => Ok(Self::Revision),
            other => Err(Error::invalid_argument(format!(
                "Unknown version component: '{other}'. Valid: major, minor, build, revision"
            ))),
        }
    }
}

/// A version number with four ordered components.
///
/// Ordering is lexicographic: major first, revision last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Build number
    pub build: u32,
    /// Revision number
    pub revision: u32,
}

impl Version {
    /// Create a new version
    #[must_use]
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Get the value of a single component
    #[must_use]
    pub fn component(&self, component: VersionComponent) -> u32 {
        match component {
            VersionComponent::Major => self.major,
            VersionComponent::Minor => self.minor,
            VersionComponent::Build => self.build,
            VersionComponent::Revision => self.revision,
        }
    }

    /// Copy of this version with one component replaced
    #[must_use]
    pub fn with_component(mut self, component: VersionComponent, value: u32) -> Self {
        match component {
            VersionComponent::Major => self.major = value,
            VersionComponent::Minor => self.minor = value,
            VersionComponent::Build => self.build = value,
            VersionComponent::Revision => self.revision = value,
        }
        self
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.revision)
    }
}

impl FromStr for Version {
    type Err = Error;

    /// Parse "major.minor[.build[.revision]]"; missing trailing components are zero.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(Error::invalid_argument(format!(
                "Invalid version: '{s}' - expected major.minor[.build[.revision]]"
            )));
        }

        let mut components = [0u32; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::invalid_argument(format!(
                    "Invalid version: '{s}' - '{part}' is not a non-negative number"
                )));
            }
            *slot = part.parse().map_err(|_| {
                Error::invalid_argument(format!("Invalid version: '{s}' - '{part}' is out of range"))
            })?;
        }

        let [major, minor, build, revision] = components;
        Ok(Self::new(major, minor, build, revision))
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

/// Format a version with an optional pre-release suffix.
///
/// The `-suffix` segment is left out entirely when the suffix is empty.
#[must_use]
pub fn semantic_version(version: &Version, special_version: &str) -> String {
    if special_version.is_empty() {
        version.to_string()
    } else {
        format!("{version}-{special_version}")
    }
}

/// Split a semantic version string into its numeric part and suffix
pub fn parse_semantic_version(semantic_version: &str) -> Result<(Version, String)> {
    let parts: Vec<&str> = semantic_version.trim().split('-').collect();
    if parts.len() > 2 {
        return Err(Error::invalid_argument(format!(
            "Invalid semantic version: '{semantic_version}'"
        )));
    }

    let version: Version = parts[0].parse()?;
    let special_version = parts.get(1).map(|s| (*s).to_string()).unwrap_or_default();

    Ok((version, special_version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_components() {
        let v: Version = "1.2.3.4".parse().unwrap();
        assert_eq!(v, Version::new(1, 2, 3, 4));
    }

    #[test]
    fn test_parse_short_forms_fill_zero() {
        assert_eq!("1.5".parse::<Version>().unwrap(), Version::new(1, 5, 0, 0));
        assert_eq!(" 1.5.9 ".parse::<Version>().unwrap(), Version::new(1, 5, 9, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "1", "1.2.3.4.5", "1.x", "1.-2", "1..2", "v1.2"] {
            let err = input.parse::<Version>().unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "{input} should fail");
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!("1.99999999999".parse::<Version>().is_err());
    }

    #[test]
    fn test_display_always_four_components() {
        assert_eq!(Version::new(1, 0, 0, 0).to_string(), "1.0.0.0");
        assert_eq!("2.1".parse::<Version>().unwrap().to_string(), "2.1.0.0");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(Version::new(1, 0, 9999, 0) < Version::new(1, 1, 0, 0));
        assert!(Version::new(2, 0, 0, 0) > Version::new(1, 9, 9, 9));
        assert!(Version::new(1, 0, 0, 1) > Version::new(1, 0, 0, 0));
    }

    #[test]
    fn test_component_access() {
        let v = Version::new(1, 2, 3, 4);
        assert_eq!(v.component(VersionComponent::Minor), 2);
        assert_eq!(v.with_component(VersionComponent::Build, 7), Version::new(1, 2, 7, 4));
    }

    #[test]
    fn test_semantic_version_with_suffix() {
        assert_eq!(semantic_version(&Version::new(1, 2, 3, 4), "beta"), "1.2.3.4-beta");
    }

    #[test]
    fn test_semantic_version_without_suffix_has_no_hyphen() {
        assert_eq!(semantic_version(&Version::new(1, 2, 3, 4), ""), "1.2.3.4");
    }

    #[test]
    fn test_parse_semantic_version() {
        let (v, special) = parse_semantic_version("1.0.5.0-develop").unwrap();
        assert_eq!(v, Version::new(1, 0, 5, 0));
        assert_eq!(special, "develop");

        let (v, special) = parse_semantic_version("1.0.5.0").unwrap();
        assert_eq!(v, Version::new(1, 0, 5, 0));
        assert!(special.is_empty());

        assert!(parse_semantic_version("1.0.0.0-a-b").is_err());
    }

    #[test]
    fn test_component_from_str_case_insensitive() {
        assert_eq!("Build".parse::<VersionComponent>().unwrap(), VersionComponent::Build);
        assert_eq!("REVISION".parse::<VersionComponent>().unwrap(), VersionComponent::Revision);
        assert!("patch".parse::<VersionComponent>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Version::new(1, 0, 2, 0)).unwrap();
        assert_eq!(json, "\"1.0.2.0\"");

        let back: Version = serde_json::from_str("\"3.4\"").unwrap();
        assert_eq!(back, Version::new(3, 4, 0, 0));

        assert!(serde_json::from_str::<Version>("\"nope\"").is_err());
    }

    #[test]
    fn test_component_serializes_by_name() {
        assert_eq!(serde_json::to_string(&VersionComponent::Build).unwrap(), "\"Build\"");
    }
}
