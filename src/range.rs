// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Version ranges - bounded intervals that hand out versions one at a time

use crate::error::{Error, Result};
use crate::version::{Version, VersionComponent};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;

/// An allocatable interval of versions with a cursor.
///
/// `next_version` is the value the next allocation will receive. Only the
/// component named by `increment_by` ever moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRange {
    /// Row id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Component advanced on each allocation
    pub increment_by: VersionComponent,
    /// First version in the range
    pub start_version: Version,
    /// Version the next allocation will receive
    pub next_version: Version,
    /// Upper bound
    pub end_version: Version,
}

impl VersionRange {
    /// Hand out the current `next_version` and advance the cursor.
    ///
    /// Fails without touching the cursor if advancing would push the
    /// incrementing component past the same component of `end_version`.
    pub fn get_and_increment(&mut self) -> Result<Version> {
        let allocated = self.next_version;
        let component = self.increment_by;

        let current = allocated.component(component);
        let end = self.end_version.component(component);
        let attempted = u64::from(current) + 1;

        if attempted > u64::from(end) {
            return Err(Error::RangeExhausted {
                range: self.name.clone(),
                component,
                attempted,
                end,
            });
        }

        // attempted <= end <= u32::MAX
        self.next_version = allocated.with_component(component, current + 1);

        Ok(allocated)
    }

    /// Number of allocations left before the range is exhausted
    #[must_use]
    pub fn remaining(&self) -> u32 {
        let component = self.increment_by;
        self.end_version
            .component(component)
            .saturating_sub(self.next_version.component(component))
    }

    /// Check `start <= next <= end` on every component.
    ///
    /// Allocation only ever raises the incrementing component up to its end
    /// bound, so a range that passes here keeps passing after any number of
    /// allocations.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_argument("Version range must have a name."));
        }
        for component in VersionComponent::ALL {
            let start = self.start_version.component(component);
            let next = self.next_version.component(component);
            let end = self.end_version.component(component);
            if start > next {
                return Err(Error::invalid_argument(format!(
                    "Version range '{}': next version {} is before start version {} ({component}).",
                    self.name, self.next_version, self.start_version
                )));
            }
            if next > end {
                return Err(Error::invalid_argument(format!(
                    "Version range '{}': next version {} is after end version {} ({component}).",
                    self.name, self.next_version, self.end_version
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}-{}, Next={})",
            self.name, self.start_version, self.end_version, self.next_version
        )
    }
}

pub(crate) fn version_columns(row: &SqliteRow, prefix: &str) -> sqlx::Result<Version> {
    Ok(Version::new(
        row.try_get(format!("{prefix}Major").as_str())?,
        row.try_get(format!("{prefix}Minor").as_str())?,
        row.try_get(format!("{prefix}Build").as_str())?,
        row.try_get(format!("{prefix}Revision").as_str())?,
    ))
}

impl<'r> FromRow<'r, SqliteRow> for VersionRange {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("Id")?,
            name: row.try_get("Name")?,
            increment_by: row.try_get("IncrementBy")?,
            start_version: version_columns(row, "StartVersion")?,
            next_version: version_columns(row, "NextVersion")?,
            end_version: version_columns(row, "EndVersion")?,
        })
    }
}

/// Fields supplied when creating or editing a version range
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRangeEdit {
    /// Display name
    pub name: String,
    /// Component advanced on each allocation (defaults to build)
    #[serde(default)]
    pub increment_by: VersionComponent,
    /// First version in the range
    pub start_version: Version,
    /// Cursor; defaults to `start_version`
    #[serde(default)]
    pub next_version: Option<Version>,
    /// Upper bound
    pub end_version: Version,
}

impl VersionRangeEdit {
    /// Build the range this edit describes, validated
    pub fn into_range(self, id: i64) -> Result<VersionRange> {
        let range = VersionRange {
            id,
            name: self.name.trim().to_string(),
            increment_by: self.increment_by,
            start_version: self.start_version,
            next_version: self.next_version.unwrap_or(self.start_version),
            end_version: self.end_version,
        };
        range.validate()?;
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_range(start: &str, next: &str, end: &str, increment_by: VersionComponent) -> VersionRange {
        VersionRange {
            id: 1,
            name: "Product1".into(),
            increment_by,
            start_version: start.parse().unwrap(),
            next_version: next.parse().unwrap(),
            end_version: end.parse().unwrap(),
        }
    }

    #[test]
    fn test_get_and_increment_returns_current_then_bumps() {
        let mut range = make_range("1.0.0.0", "1.0.0.0", "1.0.9999.0", VersionComponent::Build);

        assert_eq!(range.get_and_increment().unwrap(), Version::new(1, 0, 0, 0));
        assert_eq!(range.next_version, Version::new(1, 0, 1, 0));
        assert_eq!(range.get_and_increment().unwrap(), Version::new(1, 0, 1, 0));
        assert_eq!(range.next_version, Version::new(1, 0, 2, 0));
    }

    #[test]
    fn test_only_selected_component_moves() {
        let mut range = make_range("1.2.3.4", "1.2.3.4", "9.9.9.9", VersionComponent::Minor);

        range.get_and_increment().unwrap();
        assert_eq!(range.next_version, Version::new(1, 3, 3, 4));

        range.increment_by = VersionComponent::Revision;
        range.get_and_increment().unwrap();
        assert_eq!(range.next_version, Version::new(1, 3, 3, 5));

        range.increment_by = VersionComponent::Major;
        range.get_and_increment().unwrap();
        assert_eq!(range.next_version, Version::new(2, 3, 3, 5));
    }

    #[test]
    fn test_exhausted_range_fails_without_mutation() {
        let mut range = make_range("1.0.0.0", "1.0.1.0", "1.0.1.0", VersionComponent::Build);

        let err = range.get_and_increment().unwrap_err();
        match err {
            Error::RangeExhausted { range: name, component, attempted, end } => {
                assert_eq!(name, "Product1");
                assert_eq!(component, VersionComponent::Build);
                assert_eq!(attempted, 2);
                assert_eq!(end, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(range.next_version, Version::new(1, 0, 1, 0));
    }

    #[test]
    fn test_last_slot_before_end_is_allocatable() {
        let mut range = make_range("1.0.0.0", "1.0.0.0", "1.0.1.0", VersionComponent::Build);

        assert_eq!(range.remaining(), 1);
        assert_eq!(range.get_and_increment().unwrap(), Version::new(1, 0, 0, 0));
        assert_eq!(range.remaining(), 0);
        assert!(range.get_and_increment().is_err());
    }

    #[test]
    fn test_component_at_u32_max_is_exhausted() {
        let mut range = VersionRange {
            id: 1,
            name: "max".into(),
            increment_by: VersionComponent::Revision,
            start_version: Version::new(0, 0, 0, 0),
            next_version: Version::new(0, 0, 0, u32::MAX),
            end_version: Version::new(0, 0, 0, u32::MAX),
        };
        assert!(matches!(
            range.get_and_increment(),
            Err(Error::RangeExhausted { attempted, .. }) if attempted == u64::from(u32::MAX) + 1
        ));
    }

    #[test]
    fn test_validate_invariant() {
        assert!(make_range("1.0.0.0", "1.0.5.0", "1.0.9.0", VersionComponent::Build).validate().is_ok());
        assert!(make_range("1.0.5.0", "1.0.0.0", "1.0.9.0", VersionComponent::Build).validate().is_err());
        assert!(make_range("1.0.0.0", "1.1.0.0", "1.0.9.0", VersionComponent::Build).validate().is_err());
    }

    #[test]
    fn test_validate_is_component_wise() {
        // Lexicographically ordered, but minor 5 sits above the end's minor 0
        let range = make_range("1.5.0.0", "1.5.0.0", "3.0.0.0", VersionComponent::Major);
        assert!(matches!(range.validate(), Err(Error::InvalidArgument(_))));

        assert!(make_range("1.0.0.0", "1.0.0.5", "1.0.0.9", VersionComponent::Revision).validate().is_ok());
        assert!(make_range("1.0.0.0", "2.0.0.0", "3.0.9.0", VersionComponent::Major).validate().is_ok());
    }

    #[test]
    fn test_allocation_keeps_range_valid_until_exhausted() {
        let mut range = make_range("1.0.0.0", "1.0.0.0", "3.0.0.0", VersionComponent::Major);

        assert_eq!(range.get_and_increment().unwrap(), Version::new(1, 0, 0, 0));
        assert!(range.validate().is_ok());
        assert_eq!(range.get_and_increment().unwrap(), Version::new(2, 0, 0, 0));
        assert!(range.validate().is_ok());
        assert!(range.get_and_increment().is_err());

        assert_eq!(range.next_version, Version::new(3, 0, 0, 0));
        assert!(range.validate().is_ok());
    }

    #[test]
    fn test_edit_defaults_next_to_start() {
        let edit = VersionRangeEdit {
            name: " Product2 ".into(),
            increment_by: VersionComponent::Build,
            start_version: Version::new(1, 5, 0, 0),
            next_version: None,
            end_version: Version::new(1, 5, 9999, 0),
        };
        let range = edit.into_range(3).unwrap();
        assert_eq!(range.id, 3);
        assert_eq!(range.name, "Product2");
        assert_eq!(range.next_version, Version::new(1, 5, 0, 0));
    }

    #[test]
    fn test_edit_rejects_blank_name() {
        let edit = VersionRangeEdit {
            name: "  ".into(),
            increment_by: VersionComponent::Build,
            start_version: Version::new(1, 0, 0, 0),
            next_version: None,
            end_version: Version::new(2, 0, 0, 0),
        };
        assert!(matches!(edit.into_range(0), Err(Error::InvalidArgument(_))));
    }

    proptest! {
        #[test]
        fn prop_allocations_strictly_increase_until_exhausted(
            start in 0u32..50,
            span in 0u32..50,
            minor in 0u32..10,
        ) {
            let end = start + span;
            let mut range = VersionRange {
                id: 1,
                name: "prop".into(),
                increment_by: VersionComponent::Build,
                start_version: Version::new(1, minor, start, 0),
                next_version: Version::new(1, minor, start, 0),
                end_version: Version::new(1, minor, end, 0),
            };

            let mut previous: Option<Version> = None;
            let mut allocated = 0u32;
            while let Ok(v) = range.get_and_increment() {
                prop_assert_eq!(v.major, 1);
                prop_assert_eq!(v.minor, minor);
                prop_assert_eq!(v.revision, 0);
                if let Some(p) = previous {
                    prop_assert!(v > p);
                    prop_assert_eq!(v.build, p.build + 1);
                }
                previous = Some(v);
                allocated += 1;
                prop_assert!(range.validate().is_ok());
            }

            prop_assert_eq!(allocated, span);
            prop_assert_eq!(range.next_version.build, end);
        }
    }
}
