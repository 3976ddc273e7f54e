// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Releases and the versions allocated to commits under them

use crate::error::{require, Error, Result};
use crate::range::VersionRange;
use crate::version::{semantic_version, Version};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A named release of a product, bound to one version range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Row id
    pub id: i64,
    /// Release name (unique within the product)
    pub name: String,
    /// Owning product
    pub product_id: i64,
    /// Range versions are allocated from
    pub version_range_id: i64,
    /// Pre-release suffix appended to allocated versions
    pub special_version: Option<String>,
    /// The loaded version range, when the caller attached it
    #[serde(skip)]
    pub version_range: Option<VersionRange>,
    /// Versions allocated through this instance
    #[serde(skip)]
    pub release_versions: Vec<ReleaseVersion>,
}

impl Release {
    /// Allocate the next version from this release's range for a commit.
    ///
    /// The range must already be attached. Nothing is written to storage;
    /// the caller persists both the new [`ReleaseVersion`] and the advanced
    /// range cursor.
    pub fn allocate_release_version(&mut self, commit_id: &str) -> Result<ReleaseVersion> {
        require("commitId", commit_id)?;

        let range = self.version_range.as_mut().ok_or_else(|| {
            Error::invalid_state(format!(
                "release '{}' has no version range loaded",
                self.name
            ))
        })?;

        let version = range.get_and_increment()?;
        let release_version = ReleaseVersion::new(self, commit_id, version);
        self.release_versions.push(release_version.clone());

        Ok(release_version)
    }

    /// The suffix used for allocations ("" when the release has none)
    #[must_use]
    pub fn special_version(&self) -> &str {
        self.special_version.as_deref().unwrap_or_default()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Release {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("Id")?,
            name: row.try_get("Name")?,
            product_id: row.try_get("ProductId")?,
            version_range_id: row.try_get("VersionRangeId")?,
            special_version: row.try_get("SpecialVersion")?,
            version_range: None,
            release_versions: Vec::new(),
        })
    }
}

/// The record of one allocation: which commit got which version, and under
/// which release. Never modified once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseVersion {
    /// Release the version was allocated under
    pub release_id: i64,
    /// Source-control commit the version belongs to
    pub commit_id: String,
    /// The allocated version
    pub version: Version,
    /// The release's suffix at the time of allocation
    pub special_version: String,
}

impl ReleaseVersion {
    fn new(release: &Release, commit_id: &str, version: Version) -> Self {
        Self {
            release_id: release.id,
            commit_id: commit_id.to_string(),
            version,
            special_version: release.special_version().to_string(),
        }
    }

    /// Render as "major.minor.build.revision[-special]"
    #[must_use]
    pub fn to_semantic_version(&self) -> String {
        semantic_version(&self.version, &self.special_version)
    }
}

impl<'r> FromRow<'r, SqliteRow> for ReleaseVersion {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            release_id: row.try_get("ReleaseId")?,
            commit_id: row.try_get("CommitId")?,
            version: Version::new(
                row.try_get("VersionMajor")?,
                row.try_get("VersionMinor")?,
                row.try_get("VersionBuild")?,
                row.try_get("VersionRevision")?,
            ),
            special_version: row.try_get("SpecialVersion")?,
        })
    }
}

/// Fields supplied when creating or editing a release
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEdit {
    /// Release name
    pub name: String,
    /// Owning product
    pub product_id: i64,
    /// Range to allocate from
    pub version_range_id: i64,
    /// Optional pre-release suffix
    #[serde(default)]
    pub special_version: Option<String>,
}

impl ReleaseEdit {
    /// Trimmed name and suffix, with a blank suffix treated as none
    pub(crate) fn normalized(&self) -> Result<(String, Option<String>)> {
        require("name", &self.name)?;

        let special_version = self
            .special_version
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        if let Some(special) = &special_version {
            if special.contains('-') {
                return Err(Error::invalid_argument(format!(
                    "Special version '{special}' cannot contain '-'."
                )));
            }
        }

        Ok((self.name.trim().to_string(), special_version))
    }
}
