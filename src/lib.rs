// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Version management library - hand out build versions to commits
//!
//! Products own releases; each release draws versions from a bounded
//! version range. The first time a commit asks for a version under a
//! release it gets the range's next value, and every later request for the
//! same commit gets that same value back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod range;
pub mod release;
pub mod version;

pub use data::VersionManagementData;
pub use error::{Error, Result};

/// Core data types shared by the data facility, API and CLI
pub mod types {
    use serde::{Deserialize, Serialize};

    pub use crate::range::{VersionRange, VersionRangeEdit};
    pub use crate::release::{Release, ReleaseEdit, ReleaseVersion};
    pub use crate::version::{Version, VersionComponent};

    // =========================================================================
    // Product
    // =========================================================================

    /// A product groups related releases together
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
    #[serde(rename_all = "camelCase")]
    pub struct Product {
        /// Row id
        #[sqlx(rename = "Id")]
        pub id: i64,
        /// Unique product name
        #[sqlx(rename = "Name")]
        pub name: String,
    }

    /// Fields supplied when creating or renaming a product
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ProductEdit {
        /// Product name
        pub name: String,
    }

    // =========================================================================
    // Release listings
    // =========================================================================

    /// A release together with the names of what it points at
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReleaseDetail {
        /// The release itself
        #[serde(flatten)]
        pub release: Release,
        /// Name of the owning product
        pub product_name: String,
        /// The range the release allocates from
        pub version_range: VersionRange,
    }

    // =========================================================================
    // Allocation results
    // =========================================================================

    /// A version allocated to a commit, as reported to API and CLI callers
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CommitVersion {
        /// Product name
        pub product_name: String,
        /// Release name
        pub release_name: String,
        /// Commit id
        pub commit_id: String,
        /// Semantic version string
        pub version: String,
    }

    impl CommitVersion {
        /// Describe an allocation made under the named product and release
        #[must_use]
        pub fn new(product_name: &str, release_name: &str, release_version: &ReleaseVersion) -> Self {
            Self {
                product_name: product_name.to_string(),
                release_name: release_name.to_string(),
                commit_id: release_version.commit_id.clone(),
                version: release_version.to_semantic_version(),
            }
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Error, Result, VersionManagementData};
}
