// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Shared fixtures for integration tests

#![allow(dead_code)]

use tempfile::TempDir;
use version_management::config::Config;
use version_management::types::{ReleaseDetail, ReleaseEdit, Version, VersionComponent, VersionRange, VersionRangeEdit};
use version_management::VersionManagementData;

/// A migrated database in a temporary directory
pub struct TestDb {
    pub data: VersionManagementData,
    pub dir: TempDir,
}

pub async fn open_db() -> TestDb {
    let dir = TempDir::new().unwrap();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let data = VersionManagementData::open(&config).await.unwrap();
    TestDb { data, dir }
}

pub fn range_edit(name: &str, start: &str, next: &str, end: &str) -> VersionRangeEdit {
    VersionRangeEdit {
        name: name.to_string(),
        increment_by: VersionComponent::Build,
        start_version: start.parse::<Version>().unwrap(),
        next_version: Some(next.parse::<Version>().unwrap()),
        end_version: end.parse::<Version>().unwrap(),
    }
}

/// Product P1 with release R1 on range 1.0.0.0 .. 1.0.9999.0 by build
pub async fn seed(data: &VersionManagementData, special_version: Option<&str>) -> (VersionRange, ReleaseDetail) {
    let product = data.create_product("P1").await.unwrap();
    let range = data
        .create_version_range(range_edit("P1 range", "1.0.0.0", "1.0.0.0", "1.0.9999.0"))
        .await
        .unwrap();
    let release = data
        .create_release(ReleaseEdit {
            name: "R1".into(),
            product_id: product.id,
            version_range_id: range.id,
            special_version: special_version.map(String::from),
        })
        .await
        .unwrap();
    (range, release)
}
