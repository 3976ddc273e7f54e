// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The version-management data facility
//!
//! All reads and writes of products, releases, version ranges and release
//! versions go through [`VersionManagementData`]. It is the only place a
//! version range's cursor is moved, and it always does so inside the same
//! transaction that records the new [`ReleaseVersion`].

use crate::config::Config;
use crate::error::{require, EntityKind, Error, Result};
use crate::range::{version_columns, VersionRange, VersionRangeEdit};
use crate::release::{Release, ReleaseEdit, ReleaseVersion};
use crate::types::{Product, ReleaseDetail};
use crate::version::parse_semantic_version;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row, SqliteExecutor, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

const SELECT_RELEASE: &str =
    r#"SELECT "Id", "Name", "ProductId", "VersionRangeId", "SpecialVersion" FROM "Release""#;

const SELECT_RELEASE_DETAIL: &str = r#"SELECT r."Id", r."Name", r."ProductId", r."VersionRangeId", r."SpecialVersion",
        p."Name" AS "ProductName",
        vr."Name" AS "VersionRangeName", vr."IncrementBy",
        vr."StartVersionMajor", vr."StartVersionMinor", vr."StartVersionBuild", vr."StartVersionRevision",
        vr."NextVersionMajor", vr."NextVersionMinor", vr."NextVersionBuild", vr."NextVersionRevision",
        vr."EndVersionMajor", vr."EndVersionMinor", vr."EndVersionBuild", vr."EndVersionRevision"
    FROM "Release" r
    JOIN "Product" p ON p."Id" = r."ProductId"
    JOIN "VersionRange" vr ON vr."Id" = r."VersionRangeId""#;

const ORDER_RELEASE_DETAIL: &str = r#"ORDER BY p."Name", r."Name""#;

const SELECT_RELEASE_VERSION: &str = r#"SELECT rv."CommitId", rv."ReleaseId", rv."VersionMajor", rv."VersionMinor",
        rv."VersionBuild", rv."VersionRevision", rv."SpecialVersion"
    FROM "ReleaseVersion" rv"#;

/// Data access facility shared by the HTTP API and the CLI
#[derive(Debug, Clone)]
pub struct VersionManagementData {
    pool: SqlitePool,
}

impl VersionManagementData {
    /// Wrap an existing pool. Migrations are not run.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the configured database, creating the file if needed, and bring
    /// its schema up to date. The data directory must already exist.
    pub async fn open(config: &Config) -> Result<Self> {
        let options = match &config.database.url {
            Some(url) => SqliteConnectOptions::from_str(url)?,
            None => SqliteConnectOptions::new().filename(config.database_path()),
        }
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(config.database.busy_timeout_ms));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.max_connections.max(1))
            .connect_with(options)
            .await?;

        let data = Self::new(pool);
        data.migrate().await?;
        Ok(data)
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        debug!("Database schema is up to date");
        Ok(())
    }

    /// The underlying connection pool
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// All products, sorted by name
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"SELECT "Id", "Name" FROM "Product" ORDER BY "Name""#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// A product by id, or `None`
    pub async fn get_product_by_id(&self, product_id: i64) -> Result<Option<Product>> {
        fetch_product_by_id(&self.pool, product_id).await
    }

    /// A product by exact name, or `None`
    pub async fn get_product_by_name(&self, product_name: &str) -> Result<Option<Product>> {
        require("productName", product_name)?;
        fetch_product_by_name(&self.pool, product_name).await
    }

    /// Create a product with a unique name
    pub async fn create_product(&self, name: &str) -> Result<Product> {
        require("name", name)?;
        let name = name.trim();

        if fetch_product_by_name(&self.pool, name).await?.is_some() {
            return Err(Error::product_exists(name));
        }

        let id = sqlx::query(r#"INSERT INTO "Product" ("Name") VALUES (?)"#)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| unique_violation(e, || Error::product_exists(name)))?
            .last_insert_rowid();

        info!(product_id = id, product = %name, "Created product");
        Ok(Product {
            id,
            name: name.to_string(),
        })
    }

    /// Rename a product. Returns `None` if no product has this id.
    pub async fn update_product(&self, product_id: i64, name: &str) -> Result<Option<Product>> {
        require("name", name)?;
        let name = name.trim();

        if let Some(existing) = fetch_product_by_name(&self.pool, name).await? {
            if existing.id != product_id {
                return Err(Error::product_exists(name));
            }
        }

        let updated = sqlx::query(r#"UPDATE "Product" SET "Name" = ? WHERE "Id" = ?"#)
            .bind(name)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|e| unique_violation(e, || Error::product_exists(name)))?
            .rows_affected();

        if updated == 0 {
            return Ok(None);
        }

        info!(product_id, product = %name, "Updated product");
        Ok(Some(Product {
            id: product_id,
            name: name.to_string(),
        }))
    }

    /// Delete a product together with its releases and their allocated versions
    pub async fn delete_product(&self, product_id: i64) -> Result<bool> {
        let deleted = sqlx::query(r#"DELETE FROM "Product" WHERE "Id" = ?"#)
            .bind(product_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted > 0 {
            info!(product_id, "Deleted product");
        }
        Ok(deleted > 0)
    }

    // =========================================================================
    // Version ranges
    // =========================================================================

    /// All version ranges, sorted by name
    pub async fn list_version_ranges(&self) -> Result<Vec<VersionRange>> {
        let ranges = sqlx::query_as::<_, VersionRange>(
            r#"SELECT * FROM "VersionRange" ORDER BY "Name", "Id""#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ranges)
    }

    /// A version range by id, or `None`
    pub async fn get_version_range_by_id(&self, version_range_id: i64) -> Result<Option<VersionRange>> {
        fetch_version_range(&self.pool, version_range_id).await
    }

    /// Create a version range
    pub async fn create_version_range(&self, edit: VersionRangeEdit) -> Result<VersionRange> {
        let mut range = edit.into_range(0)?;

        range.id = sqlx::query(
            r#"INSERT INTO "VersionRange" (
                "Name", "IncrementBy",
                "StartVersionMajor", "StartVersionMinor", "StartVersionBuild", "StartVersionRevision",
                "NextVersionMajor", "NextVersionMinor", "NextVersionBuild", "NextVersionRevision",
                "EndVersionMajor", "EndVersionMinor", "EndVersionBuild", "EndVersionRevision"
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&range.name)
        .bind(range.increment_by)
        .bind(range.start_version.major)
        .bind(range.start_version.minor)
        .bind(range.start_version.build)
        .bind(range.start_version.revision)
        .bind(range.next_version.major)
        .bind(range.next_version.minor)
        .bind(range.next_version.build)
        .bind(range.next_version.revision)
        .bind(range.end_version.major)
        .bind(range.end_version.minor)
        .bind(range.end_version.build)
        .bind(range.end_version.revision)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(version_range_id = range.id, range = %range, "Created version range");
        Ok(range)
    }

    /// Replace a version range's settings. Returns `None` if no range has this id.
    pub async fn update_version_range(
        &self,
        version_range_id: i64,
        edit: VersionRangeEdit,
    ) -> Result<Option<VersionRange>> {
        let range = edit.into_range(version_range_id)?;

        let updated = sqlx::query(
            r#"UPDATE "VersionRange" SET
                "Name" = ?, "IncrementBy" = ?,
                "StartVersionMajor" = ?, "StartVersionMinor" = ?, "StartVersionBuild" = ?, "StartVersionRevision" = ?,
                "NextVersionMajor" = ?, "NextVersionMinor" = ?, "NextVersionBuild" = ?, "NextVersionRevision" = ?,
                "EndVersionMajor" = ?, "EndVersionMinor" = ?, "EndVersionBuild" = ?, "EndVersionRevision" = ?
            WHERE "Id" = ?"#,
        )
        .bind(&range.name)
        .bind(range.increment_by)
        .bind(range.start_version.major)
        .bind(range.start_version.minor)
        .bind(range.start_version.build)
        .bind(range.start_version.revision)
        .bind(range.next_version.major)
        .bind(range.next_version.minor)
        .bind(range.next_version.build)
        .bind(range.next_version.revision)
        .bind(range.end_version.major)
        .bind(range.end_version.minor)
        .bind(range.end_version.build)
        .bind(range.end_version.revision)
        .bind(version_range_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }

        info!(version_range_id, range = %range, "Updated version range");
        Ok(Some(range))
    }

    /// Delete a version range together with the releases that use it
    pub async fn delete_version_range(&self, version_range_id: i64) -> Result<bool> {
        let deleted = sqlx::query(r#"DELETE FROM "VersionRange" WHERE "Id" = ?"#)
            .bind(version_range_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted > 0 {
            info!(version_range_id, "Deleted version range");
        }
        Ok(deleted > 0)
    }

    // =========================================================================
    // Releases
    // =========================================================================

    /// All releases, sorted by product name then release name
    pub async fn list_releases(&self) -> Result<Vec<ReleaseDetail>> {
        let releases = sqlx::query_as::<_, ReleaseDetail>(&format!(
            "{SELECT_RELEASE_DETAIL} {ORDER_RELEASE_DETAIL}"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(releases)
    }

    /// All releases of a product
    pub async fn list_releases_by_product(&self, product_id: i64) -> Result<Vec<ReleaseDetail>> {
        let releases = sqlx::query_as::<_, ReleaseDetail>(&format!(
            r#"{SELECT_RELEASE_DETAIL} WHERE r."ProductId" = ? {ORDER_RELEASE_DETAIL}"#
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(releases)
    }

    /// All releases that allocate from a version range
    pub async fn list_releases_by_version_range(&self, version_range_id: i64) -> Result<Vec<ReleaseDetail>> {
        let releases = sqlx::query_as::<_, ReleaseDetail>(&format!(
            r#"{SELECT_RELEASE_DETAIL} WHERE r."VersionRangeId" = ? {ORDER_RELEASE_DETAIL}"#
        ))
        .bind(version_range_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(releases)
    }

    /// Releases of the named product, optionally narrowed to one release name
    pub async fn find_releases(
        &self,
        product_name: &str,
        release_name: Option<&str>,
    ) -> Result<Vec<ReleaseDetail>> {
        require("productName", product_name)?;

        let Some(product) = fetch_product_by_name(&self.pool, product_name).await? else {
            return Ok(Vec::new());
        };

        match release_name.filter(|name| !name.trim().is_empty()) {
            Some(release_name) => {
                let releases = sqlx::query_as::<_, ReleaseDetail>(&format!(
                    r#"{SELECT_RELEASE_DETAIL} WHERE r."ProductId" = ? AND r."Name" = ?"#
                ))
                .bind(product.id)
                .bind(release_name)
                .fetch_all(&self.pool)
                .await?;
                Ok(releases)
            }
            None => self.list_releases_by_product(product.id).await,
        }
    }

    /// A release by id, or `None`
    pub async fn get_release_by_id(&self, release_id: i64) -> Result<Option<ReleaseDetail>> {
        let release = sqlx::query_as::<_, ReleaseDetail>(&format!(
            r#"{SELECT_RELEASE_DETAIL} WHERE r."Id" = ?"#
        ))
        .bind(release_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(release)
    }

    /// Create a release; its product and version range must exist and its
    /// name must be unused within the product
    pub async fn create_release(&self, edit: ReleaseEdit) -> Result<ReleaseDetail> {
        let (name, special_version) = edit.normalized()?;
        let product = self.check_release_edit(None, &name, &edit).await?;

        let id = sqlx::query(
            r#"INSERT INTO "Release" ("Name", "ProductId", "VersionRangeId", "SpecialVersion")
            VALUES (?, ?, ?, ?)"#,
        )
        .bind(&name)
        .bind(edit.product_id)
        .bind(edit.version_range_id)
        .bind(&special_version)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_violation(e, || Error::release_exists(&name, &product.name)))?
        .last_insert_rowid();

        info!(release_id = id, release = %name, product = %product.name, "Created release");

        self.get_release_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found_by_id(EntityKind::Release, id))
    }

    /// Edit a release. Returns `None` if no release has this id.
    pub async fn update_release(&self, release_id: i64, edit: ReleaseEdit) -> Result<Option<ReleaseDetail>> {
        let (name, special_version) = edit.normalized()?;

        if fetch_release_by_id(&self.pool, release_id).await?.is_none() {
            return Ok(None);
        }
        let product = self.check_release_edit(Some(release_id), &name, &edit).await?;

        sqlx::query(
            r#"UPDATE "Release"
            SET "Name" = ?, "ProductId" = ?, "VersionRangeId" = ?, "SpecialVersion" = ?
            WHERE "Id" = ?"#,
        )
        .bind(&name)
        .bind(edit.product_id)
        .bind(edit.version_range_id)
        .bind(&special_version)
        .bind(release_id)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_violation(e, || Error::release_exists(&name, &product.name)))?;

        info!(release_id, release = %name, product = %product.name, "Updated release");
        self.get_release_by_id(release_id).await
    }

    /// Delete a release together with its allocated versions
    pub async fn delete_release(&self, release_id: i64) -> Result<bool> {
        let deleted = sqlx::query(r#"DELETE FROM "Release" WHERE "Id" = ?"#)
            .bind(release_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted > 0 {
            info!(release_id, "Deleted release");
        }
        Ok(deleted > 0)
    }

    /// Shared create/update checks: product and range exist, name is free
    async fn check_release_edit(
        &self,
        release_id: Option<i64>,
        name: &str,
        edit: &ReleaseEdit,
    ) -> Result<Product> {
        let product = fetch_product_by_id(&self.pool, edit.product_id)
            .await?
            .ok_or_else(|| Error::not_found_by_id(EntityKind::Product, edit.product_id))?;

        if fetch_version_range(&self.pool, edit.version_range_id).await?.is_none() {
            return Err(Error::not_found_by_id(EntityKind::VersionRange, edit.version_range_id));
        }

        if let Some(existing) = fetch_release_by_name(&self.pool, product.id, name).await? {
            if Some(existing.id) != release_id {
                return Err(Error::release_exists(name, &product.name));
            }
        }

        Ok(product)
    }

    // =========================================================================
    // Release versions
    // =========================================================================

    /// The version already allocated to a commit under a release.
    ///
    /// Unknown product or release names are errors; `Ok(None)` means the
    /// release exists but nothing has been allocated for the commit yet.
    pub async fn get_release_version(
        &self,
        product_name: &str,
        release_name: &str,
        commit_id: &str,
    ) -> Result<Option<ReleaseVersion>> {
        let release = self
            .resolve_release(product_name, release_name, commit_id)
            .await?;

        let release_version = fetch_release_version(&self.pool, release.id, commit_id).await?;
        debug!(
            product = %product_name,
            release = %release_name,
            commit = %commit_id,
            found = release_version.is_some(),
            "Looked up release version"
        );
        Ok(release_version)
    }

    /// The version for a commit under a release, allocating one if needed.
    ///
    /// Repeated calls for the same commit return the same version and move
    /// the range cursor only once.
    pub async fn get_or_create_release_version(
        &self,
        product_name: &str,
        release_name: &str,
        commit_id: &str,
    ) -> Result<ReleaseVersion> {
        let mut release = self
            .resolve_release(product_name, release_name, commit_id)
            .await?;

        if let Some(existing) = fetch_release_version(&self.pool, release.id, commit_id).await? {
            return Ok(existing);
        }

        let mut tx = self.pool.begin().await?;

        // Claim the range row's write lock before reading the cursor so
        // concurrent allocations from the same range are serialised.
        let claimed = sqlx::query(r#"UPDATE "VersionRange" SET "Name" = "Name" WHERE "Id" = ?"#)
            .bind(release.version_range_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if claimed == 0 {
            return Err(Error::not_found_by_id(
                EntityKind::VersionRange,
                release.version_range_id,
            ));
        }

        // Another request may have allocated for this commit while we waited.
        if let Some(existing) = fetch_release_version(&mut *tx, release.id, commit_id).await? {
            tx.rollback().await?;
            return Ok(existing);
        }

        release.version_range = fetch_version_range(&mut *tx, release.version_range_id).await?;
        let release_version = release.allocate_release_version(commit_id)?;
        let Some(range) = release.version_range.as_ref() else {
            return Err(Error::invalid_state("version range detached during allocation"));
        };

        sqlx::query(
            r#"UPDATE "VersionRange"
            SET "NextVersionMajor" = ?, "NextVersionMinor" = ?, "NextVersionBuild" = ?, "NextVersionRevision" = ?
            WHERE "Id" = ?"#,
        )
        .bind(range.next_version.major)
        .bind(range.next_version.minor)
        .bind(range.next_version.build)
        .bind(range.next_version.revision)
        .bind(range.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"INSERT INTO "ReleaseVersion" (
                "CommitId", "ReleaseId", "VersionMajor", "VersionMinor", "VersionBuild", "VersionRevision", "SpecialVersion"
            ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&release_version.commit_id)
        .bind(release_version.release_id)
        .bind(release_version.version.major)
        .bind(release_version.version.minor)
        .bind(release_version.version.build)
        .bind(release_version.version.revision)
        .bind(&release_version.special_version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            product = %product_name,
            release = %release_name,
            commit = %commit_id,
            version = %release_version.to_semantic_version(),
            range = %range,
            "Allocated release version"
        );
        Ok(release_version)
    }

    /// Every version allocated to a commit across the product's releases
    pub async fn get_release_versions_from_commit_id(
        &self,
        product_name: &str,
        commit_id: &str,
    ) -> Result<Vec<ReleaseVersion>> {
        require("productName", product_name)?;
        require("commitId", commit_id)?;

        let versions = sqlx::query_as::<_, ReleaseVersion>(&format!(
            r#"{SELECT_RELEASE_VERSION}
            JOIN "Release" r ON r."Id" = rv."ReleaseId"
            JOIN "Product" p ON p."Id" = r."ProductId"
            WHERE p."Name" = ? AND rv."CommitId" = ?
            ORDER BY r."Name""#
        ))
        .bind(product_name)
        .bind(commit_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(versions)
    }

    /// Every allocation in the product matching a semantic version string
    pub async fn get_release_versions_from_semantic_version(
        &self,
        product_name: &str,
        semantic_version: &str,
    ) -> Result<Vec<ReleaseVersion>> {
        require("productName", product_name)?;
        require("semanticVersion", semantic_version)?;

        let (version, special_version) = parse_semantic_version(semantic_version)?;

        let versions = sqlx::query_as::<_, ReleaseVersion>(&format!(
            r#"{SELECT_RELEASE_VERSION}
            JOIN "Release" r ON r."Id" = rv."ReleaseId"
            JOIN "Product" p ON p."Id" = r."ProductId"
            WHERE p."Name" = ?
              AND rv."VersionMajor" = ? AND rv."VersionMinor" = ?
              AND rv."VersionBuild" = ? AND rv."VersionRevision" = ?
              AND rv."SpecialVersion" = ?
            ORDER BY r."Name", rv."CommitId""#
        ))
        .bind(product_name)
        .bind(version.major)
        .bind(version.minor)
        .bind(version.build)
        .bind(version.revision)
        .bind(special_version)
        .fetch_all(&self.pool)
        .await?;
        Ok(versions)
    }

    /// Validate version arguments and resolve product and release by name
    async fn resolve_release(
        &self,
        product_name: &str,
        release_name: &str,
        commit_id: &str,
    ) -> Result<Release> {
        require("productName", product_name)?;
        require("releaseName", release_name)?;
        require("commitId", commit_id)?;

        let product = fetch_product_by_name(&self.pool, product_name)
            .await?
            .ok_or_else(|| Error::not_found_by_name(EntityKind::Product, product_name))?;

        fetch_release_by_name(&self.pool, product.id, release_name)
            .await?
            .ok_or_else(|| Error::not_found_by_name(EntityKind::Release, release_name))
    }
}

impl<'r> FromRow<'r, SqliteRow> for ReleaseDetail {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let release = Release::from_row(row)?;
        let version_range = VersionRange {
            id: release.version_range_id,
            name: row.try_get("VersionRangeName")?,
            increment_by: row.try_get("IncrementBy")?,
            start_version: version_columns(row, "StartVersion")?,
            next_version: version_columns(row, "NextVersion")?,
            end_version: version_columns(row, "EndVersion")?,
        };
        Ok(Self {
            product_name: row.try_get("ProductName")?,
            release,
            version_range,
        })
    }
}

// =============================================================================
// Queries usable on the pool or inside a transaction
// =============================================================================

async fn fetch_product_by_id<'c>(executor: impl SqliteExecutor<'c>, product_id: i64) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(r#"SELECT "Id", "Name" FROM "Product" WHERE "Id" = ?"#)
        .bind(product_id)
        .fetch_optional(executor)
        .await?;
    Ok(product)
}

async fn fetch_product_by_name<'c>(executor: impl SqliteExecutor<'c>, name: &str) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(r#"SELECT "Id", "Name" FROM "Product" WHERE "Name" = ?"#)
        .bind(name)
        .fetch_optional(executor)
        .await?;
    Ok(product)
}

async fn fetch_release_by_id<'c>(executor: impl SqliteExecutor<'c>, release_id: i64) -> Result<Option<Release>> {
    let release = sqlx::query_as::<_, Release>(&format!(r#"{SELECT_RELEASE} WHERE "Id" = ?"#))
        .bind(release_id)
        .fetch_optional(executor)
        .await?;
    Ok(release)
}

async fn fetch_release_by_name<'c>(
    executor: impl SqliteExecutor<'c>,
    product_id: i64,
    name: &str,
) -> Result<Option<Release>> {
    let release = sqlx::query_as::<_, Release>(&format!(
        r#"{SELECT_RELEASE} WHERE "ProductId" = ? AND "Name" = ?"#
    ))
    .bind(product_id)
    .bind(name)
    .fetch_optional(executor)
    .await?;
    Ok(release)
}

async fn fetch_version_range<'c>(
    executor: impl SqliteExecutor<'c>,
    version_range_id: i64,
) -> Result<Option<VersionRange>> {
    let range = sqlx::query_as::<_, VersionRange>(r#"SELECT * FROM "VersionRange" WHERE "Id" = ?"#)
        .bind(version_range_id)
        .fetch_optional(executor)
        .await?;
    Ok(range)
}

async fn fetch_release_version<'c>(
    executor: impl SqliteExecutor<'c>,
    release_id: i64,
    commit_id: &str,
) -> Result<Option<ReleaseVersion>> {
    let release_version = sqlx::query_as::<_, ReleaseVersion>(&format!(
        r#"{SELECT_RELEASE_VERSION} WHERE rv."ReleaseId" = ? AND rv."CommitId" = ?"#
    ))
    .bind(release_id)
    .bind(commit_id)
    .fetch_optional(executor)
    .await?;
    Ok(release_version)
}

/// Map a unique-index violation raced past the up-front check to `AlreadyExists`
fn unique_violation(err: sqlx::Error, already_exists: impl FnOnce() -> Error) -> Error {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => already_exists(),
        _ => Error::Database(err),
    }
}
