// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! `/versions` handlers

use super::{ApiError, AppState};
use crate::types::{CommitVersion, ReleaseVersion};
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

/// Query parameters naming one commit under one release
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionQuery {
    /// Product name
    pub product_name: Option<String>,
    /// Release name
    pub release_name: Option<String>,
    /// Commit id
    pub commit_id: Option<String>,
}

impl VersionQuery {
    fn parts(&self) -> (&str, &str, &str) {
        (
            self.product_name.as_deref().unwrap_or_default(),
            self.release_name.as_deref().unwrap_or_default(),
            self.commit_id.as_deref().unwrap_or_default(),
        )
    }
}

/// Query parameters for a commit lookup across releases
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitQuery {
    /// Product name
    pub product_name: Option<String>,
    /// Commit id
    pub commit_id: Option<String>,
}

/// Query parameters for a semantic version lookup
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticQuery {
    /// Product name
    pub product_name: Option<String>,
    /// Semantic version, e.g. `1.0.3.0-beta`
    pub version: Option<String>,
}

/// GET /versions - the version already allocated to a commit
pub async fn get_version(
    State(data): State<AppState>,
    Query(query): Query<VersionQuery>,
) -> Result<Json<CommitVersion>, ApiError> {
    let (product_name, release_name, commit_id) = query.parts();

    match data
        .get_release_version(product_name, release_name, commit_id)
        .await?
    {
        Some(rv) => Ok(Json(CommitVersion::new(product_name, release_name, &rv))),
        None => Err(ApiError::version_not_found(
            product_name,
            release_name,
            commit_id,
        )),
    }
}

/// POST /versions - get or allocate the version for a commit
pub async fn create_version(
    State(data): State<AppState>,
    Query(query): Query<VersionQuery>,
) -> Result<Json<CommitVersion>, ApiError> {
    let (product_name, release_name, commit_id) = query.parts();

    let rv = data
        .get_or_create_release_version(product_name, release_name, commit_id)
        .await?;
    Ok(Json(CommitVersion::new(product_name, release_name, &rv)))
}

/// GET /versions/commit - every version a commit received in a product
pub async fn versions_for_commit(
    State(data): State<AppState>,
    Query(query): Query<CommitQuery>,
) -> Result<Json<Vec<ReleaseVersion>>, ApiError> {
    let versions = data
        .get_release_versions_from_commit_id(
            query.product_name.as_deref().unwrap_or_default(),
            query.commit_id.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(versions))
}

/// GET /versions/semantic - every allocation matching a version string
pub async fn versions_for_semantic_version(
    State(data): State<AppState>,
    Query(query): Query<SemanticQuery>,
) -> Result<Json<Vec<ReleaseVersion>>, ApiError> {
    let versions = data
        .get_release_versions_from_semantic_version(
            query.product_name.as_deref().unwrap_or_default(),
            query.version.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(versions))
}
