// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! `/version-ranges` handlers

use super::{ApiError, AppState};
use crate::error::{EntityKind, Error};
use crate::types::{ReleaseDetail, VersionRange, VersionRangeEdit};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

/// GET /version-ranges
pub async fn list_version_ranges(
    State(data): State<AppState>,
) -> Result<Json<Vec<VersionRange>>, ApiError> {
    Ok(Json(data.list_version_ranges().await?))
}

/// POST /version-ranges
pub async fn create_version_range(
    State(data): State<AppState>,
    Json(edit): Json<VersionRangeEdit>,
) -> Result<(StatusCode, Json<VersionRange>), ApiError> {
    let range = data.create_version_range(edit).await?;
    Ok((StatusCode::CREATED, Json(range)))
}

/// GET /version-ranges/{id}
pub async fn get_version_range(
    State(data): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VersionRange>, ApiError> {
    data.get_version_range_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found_by_id(EntityKind::VersionRange, id).into())
}

/// PUT /version-ranges/{id}
pub async fn update_version_range(
    State(data): State<AppState>,
    Path(id): Path<i64>,
    Json(edit): Json<VersionRangeEdit>,
) -> Result<Json<VersionRange>, ApiError> {
    data.update_version_range(id, edit)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found_by_id(EntityKind::VersionRange, id).into())
}

/// DELETE /version-ranges/{id}
pub async fn delete_version_range(
    State(data): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if data.delete_version_range(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found_by_id(EntityKind::VersionRange, id).into())
    }
}

/// GET /version-ranges/{id}/releases
pub async fn version_range_releases(
    State(data): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ReleaseDetail>>, ApiError> {
    if data.get_version_range_by_id(id).await?.is_none() {
        return Err(Error::not_found_by_id(EntityKind::VersionRange, id).into());
    }
    Ok(Json(data.list_releases_by_version_range(id).await?))
}
