// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! `/releases` handlers

use super::{ApiError, AppState};
use crate::error::{EntityKind, Error};
use crate::types::{ReleaseDetail, ReleaseEdit};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

/// Optional filters for the release listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseQuery {
    /// Only releases of this product
    pub product_name: Option<String>,
    /// Only the release with this name (requires `productName`)
    pub release_name: Option<String>,
}

/// GET /releases
pub async fn list_releases(
    State(data): State<AppState>,
    Query(query): Query<ReleaseQuery>,
) -> Result<Json<Vec<ReleaseDetail>>, ApiError> {
    let releases = match (query.product_name.as_deref(), query.release_name.as_deref()) {
        (None, None) => data.list_releases().await?,
        (Some(product), release) => data.find_releases(product, release).await?,
        (None, Some(_)) => {
            return Err(Error::invalid_argument(
                "releaseName can only be used together with productName.",
            )
            .into())
        }
    };
    Ok(Json(releases))
}

/// POST /releases
pub async fn create_release(
    State(data): State<AppState>,
    Json(edit): Json<ReleaseEdit>,
) -> Result<(StatusCode, Json<ReleaseDetail>), ApiError> {
    let release = data.create_release(edit).await?;
    Ok((StatusCode::CREATED, Json(release)))
}

/// GET /releases/{id}
pub async fn get_release(
    State(data): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ReleaseDetail>, ApiError> {
    data.get_release_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found_by_id(EntityKind::Release, id).into())
}

/// PUT /releases/{id}
pub async fn update_release(
    State(data): State<AppState>,
    Path(id): Path<i64>,
    Json(edit): Json<ReleaseEdit>,
) -> Result<Json<ReleaseDetail>, ApiError> {
    data.update_release(id, edit)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found_by_id(EntityKind::Release, id).into())
}

/// DELETE /releases/{id}
pub async fn delete_release(
    State(data): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if data.delete_release(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found_by_id(EntityKind::Release, id).into())
    }
}
