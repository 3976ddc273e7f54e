// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! `/products` handlers

use super::{ApiError, AppState};
use crate::error::{EntityKind, Error};
use crate::types::{Product, ProductEdit, ReleaseDetail};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

/// Optional name filter for the product listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Return only the product with this name
    pub product_name: Option<String>,
}

/// GET /products
pub async fn list_products(
    State(data): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Some(name) = query.product_name else {
        return Ok(Json(data.list_products().await?));
    };

    let product = data
        .get_product_by_name(&name)
        .await?
        .ok_or_else(|| Error::not_found_by_name(EntityKind::Product, &name))?;
    Ok(Json(vec![product]))
}

/// POST /products
pub async fn create_product(
    State(data): State<AppState>,
    Json(edit): Json<ProductEdit>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = data.create_product(&edit.name).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products/{id}
pub async fn get_product(
    State(data): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    data.get_product_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found_by_id(EntityKind::Product, id).into())
}

/// PUT /products/{id}
pub async fn update_product(
    State(data): State<AppState>,
    Path(id): Path<i64>,
    Json(edit): Json<ProductEdit>,
) -> Result<Json<Product>, ApiError> {
    data.update_product(id, &edit.name)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found_by_id(EntityKind::Product, id).into())
}

/// DELETE /products/{id}
pub async fn delete_product(
    State(data): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if data.delete_product(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found_by_id(EntityKind::Product, id).into())
    }
}

/// GET /products/{id}/releases
pub async fn product_releases(
    State(data): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ReleaseDetail>>, ApiError> {
    if data.get_product_by_id(id).await?.is_none() {
        return Err(Error::not_found_by_id(EntityKind::Product, id).into());
    }
    Ok(Json(data.list_releases_by_product(id).await?))
}
