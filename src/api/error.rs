// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Mapping of domain errors onto HTTP responses

use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::{error, warn};

/// JSON error body: `{message, errorCode}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable description
    pub message: String,
    /// Stable machine-readable code
    pub error_code: &'static str,
}

/// 404 body for a commit that has no version under the release yet
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionNotFound {
    /// Human-readable description
    pub message: String,
    /// Product that was queried
    pub product_name: String,
    /// Release that was queried
    pub release_name: String,
    /// Commit that was queried
    pub commit_id: String,
    /// Always `EntityNotFound`
    pub error_code: &'static str,
}

/// Errors returned by API handlers
#[derive(Debug)]
pub enum ApiError {
    /// A facility error
    Domain(Error),
    /// Lookup of a commit that has not been allocated a version
    VersionNotFound(VersionNotFound),
}

impl ApiError {
    /// Build the not-yet-allocated response for a version lookup
    #[must_use]
    pub fn version_not_found(product_name: &str, release_name: &str, commit_id: &str) -> Self {
        Self::VersionNotFound(VersionNotFound {
            message: format!(
                "No version has been allocated for commit '{commit_id}' in release \
                 '{release_name}' of product '{product_name}'."
            ),
            product_name: product_name.to_string(),
            release_name: release_name.to_string(),
            commit_id: commit_id.to_string(),
            error_code: "EntityNotFound",
        })
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Domain(err)
    }
}

/// Status code and `errorCode` for a domain error
fn classify(err: &Error) -> (StatusCode, &'static str) {
    match err {
        Error::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "InvalidArgument"),
        Error::NotFound { .. } => (StatusCode::NOT_FOUND, "EntityNotFound"),
        Error::AlreadyExists { .. } => (StatusCode::CONFLICT, "EntityAlreadyExists"),
        Error::RangeExhausted { .. } => (StatusCode::CONFLICT, "VersionRangeExhausted"),
        Error::InvalidState(_) | Error::Database(_) | Error::Migration(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "InternalError")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Domain(err) => {
                let (status, error_code) = classify(&err);
                let message = if status.is_server_error() {
                    error!(error = %err, "Request failed");
                    "An internal error occurred.".to_string()
                } else {
                    warn!(status = status.as_u16(), error = %err, "Request rejected");
                    err.to_string()
                };
                (status, Json(ErrorResponse { message, error_code })).into_response()
            }
            Self::VersionNotFound(body) => (StatusCode::NOT_FOUND, Json(body)).into_response(),
        }
    }
}
