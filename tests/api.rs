// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! In-process tests for the HTTP API

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use version_management::api;

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Router over a fresh database holding P1 / R1 on 1.0.0.0 .. 1.0.9999.0
async fn seeded_app() -> (Router, common::TestDb) {
    let db = common::open_db().await;
    let app = api::router(db.data.clone());

    let (status, product) = call(&app, Method::POST, "/api/v2/products", Some(json!({"name": "P1"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, range) = call(
        &app,
        Method::POST,
        "/api/v2/version-ranges",
        Some(json!({
            "name": "P1 range",
            "incrementBy": "Build",
            "startVersion": "1.0.0.0",
            "endVersion": "1.0.9999.0",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(range["nextVersion"], "1.0.0.0");

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v2/releases",
        Some(json!({
            "name": "R1",
            "productId": product["id"],
            "versionRangeId": range["id"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (app, db)
}

#[tokio::test]
async fn test_health() {
    let db = common::open_db().await;
    let app = api::router(db.data.clone());

    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_allocation_end_to_end() {
    let (app, _db) = seeded_app().await;
    let uri = "/api/v2/versions?productName=P1&releaseName=R1&commitId=abc";

    let (status, body) = call(&app, Method::POST, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"productName": "P1", "releaseName": "R1", "commitId": "abc", "version": "1.0.0.0"})
    );

    let (_, ranges) = call(&app, Method::GET, "/api/v2/version-ranges", None).await;
    assert_eq!(ranges[0]["nextVersion"], "1.0.1.0");

    let (status, again) = call(&app, Method::POST, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["version"], "1.0.0.0");

    let (status, fetched) = call(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["version"], "1.0.0.0");

    let (_, def) = call(
        &app,
        Method::POST,
        "/api/v2/versions?productName=P1&releaseName=R1&commitId=def",
        None,
    )
    .await;
    assert_eq!(def["version"], "1.0.1.0");

    let (_, ranges) = call(&app, Method::GET, "/api/v2/version-ranges", None).await;
    assert_eq!(ranges[0]["nextVersion"], "1.0.2.0");
}

#[tokio::test]
async fn test_get_unallocated_commit_is_404_with_context() {
    let (app, _db) = seeded_app().await;

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v2/versions?productName=P1&releaseName=R1&commitId=zzz",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "EntityNotFound");
    assert_eq!(body["productName"], "P1");
    assert_eq!(body["releaseName"], "R1");
    assert_eq!(body["commitId"], "zzz");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_missing_or_blank_parameters_are_400() {
    let (app, _db) = seeded_app().await;

    for uri in [
        "/api/v2/versions?productName=P1&releaseName=R1",
        "/api/v2/versions?productName=P1&releaseName=%20&commitId=abc",
        "/api/v2/versions",
    ] {
        let (status, body) = call(&app, Method::POST, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["errorCode"], "InvalidArgument");
    }
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let (app, _db) = seeded_app().await;

    for method in [Method::GET, Method::POST] {
        let (status, body) = call(
            &app,
            method,
            "/api/v2/versions?productName=Nope&releaseName=R1&commitId=abc",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorCode"], "EntityNotFound");
    }
}

#[tokio::test]
async fn test_duplicate_product_is_409() {
    let (app, _db) = seeded_app().await;

    let (status, body) = call(&app, Method::POST, "/api/v2/products", Some(json!({"name": "P1"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "EntityAlreadyExists");
}

#[tokio::test]
async fn test_exhausted_range_is_409() {
    let db = common::open_db().await;
    let app = api::router(db.data.clone());

    let (_, product) = call(&app, Method::POST, "/api/v2/products", Some(json!({"name": "P1"}))).await;
    let (_, range) = call(
        &app,
        Method::POST,
        "/api/v2/version-ranges",
        Some(json!({
            "name": "tiny",
            "startVersion": "1.0.0.0",
            "nextVersion": "1.0.1.0",
            "endVersion": "1.0.1.0",
        })),
    )
    .await;
    call(
        &app,
        Method::POST,
        "/api/v2/releases",
        Some(json!({"name": "R1", "productId": product["id"], "versionRangeId": range["id"]})),
    )
    .await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v2/versions?productName=P1&releaseName=R1&commitId=abc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "VersionRangeExhausted");
}

#[tokio::test]
async fn test_product_crud() {
    let (app, _db) = seeded_app().await;

    let (status, list) = call(&app, Method::GET, "/api/v2/products?productName=P1", None).await;
    assert_eq!(status, StatusCode::OK);
    let id = list[0]["id"].as_i64().unwrap();

    let (status, renamed) = call(
        &app,
        Method::PUT,
        &format!("/api/v2/products/{id}"),
        Some(json!({"name": "P1b"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "P1b");

    let (status, releases) = call(&app, Method::GET, &format!("/api/v2/products/{id}/releases"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(releases[0]["name"], "R1");
    assert_eq!(releases[0]["productName"], "P1b");

    let (status, _) = call(&app, Method::DELETE, &format!("/api/v2/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::GET, &format!("/api/v2/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::GET, "/api/v2/products?productName=P1b", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_release_listing_and_lookups() {
    let (app, _db) = seeded_app().await;
    call(
        &app,
        Method::POST,
        "/api/v2/versions?productName=P1&releaseName=R1&commitId=abc",
        None,
    )
    .await;

    let (status, releases) = call(&app, Method::GET, "/api/v2/releases?productName=P1&releaseName=R1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(releases.as_array().unwrap().len(), 1);
    assert_eq!(releases[0]["versionRange"]["nextVersion"], "1.0.1.0");

    let (status, by_commit) = call(&app, Method::GET, "/api/v2/versions/commit?productName=P1&commitId=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_commit[0]["version"], "1.0.0.0");

    let (status, by_version) = call(&app, Method::GET, "/api/v2/versions/semantic?productName=P1&version=1.0.0.0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_version[0]["commitId"], "abc");

    let (status, body) = call(&app, Method::GET, "/api/v2/versions/semantic?productName=P1&version=banana", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "InvalidArgument");
}

#[tokio::test]
async fn test_invalid_range_is_400() {
    let db = common::open_db().await;
    let app = api::router(db.data.clone());

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v2/version-ranges",
        Some(json!({
            "name": "backwards",
            "startVersion": "2.0.0.0",
            "endVersion": "1.0.0.0",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "InvalidArgument");
}
