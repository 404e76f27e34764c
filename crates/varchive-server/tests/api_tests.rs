//! Integration tests for routing and the response contract
//!
//! These tests exercise the HTTP surface without a live database: pools are
//! created lazily and the tested paths answer before any connection is
//! opened (banner, 404s, species routing failures, parameter validation).

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt; // for `oneshot`

use varchive_server::{
    api,
    config::{Config, VariantDbConfig},
    features::FeatureState,
    VariantDbRouter,
};

fn test_app_with(config: &Config) -> axum::Router {
    let archive = PgPool::connect_lazy("postgresql://localhost/varchive_test")
        .expect("valid archive URL");

    let variant_config = VariantDbConfig {
        base_url: "postgresql://localhost".to_string(),
        database_prefix: "eva_".to_string(),
        max_connections: 2,
        species_override: None,
    };
    let variants = VariantDbRouter::new(&variant_config, ["hsapiens_grch38", "mmusculus_grcm38"]);

    let state = FeatureState {
        archive,
        variants: Arc::new(variants),
    };

    api::create_router(state, config)
}

fn test_app() -> axum::Router {
    test_app_with(&Config::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Varchive Server");
    assert_eq!(json["status"], "running");
}

#[tokio::test]
async fn test_404_not_found() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/meta/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_species_answers_not_found_envelope() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/meta/studies/list?species=ggallus_galgal5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["version"], "v1");
    assert!(json["time"].is_u64());

    let result = &json["response"][0];
    assert_eq!(result["numResults"], 0);
    assert_eq!(result["numTotalResults"], 0);
    assert!(result["result"].as_array().unwrap().is_empty());
    assert_eq!(
        result["errorMsg"],
        "Species 'ggallus_galgal5' not found"
    );
}

#[tokio::test]
async fn test_missing_species_parameter_is_bad_request() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/meta/studies/list")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["response"][0]["errorMsg"]
        .as_str()
        .unwrap()
        .contains("not found"));
}

#[tokio::test]
async fn test_study_files_unknown_species() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/studies/PRJEB1234/files?species=unmapped_species")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["version"], "v1");
    assert_eq!(
        json["response"][0]["errorMsg"],
        "Species 'unmapped_species' not found"
    );
}

#[tokio::test]
async fn test_study_view_requires_species() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/studies/PRJEB1234/view")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wildcard_cors_with_credentials_still_serves() {
    let mut config = Config::default();
    config.cors.allowed_origins = vec!["*".to_string()];
    config.cors.allow_credentials = true;

    let app = test_app_with(&config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_pagination_is_rejected_before_querying() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/meta/species/list?offset=-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Offset"));
}
