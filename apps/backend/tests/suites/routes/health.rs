// GET /health and GET /api/v1/

use actix_web::http::StatusCode;
use actix_web::test;
use auth_backend::state::{AppState, SecurityConfig};
use serde_json::Value;

use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn test_health_reports_db_and_migration() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20250901_000001_create_users");
    assert!(body.get("db_error").is_none());
    assert!(body["time"].as_str().is_some());
    Ok(())
}

#[actix_web::test]
async fn test_health_without_db_still_200() {
    let state = AppState::new_without_db(SecurityConfig::for_tests());
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].is_string());
}

#[actix_web::test]
async fn test_api_root_greets() {
    let state = AppState::new_without_db(SecurityConfig::for_tests());
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "White Lizard Api");
}
