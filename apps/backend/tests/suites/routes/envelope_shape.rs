// Error envelopes carry the request's trace id; store outages are 500s.

use actix_web::http::StatusCode;
use actix_web::test;
use auth_backend::state::{AppState, SecurityConfig};
use backend_test_support::envelope::{assert_error_envelope, read_envelope};
use serde_json::json;

use crate::support::create_test_app;
use crate::support::factory::post_json;

#[actix_web::test]
async fn test_error_trace_id_matches_request_id() {
    let state = AppState::new_without_db(SecurityConfig::for_tests());
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh-token")
        .insert_header(("x-request-id", "req-abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-abc-123");
    assert_eq!(resp.headers().get("x-trace-id").unwrap(), "req-abc-123");
    read_envelope(resp, StatusCode::BAD_REQUEST).await;
}

#[actix_web::test]
async fn test_missing_store_is_500_with_generic_message() {
    let state = AppState::new_without_db(SecurityConfig::for_tests());
    let app = create_test_app(state).with_prod_routes().build().await;

    let body = json!({"email": "ann@example.com", "password": "Secret#123"});
    let resp = test::call_service(&app, post_json("/api/v1/auth/login", &body)).await;
    assert_error_envelope(resp, StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable").await;
}
