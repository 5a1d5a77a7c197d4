// Integration tests for POST /api/v1/auth/logout.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::envelope::{assert_error_envelope, read_envelope};
use backend_test_support::unique_helpers::unique_email;

use crate::support::factory::{post_bearer, sign_up};
use crate::support::{build_test_state, create_test_app};

const LOGOUT: &str = "/api/v1/auth/logout";

#[actix_web::test]
async fn test_logout_is_idempotent_and_revokes() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;
    let token = sign_up(&app, "Ann Lee", &unique_email("ann")).await;

    for _ in 0..2 {
        let resp = test::call_service(&app, post_bearer(LOGOUT, &token)).await;
        let envelope = read_envelope(resp, StatusCode::OK).await;
        assert_eq!(envelope.message, "Logout successfully.");
        assert!(envelope.data.is_none());
    }

    let resp = test::call_service(&app, post_bearer("/api/v1/auth/refresh-token", &token)).await;
    assert_error_envelope(resp, StatusCode::BAD_REQUEST, "The token has been blacklisted").await;
    Ok(())
}

#[actix_web::test]
async fn test_logout_without_or_with_garbage_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::post().uri(LOGOUT).to_request()).await;
    read_envelope(resp, StatusCode::OK).await;

    let resp = test::call_service(&app, post_bearer(LOGOUT, "garbage")).await;
    read_envelope(resp, StatusCode::OK).await;
    Ok(())
}
