// Integration tests for POST /api/v1/auth/refresh-token.

use std::time::SystemTime;

use actix_web::http::StatusCode;
use actix_web::test;
use auth_backend::auth::{mint_access_token, verify_access_token};
use backend_test_support::envelope::{assert_error_envelope, read_envelope};
use backend_test_support::unique_helpers::unique_email;
use uuid::Uuid;

use crate::support::factory::{post_bearer, sign_up};
use crate::support::{build_test_state, create_test_app};

const REFRESH: &str = "/api/v1/auth/refresh-token";

#[actix_web::test]
async fn test_refresh_without_header() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::post().uri(REFRESH).to_request()).await;
    assert_error_envelope(resp, StatusCode::BAD_REQUEST, "Token does not exist.").await;

    // a non-bearer scheme counts as absent
    let req = test::TestRequest::post()
        .uri(REFRESH)
        .insert_header(("Authorization", "Basic YW5uOnB3"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_envelope(resp, StatusCode::BAD_REQUEST, "Token does not exist.").await;
    Ok(())
}

#[actix_web::test]
async fn test_refresh_rotates_token_once() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let security = state.security.clone();
    let denylist = state.denylist.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let old = sign_up(&app, "Ann Lee", &unique_email("ann")).await;
    let user_id = verify_access_token(&old, SystemTime::now(), &security, &denylist)?;

    let resp = test::call_service(&app, post_bearer(REFRESH, &old)).await;
    let envelope = read_envelope(resp, StatusCode::OK).await;
    assert_eq!(envelope.message, "Token has been refreshed.");
    let fresh = envelope.data.expect("token data").access_token;
    assert_ne!(fresh, old);
    assert_eq!(
        verify_access_token(&fresh, SystemTime::now(), &security, &denylist)?,
        user_id
    );

    let again = test::call_service(&app, post_bearer(REFRESH, &old)).await;
    assert_error_envelope(again, StatusCode::BAD_REQUEST, "The token has been blacklisted").await;
    Ok(())
}

#[actix_web::test]
async fn test_refresh_rejects_foreign_and_stale_tokens() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let security = state.security.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, post_bearer(REFRESH, "not.a.jwt")).await;
    assert_error_envelope(resp, StatusCode::BAD_REQUEST, "Could not decode token.").await;

    let other = auth_backend::SecurityConfig::for_tests();
    let foreign = mint_access_token(Uuid::new_v4(), SystemTime::now(), &other)?;
    let resp = test::call_service(&app, post_bearer(REFRESH, &foreign.access_token)).await;
    assert_error_envelope(
        resp,
        StatusCode::BAD_REQUEST,
        "Token Signature could not be verified.",
    )
    .await;

    let long_ago = SystemTime::now()
        - std::time::Duration::from_secs(security.refresh_ttl_minutes * 60 + 60);
    let stale = mint_access_token(Uuid::new_v4(), long_ago, &security)?;
    let resp = test::call_service(&app, post_bearer(REFRESH, &stale.access_token)).await;
    assert_error_envelope(
        resp,
        StatusCode::BAD_REQUEST,
        "Token has expired and can no longer be refreshed",
    )
    .await;
    Ok(())
}
