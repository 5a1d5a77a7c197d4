// Integration tests for GET /api/v1/user.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::envelope::{assert_error_envelope, read_envelope_as};
use backend_test_support::unique_helpers::unique_email;
use serde_json::Value;

use crate::support::factory::{post_bearer, sign_up};
use crate::support::{build_test_state, create_test_app};

const USER: &str = "/api/v1/user";

fn get_bearer(token: &str) -> actix_http::Request {
    test::TestRequest::get()
        .uri(USER)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request()
}

#[actix_web::test]
async fn test_current_user_returns_public_fields() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;
    let email = unique_email("ann");
    let token = sign_up(&app, "Ann Lee", &email).await;

    let resp = test::call_service(&app, get_bearer(&token)).await;
    let envelope = read_envelope_as::<Value>(resp, StatusCode::OK).await;
    assert_eq!(envelope.message, "User retrieved successfully.");

    let data = envelope.data.expect("user data");
    assert_eq!(data["name"], "Ann Lee");
    assert_eq!(data["email"], email.as_str());
    assert!(data["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(data.get("password_hash").is_none());
    Ok(())
}

#[actix_web::test]
async fn test_current_user_requires_valid_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri(USER).to_request()).await;
    assert_error_envelope(resp, StatusCode::BAD_REQUEST, "Token does not exist.").await;

    let resp = test::call_service(&app, get_bearer("garbage")).await;
    assert_error_envelope(resp, StatusCode::BAD_REQUEST, "Could not decode token.").await;
    Ok(())
}

#[actix_web::test]
async fn test_current_user_after_logout_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;
    let token = sign_up(&app, "Ann Lee", &unique_email("ann")).await;

    let resp = test::call_service(&app, post_bearer("/api/v1/auth/logout", &token)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, get_bearer(&token)).await;
    assert_error_envelope(resp, StatusCode::BAD_REQUEST, "The token has been blacklisted").await;
    Ok(())
}
