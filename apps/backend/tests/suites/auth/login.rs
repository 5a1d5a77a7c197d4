// Integration tests for POST /api/v1/auth/login.

use std::time::SystemTime;

use actix_web::http::StatusCode;
use actix_web::test;
use auth_backend::auth::verify_access_token;
use backend_test_support::envelope::{assert_error_envelope, read_envelope};
use backend_test_support::unique_helpers::unique_email;
use serde_json::json;

use crate::support::factory::{post_json, sign_up, GOOD_PASSWORD};
use crate::support::{build_test_state, create_test_app};

const LOGIN: &str = "/api/v1/auth/login";

#[actix_web::test]
async fn test_login_token_verifies_to_signed_up_user() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let security = state.security.clone();
    let denylist = state.denylist.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let email = unique_email("ann");
    let sign_up_token = sign_up(&app, "Ann Lee", &email).await;

    let resp = test::call_service(
        &app,
        post_json(LOGIN, &json!({"email": email, "password": GOOD_PASSWORD})),
    )
    .await;
    let envelope = read_envelope(resp, StatusCode::OK).await;
    assert_eq!(envelope.message, "Login successfully.");
    let data = envelope.data.expect("token data");
    assert_eq!(data.token_type, "bearer");

    let now = SystemTime::now();
    assert_eq!(
        verify_access_token(&data.access_token, now, &security, &denylist)?,
        verify_access_token(&sign_up_token, now, &security, &denylist)?
    );
    Ok(())
}

#[actix_web::test]
async fn test_wrong_password_and_unknown_email_are_identical() -> Result<(), Box<dyn std::error::Error>>
{
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let email = unique_email("ann");
    sign_up(&app, "Ann Lee", &email).await;

    let wrong = test::call_service(
        &app,
        post_json(LOGIN, &json!({"email": email, "password": "Wrong#123"})),
    )
    .await;
    assert_error_envelope(wrong, StatusCode::BAD_REQUEST, "Incorrect email or password").await;

    let unknown = test::call_service(
        &app,
        post_json(
            LOGIN,
            &json!({"email": unique_email("nobody"), "password": GOOD_PASSWORD}),
        ),
    )
    .await;
    assert_error_envelope(unknown, StatusCode::BAD_REQUEST, "Incorrect email or password").await;
    Ok(())
}

#[actix_web::test]
async fn test_login_validation() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, post_json(LOGIN, &json!({"email": "ann@example.com"}))).await;
    assert_error_envelope(resp, StatusCode::BAD_REQUEST, "The password field is required.").await;

    let resp = test::call_service(&app, post_json(LOGIN, &json!({"email": 7, "password": "x"}))).await;
    assert_error_envelope(
        resp,
        StatusCode::BAD_REQUEST,
        "The email field must be a valid email address.",
    )
    .await;
    Ok(())
}
