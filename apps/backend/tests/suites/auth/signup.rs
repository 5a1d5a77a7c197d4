// Integration tests for POST /api/v1/auth/signup.

use std::time::SystemTime;

use actix_web::http::StatusCode;
use actix_web::test;
use auth_backend::auth::verify_access_token;
use auth_backend::infra::require_db;
use auth_backend::repos::users;
use backend_test_support::envelope::{assert_error_envelope, read_envelope};
use backend_test_support::unique_helpers::unique_email;
use serde_json::json;

use crate::support::factory::{post_json, sign_up_body};
use crate::support::{build_test_state, create_test_app};

const SIGNUP: &str = "/api/v1/auth/signup";

#[actix_web::test]
async fn test_sign_up_returns_bearer_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let security = state.security.clone();
    let denylist = state.denylist.clone();
    let db = require_db(&state)?.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let email = unique_email("ann");
    let resp = test::call_service(&app, post_json(SIGNUP, &sign_up_body("Ann Lee", &email))).await;
    let envelope = read_envelope(resp, StatusCode::OK).await;

    assert_eq!(envelope.message, "User created successfully.");
    let data = envelope.data.expect("token data");
    assert_eq!(data.token_type, "bearer");
    assert_eq!(data.expires_in, security.access_ttl_minutes * 60);

    let user_id = verify_access_token(&data.access_token, SystemTime::now(), &security, &denylist)?;
    let stored = users::find_user_by_email(&db, &email).await?.expect("user stored");
    assert_eq!(stored.id, user_id);
    assert_eq!(stored.name, "Ann Lee");
    assert!(stored.password_hash.starts_with("$argon2id$"));
    Ok(())
}

#[actix_web::test]
async fn test_duplicate_email_rejected_once_stored() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let email = unique_email("dup");
    let first = test::call_service(&app, post_json(SIGNUP, &sign_up_body("Ann Lee", &email))).await;
    read_envelope(first, StatusCode::OK).await;

    let second = test::call_service(&app, post_json(SIGNUP, &sign_up_body("Ann Other", &email))).await;
    assert_error_envelope(second, StatusCode::BAD_REQUEST, "The email has already been taken.").await;

    let stored = users::find_user_by_email(&db, &email).await?.expect("user stored");
    assert_eq!(stored.name, "Ann Lee");
    Ok(())
}

#[actix_web::test]
async fn test_empty_body_reports_first_error_and_count() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, post_json(SIGNUP, &json!({}))).await;
    assert_error_envelope(
        resp,
        StatusCode::BAD_REQUEST,
        "The name field is required. (and 2 more errors)",
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn test_weak_password_rejected_without_creating_user() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let db = require_db(&state)?.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let email = unique_email("weak");
    let body = json!({"name": "Ann Lee", "email": email, "password": "password"});
    let resp = test::call_service(&app, post_json(SIGNUP, &body)).await;
    assert_error_envelope(
        resp,
        StatusCode::BAD_REQUEST,
        "The password field must contain at least one uppercase and one lowercase letter. (and 2 more errors)",
    )
    .await;

    assert!(!users::email_exists(&db, &email).await?);
    Ok(())
}

#[actix_web::test]
async fn test_invalid_email_and_short_name() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let body = json!({"name": "Al", "email": "not-an-email", "password": "Secret#123"});
    let resp = test::call_service(&app, post_json(SIGNUP, &body)).await;
    assert_error_envelope(
        resp,
        StatusCode::BAD_REQUEST,
        "The name field must be at least 3 characters. (and 1 more error)",
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn test_malformed_json_is_400_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri(SIGNUP)
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"name": "Ann""#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let envelope = read_envelope(resp, StatusCode::BAD_REQUEST).await;
    assert!(envelope.message.starts_with("Invalid JSON"));
    Ok(())
}
