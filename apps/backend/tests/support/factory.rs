use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use backend_test_support::envelope::read_envelope;
use serde_json::{json, Value};

pub const GOOD_PASSWORD: &str = "Secret#123";

pub fn sign_up_body(name: &str, email: &str) -> Value {
    json!({"name": name, "email": email, "password": GOOD_PASSWORD})
}

pub fn post_json(uri: &str, body: &Value) -> Request {
    test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request()
}

pub fn post_bearer(uri: &str, token: &str) -> Request {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request()
}

/// Sign up a fresh user and return their access token.
pub async fn sign_up<S>(app: &S, name: &str, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, post_json("/api/v1/auth/signup", &sign_up_body(name, email))).await;
    let envelope = read_envelope(resp, StatusCode::OK).await;
    envelope.data.expect("sign-up returns a token").access_token
}
