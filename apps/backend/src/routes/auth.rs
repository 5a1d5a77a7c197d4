use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::{BearerToken, ValidatedJson};
use crate::http::Envelope;
use crate::services::auth::{
    self as auth_service, CURRENT_USER_MESSAGE, LOGIN_MESSAGE, LOGOUT_MESSAGE, REFRESH_MESSAGE,
    SIGN_UP_MESSAGE,
};
use crate::state::app_state::AppState;

pub const GREETING: &str = "White Lizard Api";

async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(GREETING)
}

async fn signup(
    body: ValidatedJson<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let issued = auth_service::sign_up(&app_state, &body).await?;
    Ok(Envelope::with_token(SIGN_UP_MESSAGE, issued).into_response())
}

async fn login(
    body: ValidatedJson<Value>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let issued = auth_service::login(&app_state, &body).await?;
    Ok(Envelope::with_token(LOGIN_MESSAGE, issued).into_response())
}

async fn logout(bearer: BearerToken, app_state: web::Data<AppState>) -> HttpResponse {
    auth_service::logout(&app_state, bearer.as_deref());
    Envelope::ok(LOGOUT_MESSAGE).into_response()
}

async fn refresh_token(
    bearer: BearerToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let issued = auth_service::refresh_token(&app_state, bearer.as_deref())?;
    Ok(Envelope::with_token(REFRESH_MESSAGE, issued).into_response())
}

async fn current_user(
    bearer: BearerToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service::current_user(&app_state, bearer.as_deref()).await?;
    Ok(Envelope::with_user(CURRENT_USER_MESSAGE, user).into_response())
}

/// Routes under `/api/v1`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/user", web::get().to(current_user))
        .service(
            web::scope("/auth")
                .route("/signup", web::post().to(signup))
                .route("/login", web::post().to(login))
                .route("/logout", web::post().to(logout))
                .route("/refresh-token", web::post().to(refresh_token)),
        );
}
