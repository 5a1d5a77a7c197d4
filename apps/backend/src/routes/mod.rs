use actix_web::web;

pub mod auth;
pub mod health;

/// Register every route. Shared by `main.rs` and the integration tests so
/// both serve the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .service(web::scope("/api/v1").configure(auth::configure_routes));
}
