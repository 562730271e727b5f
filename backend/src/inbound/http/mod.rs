//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::{HttpResponse, get, web};

pub mod auth;
pub mod error;
pub mod health;
pub mod patterns;
pub mod schemas;
pub mod secrets;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use auth::AuthenticatedUser;
pub use error::ApiResult;
pub use health::HealthState;
pub use state::HttpState;

/// Plain-text greeting on `/`.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello knitting world")
}

/// Register extractor configuration and every API route.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
///
/// let app = App::new().configure(backend::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(index)
        .service(users::register)
        .service(users::sign_in)
        .service(secrets::secrets)
        .service(patterns::list_patterns)
        .service(patterns::create_pattern)
        .service(patterns::like_pattern)
        .service(patterns::comment_on_pattern)
        .service(patterns::delete_pattern)
        .service(health::ready)
        .service(health::live);
}
