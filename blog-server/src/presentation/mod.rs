pub mod http_handlers;
pub mod payload;

use crate::domain::DomainError;
use actix_web::{error, web};
use payload::BODY_LIMIT;

/// Registers the `/blogs` routes. Fixed paths come before `{id}` so that
/// `all` is never read as an id.
///
/// JSON, form and raw body limits are the same so a post is accepted or
/// refused regardless of how it was encoded.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blogs")
            .app_data(web::PayloadConfig::new(BODY_LIMIT))
            .app_data(web::JsonConfig::default().limit(BODY_LIMIT))
            .app_data(web::FormConfig::default().limit(BODY_LIMIT))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let response =
                    http_handlers::error_to_response(DomainError::InvalidInput(err.to_string()));
                error::InternalError::from_response(err, response).into()
            }))
            .route("/all", web::get().to(http_handlers::list_blogs))
            .route("/all", web::delete().to(http_handlers::delete_all_blogs))
            .route("/create", web::post().to(http_handlers::create_blog))
            .route("/save", web::post().to(http_handlers::save_blog))
            .route("/{id}", web::get().to(http_handlers::get_blog))
            .route("/{id}", web::delete().to(http_handlers::delete_blog)),
    );
}
