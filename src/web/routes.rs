use actix_web::web;
use crate::web::{error, handlers};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/generate", web::post().to(handlers::generate))
            .route("/analyze", web::post().to(handlers::analyze))
    )
    .route("/", web::get().to(handlers::index));
}

// JSON extractor settings shared by every route that takes a body
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(error::json_error_handler)
}
