use actix_cors::Cors;

/// CORS policy for the browser client: a single origin, any method or header, credentials allowed.
pub fn build(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}
