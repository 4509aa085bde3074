//! Middleware constructors for the Actix application.
//!
//! 1. **CORS**: open to any origin, read-only methods
//! 2. **Logger**: request/response logging through the `log` bridge

use actix_cors::Cors;
use actix_web::middleware;

/// Build the CORS policy: any origin, `GET` only, any header.
pub fn build_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET"])
        .allow_any_header()
}

/// Build the request logger middleware.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::new(r#"%a "%r" %s %b %Dms"#)
}
