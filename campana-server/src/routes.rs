//! API routes configuration

use actix_web::web;

use crate::handlers;

/// Configure the HTTP routes
///
/// - GET /health - Liveness check
/// - GET /campana?campana_id=... - Campaign documents
/// - GET /estacion?campana_id=... - Station documents of a campaign
///
/// Other methods on these paths are answered with 405. The collection handlers need a
/// `web::Data<CollectionQueryService>` registered on the app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(web::resource("/campana").route(web::get().to(handlers::get_campana)))
        .service(web::resource("/estacion").route(web::get().to(handlers::get_estacion)));
}
