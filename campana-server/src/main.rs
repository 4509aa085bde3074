// campana server entrypoint

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};

use campana_core::{backend::StoreBackendBuilder, service::CollectionQueryService};
use campana_mongodb::MongoDbStore;
use campana_server::{config::ServerConfig, logging, middleware, routes};

#[actix_web::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env().context("Server cannot start without valid configuration")?;

    // Logging before any other side effects
    logging::init_logging(&config.log_level, config.log_format)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        database = %config.credentials.database,
        "Starting campana server"
    );

    let store = MongoDbStore::from_credentials(&config.credentials)
        .build()
        .await
        .context("Failed to create the document store client")?;
    let service = web::Data::new(CollectionQueryService::new(Arc::new(store)));

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(middleware::build_cors())
            .wrap(middleware::request_logger())
            .configure(routes::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}
