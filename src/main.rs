use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use laserstudio_api::{
    create_app,
    handlers::{ApiState, DiagnosticsState, StoreSummary},
    init_observability,
    observability::DatabaseTracingMiddleware,
    repositories::{DocumentRepository, DynamoDbDocumentRepository, InMemoryDocumentRepository},
    services::{CatalogService, IntakeService, PricingService},
    shutdown_observability, Config, Metrics, RouterSettings, StorageBackend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_environment().context("Failed to load configuration")?;

    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        config.observability.otlp_endpoint.as_deref(),
        &config.observability.log_level,
        config.observability.enable_json_logging,
    )?;

    info!(
        "Starting {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!(
        storage = %config.database.storage,
        table_prefix = %config.database.table_prefix,
        region = %config.database.region,
        "Document store configured"
    );

    let metrics = Arc::new(Metrics::new()?);

    let repository: Arc<dyn DocumentRepository> = match config.database.storage {
        StorageBackend::DynamoDb => {
            let client = Arc::new(config.database.dynamodb_client().await);
            Arc::new(
                DynamoDbDocumentRepository::new(
                    client,
                    config.database.table_prefix.clone(),
                    config.database.region.clone(),
                )
                .with_tracing(DatabaseTracingMiddleware::new(metrics.clone())),
            )
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store; submissions are lost on restart");
            Arc::new(InMemoryDocumentRepository::new())
        }
    };

    let catalog_service =
        Arc::new(CatalogService::new(repository.clone()).with_metrics(metrics.clone()));
    let pricing_service =
        Arc::new(PricingService::new(catalog_service.clone()).with_metrics(metrics.clone()));
    let intake_service =
        Arc::new(IntakeService::new(repository.clone()).with_metrics(metrics.clone()));

    let store = StoreSummary {
        backend: config.database.storage.to_string(),
        table_prefix_set: !config.database.table_prefix.is_empty(),
        region_set: !config.database.region.is_empty(),
        endpoint_url_set: config.database.endpoint_url.is_some(),
    };

    let app = create_app(
        metrics,
        ApiState::new(catalog_service, pricing_service, intake_service),
        DiagnosticsState { repository, store },
        RouterSettings {
            request_timeout: config.server.request_timeout(),
            max_request_size: config.server.max_request_size,
        },
    );

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .with_context(|| format!("Invalid host address: {}", config.server.host))?,
        config.server.port,
    );
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
    shutdown_observability().await;
}
