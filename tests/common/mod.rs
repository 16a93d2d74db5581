use std::sync::Arc;
use std::time::Duration;

use laserstudio_api::{
    create_app,
    handlers::{ApiState, DiagnosticsState, StoreSummary},
    repositories::{DocumentRepository, InMemoryDocumentRepository},
    services::{CatalogService, IntakeService, PricingService},
    Metrics, RouterSettings,
};
use reqwest::Client;
use tokio::net::TcpListener;

/// The real router served on an ephemeral port, backed by an in-memory store
pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
    pub repository: Arc<InMemoryDocumentRepository>,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        Self::with_repository(InMemoryDocumentRepository::new()).await
    }

    pub async fn with_repository(repository: InMemoryDocumentRepository) -> Self {
        let repository = Arc::new(repository);
        let store: Arc<dyn DocumentRepository> = repository.clone();
        let metrics = Arc::new(Metrics::new().expect("metrics registry"));

        let catalog_service =
            Arc::new(CatalogService::new(store.clone()).with_metrics(metrics.clone()));
        let pricing_service =
            Arc::new(PricingService::new(catalog_service.clone()).with_metrics(metrics.clone()));
        let intake_service =
            Arc::new(IntakeService::new(store.clone()).with_metrics(metrics.clone()));

        let app = create_app(
            metrics,
            ApiState::new(catalog_service, pricing_service, intake_service),
            DiagnosticsState {
                repository: store,
                store: StoreSummary {
                    backend: "memory".to_string(),
                    table_prefix_set: true,
                    region_set: true,
                    endpoint_url_set: false,
                },
            },
            RouterSettings {
                request_timeout: Duration::from_secs(5),
                max_request_size: 64 * 1024,
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("http client"),
            base_url: format!("http://{}", addr),
            repository,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
