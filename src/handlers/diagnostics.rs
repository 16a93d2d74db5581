use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::models::collection_schemas;
use crate::repositories::DocumentRepository;

/// Maximum length of a store error echoed back by `/test`
const MAX_ERROR_DETAIL: usize = 80;

/// Which store backs the service and which of its settings are present
#[derive(Debug, Clone, Serialize)]
pub struct StoreSummary {
    pub backend: String,
    pub table_prefix_set: bool,
    pub region_set: bool,
    pub endpoint_url_set: bool,
}

#[derive(Clone)]
pub struct DiagnosticsState {
    pub repository: Arc<dyn DocumentRepository>,
    pub store: StoreSummary,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub backend: &'static str,
    pub database: String,
    pub connection_status: &'static str,
    pub store: StoreSummary,
    pub collections: Vec<String>,
}

pub fn create_diagnostics_router(state: DiagnosticsState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(test_database))
        .route("/schema", get(schema))
        .with_state(state)
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Laserontharing Almere Backend Running" }))
}

/// Probe the store by listing its collections
#[instrument(name = "test_database", skip(state))]
pub async fn test_database(State(state): State<DiagnosticsState>) -> Json<DiagnosticsReport> {
    let (database, connection_status, collections) = match state.repository.list_collections().await
    {
        Ok(collections) => ("connected & working".to_string(), "connected", collections),
        Err(e) => {
            warn!(error = %e, "Store diagnostics failed");
            let detail: String = e.to_string().chars().take(MAX_ERROR_DETAIL).collect();
            (format!("error: {}", detail), "not connected", Vec::new())
        }
    };

    Json(DiagnosticsReport {
        backend: "running",
        database,
        connection_status,
        store: state.store.clone(),
        collections,
    })
}

pub async fn schema() -> Json<Value> {
    Json(collection_schemas())
}
