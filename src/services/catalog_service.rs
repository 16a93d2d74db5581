use std::sync::Arc;
use tracing::instrument;

use crate::models::{CatalogRecord, CatalogSource, FaqEntry, PackageEntry, RawRecord, ServiceEntry};
use crate::observability::Metrics;
use crate::repositories::DocumentRepository;
use crate::services::defaults::{default_faqs, default_packages, default_services};

/// Reads catalog collections from the store, falling back to the built-in defaults
pub struct CatalogService {
    repository: Arc<dyn DocumentRepository>,
    metrics: Option<Arc<Metrics>>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self {
            repository,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[instrument(skip(self))]
    pub async fn resolve_services(&self) -> Vec<ServiceEntry> {
        self.resolve(default_services()).await.0
    }

    #[instrument(skip(self))]
    pub async fn resolve_packages(&self) -> Vec<PackageEntry> {
        self.resolve(default_packages()).await.0
    }

    #[instrument(skip(self))]
    pub async fn resolve_faqs(&self) -> Vec<FaqEntry> {
        self.resolve(default_faqs()).await.0
    }

    /// One collection, all-or-nothing: either every valid stored entry or the defaults
    async fn resolve<T>(&self, defaults: &'static [T]) -> (Vec<T>, CatalogSource)
    where
        T: CatalogRecord + Clone,
    {
        let collection = T::COLLECTION;

        let (entries, source, reason) = match self.repository.get_documents(collection).await {
            Ok(records) if records.is_empty() => {
                crate::info_with_trace!(collection = %collection, "Collection empty, serving defaults");
                (defaults.to_vec(), CatalogSource::Defaults, "empty")
            }
            Ok(records) => {
                let entries = parse_records::<T>(&records);
                if entries.is_empty() {
                    crate::warn_with_trace!(
                        collection = %collection,
                        records = records.len(),
                        "No valid records in collection, serving defaults"
                    );
                    (defaults.to_vec(), CatalogSource::Defaults, "invalid")
                } else {
                    (entries, CatalogSource::Store, "ok")
                }
            }
            Err(e) => {
                crate::warn_with_trace!(
                    collection = %collection,
                    error = %e,
                    "Collection read failed, serving defaults"
                );
                (defaults.to_vec(), CatalogSource::Defaults, "error")
            }
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_catalog_resolution(collection.as_str(), &source.to_string(), reason);
        }

        (entries, source)
    }
}

/// Parse every record, skipping the ones that fail projection or validation
fn parse_records<T: CatalogRecord>(records: &[RawRecord]) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| match T::from_record(record) {
            Ok(entry) => Some(entry),
            Err(e) => {
                crate::warn_with_trace!(
                    collection = %T::COLLECTION,
                    error = %e,
                    "Skipping invalid record"
                );
                None
            }
        })
        .collect()
}
