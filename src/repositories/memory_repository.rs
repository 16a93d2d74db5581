//! In-memory document store for local development and tests

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::document_repository::{json_kind, DocumentRepository, ID_ATTRIBUTE};
use crate::models::{Collection, RawRecord, RepositoryError, RepositoryResult};

pub struct InMemoryDocumentRepository {
    collections: RwLock<HashMap<Collection, Vec<RawRecord>>>,
    unavailable: bool,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            unavailable: false,
        }
    }

    /// A store that fails every call, as when no database client could be built
    pub fn unavailable() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            unavailable: true,
        }
    }

    /// Seed a collection with raw documents, stored as given
    pub fn with_documents(mut self, collection: Collection, documents: Vec<Value>) -> Self {
        let records = documents
            .into_iter()
            .filter_map(|document| match document {
                Value::Object(record) => Some(record),
                _ => None,
            });
        self.collections
            .get_mut()
            .entry(collection)
            .or_default()
            .extend(records);
        self
    }

    /// Number of documents currently held in a collection
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    fn ensure_available(&self) -> RepositoryResult<()> {
        if self.unavailable {
            return Err(RepositoryError::Unavailable {
                message: "in-memory store is configured as unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryDocumentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self), fields(collection = %collection))]
    async fn get_documents(&self, collection: Collection) -> RepositoryResult<Vec<RawRecord>> {
        self.ensure_available()?;
        let collections = self.collections.read().await;
        let documents = collections.get(&collection).cloned().unwrap_or_default();
        debug!("Read {} documents", documents.len());
        Ok(documents)
    }

    #[instrument(skip(self, document), fields(collection = %collection))]
    async fn create_document(
        &self,
        collection: Collection,
        document: Value,
    ) -> RepositoryResult<String> {
        self.ensure_available()?;

        let mut record = match document {
            Value::Object(record) => record,
            other => {
                return Err(RepositoryError::InvalidDocument {
                    message: format!("expected a JSON object, got {}", json_kind(&other)),
                })
            }
        };

        let id = Uuid::new_v4().to_string();
        record.insert(ID_ATTRIBUTE.to_string(), Value::String(id.clone()));

        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(record);

        debug!(id = %id, "Document stored");
        Ok(id)
    }

    async fn list_collections(&self) -> RepositoryResult<Vec<String>> {
        self.ensure_available()?;
        let collections = self.collections.read().await;
        let mut names: Vec<String> = collections
            .iter()
            .filter(|(_, documents)| !documents.is_empty())
            .map(|(collection, _)| collection.to_string())
            .collect();
        names.sort();
        Ok(names)
    }
}
