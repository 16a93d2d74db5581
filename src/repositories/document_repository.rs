use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::{Client as DynamoDbClient, Error as DynamoDbError};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::{Collection, RawRecord, RepositoryError, RepositoryResult};
use crate::observability::DatabaseTracingMiddleware;

/// Attribute holding the generated document id
pub const ID_ATTRIBUTE: &str = "id";

/// Document store interface consumed by the catalog and intake services
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Read every document in a collection. An empty collection is `Ok(vec![])`.
    async fn get_documents(&self, collection: Collection) -> RepositoryResult<Vec<RawRecord>>;

    /// Store a new document and return its generated id
    async fn create_document(&self, collection: Collection, document: Value)
        -> RepositoryResult<String>;

    /// Names of the collections the store currently holds
    async fn list_collections(&self) -> RepositoryResult<Vec<String>>;
}

/// DynamoDB-backed store: one table per collection, `<prefix><collection>`, keyed on `id`
pub struct DynamoDbDocumentRepository {
    client: Arc<DynamoDbClient>,
    table_prefix: String,
    region: String,
    tracing: Option<DatabaseTracingMiddleware>,
}

impl DynamoDbDocumentRepository {
    pub fn new(client: Arc<DynamoDbClient>, table_prefix: String, region: String) -> Self {
        Self {
            client,
            table_prefix,
            region,
            tracing: None,
        }
    }

    /// Record database metrics for every call
    pub fn with_tracing(mut self, tracing: DatabaseTracingMiddleware) -> Self {
        self.tracing = Some(tracing);
        self
    }

    pub fn table_name(&self, collection: Collection) -> String {
        format!("{}{}", self.table_prefix, collection)
    }

    fn dynamodb_span(&self, operation: &str, table_name: &str) -> tracing::Span {
        tracing::info_span!(
            "DynamoDB",
            "otel.kind" = "client",
            "otel.name" = format!("DynamoDB.{}", operation),
            "db.system" = "dynamodb",
            "db.operation" = operation,
            "db.name" = %table_name,
            "aws.region" = %self.region,
        )
    }

    async fn traced<F, T>(&self, operation: &str, collection: &str, future: F) -> RepositoryResult<T>
    where
        F: Future<Output = RepositoryResult<T>>,
    {
        match &self.tracing {
            Some(tracing) => tracing.trace_operation(operation, collection, future).await,
            None => future.await,
        }
    }

    async fn scan_table(&self, table_name: &str) -> RepositoryResult<Vec<RawRecord>> {
        let mut records = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let response = self
                .client
                .scan()
                .table_name(table_name)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await
                .map_err(|e| map_sdk_error(table_name, e))?;

            if let Some(items) = response.items {
                records.extend(items.iter().map(item_to_record));
            }

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl DocumentRepository for DynamoDbDocumentRepository {
    #[instrument(skip(self), fields(collection = %collection))]
    async fn get_documents(&self, collection: Collection) -> RepositoryResult<Vec<RawRecord>> {
        let table_name = self.table_name(collection);
        let span = self.dynamodb_span("Scan", &table_name);

        let records = tracing::Instrument::instrument(
            self.traced("scan", collection.as_str(), self.scan_table(&table_name)),
            span,
        )
        .await?;

        info!("Read {} documents from {}", records.len(), table_name);
        Ok(records)
    }

    #[instrument(skip(self, document), fields(collection = %collection))]
    async fn create_document(
        &self,
        collection: Collection,
        document: Value,
    ) -> RepositoryResult<String> {
        let table_name = self.table_name(collection);
        let id = Uuid::new_v4().to_string();
        let item = document_to_item(document, &id)?;
        let span = self.dynamodb_span("PutItem", &table_name);

        let put = async {
            self.client
                .put_item()
                .table_name(&table_name)
                .set_item(Some(item))
                .condition_expression("attribute_not_exists(id)")
                .send()
                .await
                .map_err(|e| map_sdk_error(&table_name, e))
                .map(|_| ())
        };

        tracing::Instrument::instrument(self.traced("put_item", collection.as_str(), put), span)
            .await?;

        info!(id = %id, "Document created in {}", table_name);
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_collections(&self) -> RepositoryResult<Vec<String>> {
        let mut collections = Vec::new();
        let mut start_table_name = None;

        loop {
            let response = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start_table_name.take())
                .send()
                .await
                .map_err(|e| map_sdk_error("*", e))?;

            if let Some(names) = response.table_names {
                collections.extend(collections_from_tables(&self.table_prefix, &names));
            }

            match response.last_evaluated_table_name {
                Some(name) => start_table_name = Some(name),
                None => break,
            }
        }

        Ok(collections)
    }
}

/// Translate an SDK failure: timeouts and connection failures map to their own
/// variants, service responses are classified by DynamoDB error code.
pub fn map_sdk_error<E, R>(table_name: &str, error: SdkError<E, R>) -> RepositoryError
where
    DynamoDbError: From<SdkError<E, R>>,
{
    match &error {
        SdkError::TimeoutError(_) => return RepositoryError::Timeout,
        SdkError::DispatchFailure(failure) if failure.is_timeout() => {
            return RepositoryError::Timeout
        }
        SdkError::DispatchFailure(_) => return RepositoryError::ConnectionFailed,
        _ => {}
    }

    match DynamoDbError::from(error) {
        DynamoDbError::ResourceNotFoundException(_) => RepositoryError::TableNotFound {
            table_name: table_name.to_string(),
        },
        DynamoDbError::ConditionalCheckFailedException(e) => RepositoryError::ConstraintViolation {
            message: e.to_string(),
        },
        other => RepositoryError::AwsSdk {
            message: other.to_string(),
        },
    }
}

/// Collection names behind the tables carrying `prefix`; foreign tables are ignored
pub fn collections_from_tables(prefix: &str, table_names: &[String]) -> Vec<String> {
    table_names
        .iter()
        .filter_map(|name| name.strip_prefix(prefix))
        .filter_map(|name| name.parse::<Collection>().ok())
        .map(|collection| collection.to_string())
        .collect()
}

/// Convert a DynamoDB item to a JSON object
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> RawRecord {
    item.iter()
        .map(|(key, value)| (key.clone(), attribute_to_json(value)))
        .collect()
}

pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(item_to_record(map)),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_to_json(n)).collect()),
        // Binary attributes have no JSON form
        _ => Value::Null,
    }
}

fn number_to_json(n: &str) -> Value {
    if let Ok(integer) = n.parse::<i64>() {
        return Value::from(integer);
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(key, value)| (key.clone(), json_to_attribute(value)))
                .collect(),
        ),
    }
}

/// Build a DynamoDB item from a JSON object document, setting the generated id
pub fn document_to_item(
    document: Value,
    id: &str,
) -> RepositoryResult<HashMap<String, AttributeValue>> {
    let mut object: Map<String, Value> = match document {
        Value::Object(object) => object,
        other => {
            return Err(RepositoryError::InvalidDocument {
                message: format!("expected a JSON object, got {}", json_kind(&other)),
            })
        }
    };
    object.insert(ID_ATTRIBUTE.to_string(), Value::String(id.to_string()));

    Ok(object
        .iter()
        .map(|(key, value)| (key.clone(), json_to_attribute(value)))
        .collect())
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
