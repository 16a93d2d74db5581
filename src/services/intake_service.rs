use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    BookingRequest, Collection, InquiryRequest, RepositoryError, ServiceResult, Validate,
};
use crate::observability::Metrics;
use crate::repositories::DocumentRepository;

/// Stores booking and contact form submissions
pub struct IntakeService {
    repository: Arc<dyn DocumentRepository>,
    metrics: Option<Arc<Metrics>>,
}

impl IntakeService {
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

    /// Validate and store a booking, returning the generated id
    #[instrument(skip(self, request), fields(booking_type = %request.booking_type))]
    pub async fn create_booking(&self, request: BookingRequest) -> ServiceResult<String> {
        self.submit(Collection::Booking, request.stamped(Utc::now())).await
    }

    /// Validate and store a contact inquiry, returning the generated id
    #[instrument(skip(self, request))]
    pub async fn create_inquiry(&self, request: InquiryRequest) -> ServiceResult<String> {
        self.submit(Collection::Inquiry, request.stamped(Utc::now())).await
    }

    async fn submit<T>(&self, collection: Collection, submission: T) -> ServiceResult<String>
    where
        T: Serialize + Validate,
    {
        let result = self.store(collection, &submission).await;

        if let Some(metrics) = &self.metrics {
            metrics.record_intake_submission(collection.as_str(), result.is_ok());
        }

        match &result {
            Ok(id) => crate::info_with_trace!(collection = %collection, id = %id, "Submission stored"),
            Err(e) => crate::warn_with_trace!(collection = %collection, error = %e, "Submission rejected"),
        }

        result
    }

    async fn store<T>(&self, collection: Collection, submission: &T) -> ServiceResult<String>
    where
        T: Serialize + Validate,
    {
        submission.validate()?;

        let document = serde_json::to_value(submission).map_err(RepositoryError::from)?;

        let id = self.repository.create_document(collection, document).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingType, RawRecord, RepositoryResult, ServiceError};
    use crate::repositories::InMemoryDocumentRepository;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use mockall::mock;
    use mockall::predicate::{always, eq};
    use serde_json::{json, Value};

    mock! {
        TestDocumentRepository {}

        #[async_trait]
        impl DocumentRepository for TestDocumentRepository {
            async fn get_documents(&self, collection: Collection) -> RepositoryResult<Vec<RawRecord>>;
            async fn create_document(&self, collection: Collection, document: Value) -> RepositoryResult<String>;
            async fn list_collections(&self) -> RepositoryResult<Vec<String>>;
        }
    }

    fn create_test_booking() -> BookingRequest {
        BookingRequest {
            booking_type: BookingType::Intake,
            name: "Sanne de Vries".to_string(),
            email: "sanne@example.nl".to_string(),
            phone: "0612345678".to_string(),
            date: "2025-03-14".to_string(),
            time: "10:30".to_string(),
            selected_codes: vec!["OKS".to_string()],
            notes: None,
            created_at: None,
        }
    }

    fn create_test_inquiry() -> InquiryRequest {
        InquiryRequest {
            name: "Mark".to_string(),
            email: "mark@example.nl".to_string(),
            phone: None,
            subject: "Prijzen".to_string(),
            message: "Wat kost een full body behandeling?".to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_booking_success() {
        let mut mock_repo = MockTestDocumentRepository::new();
        mock_repo
            .expect_create_document()
            .with(eq(Collection::Booking), always())
            .times(1)
            .returning(|_, document| {
                assert_eq!(document["type"], json!("intake"));
                assert_eq!(document["selected_codes"], json!(["OKS"]));
                assert!(document["created_at"].is_string());
                Ok("booking-1".to_string())
            });

        let service = IntakeService::new(Arc::new(mock_repo));
        let id = service.create_booking(create_test_booking()).await.unwrap();
        assert_eq!(id, "booking-1");
    }

    #[tokio::test]
    async fn test_create_booking_keeps_client_timestamp() {
        let repo = Arc::new(InMemoryDocumentRepository::new());
        let service = IntakeService::new(repo.clone());

        let mut booking = create_test_booking();
        booking.created_at = Some(Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap());
        service.create_booking(booking).await.unwrap();

        let stored = repo.get_documents(Collection::Booking).await.unwrap();
        assert_eq!(stored[0]["created_at"], json!("2025-01-02T09:00:00Z"));
    }

    #[tokio::test]
    async fn test_create_booking_validation_error() {
        let mut mock_repo = MockTestDocumentRepository::new();
        mock_repo.expect_create_document().times(0);

        let service = IntakeService::new(Arc::new(mock_repo));

        let mut bad_email = create_test_booking();
        bad_email.email = "not-an-email".to_string();
        let mut bad_date = create_test_booking();
        bad_date.date = "14-03-2025".to_string();
        let mut bad_time = create_test_booking();
        bad_time.time = "25:00".to_string();

        for booking in [bad_email, bad_date, bad_time] {
            match service.create_booking(booking).await {
                Err(ServiceError::ValidationError { .. }) => {}
                other => panic!("Expected validation error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_create_inquiry_write_failure() {
        let mut mock_repo = MockTestDocumentRepository::new();
        mock_repo
            .expect_create_document()
            .with(eq(Collection::Inquiry), always())
            .returning(|_, _| {
                Err(RepositoryError::Unavailable {
                    message: "no client".to_string(),
                })
            });

        let metrics = Arc::new(Metrics::new().unwrap());
        let service = IntakeService::new(Arc::new(mock_repo)).with_metrics(metrics.clone());

        match service.create_inquiry(create_test_inquiry()).await {
            Err(ServiceError::Repository { source }) => {
                assert_eq!(source.to_string(), "Database not available: no client");
            }
            other => panic!("Expected repository error, got {:?}", other),
        }

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains(r#"kind="inquiry""#));
        assert!(encoded.contains(r#"status="error""#));
    }

    #[tokio::test]
    async fn test_create_inquiry_stored_in_memory() {
        let repo = Arc::new(InMemoryDocumentRepository::new());
        let service = IntakeService::new(repo.clone());

        let id = service.create_inquiry(create_test_inquiry()).await.unwrap();

        let stored = repo.get_documents(Collection::Inquiry).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["id"], json!(id));
        assert_eq!(stored[0]["subject"], json!("Prijzen"));
    }
}
