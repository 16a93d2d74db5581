pub mod document_repository;
pub mod memory_repository;


pub use document_repository::{DocumentRepository, DynamoDbDocumentRepository};
pub use memory_repository::InMemoryDocumentRepository;
