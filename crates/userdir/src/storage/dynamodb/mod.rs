//! DynamoDB storage backend.
//!
//! Implements the repository contract against a single table whose
//! partition key is the record identifier.

mod conversions;
mod error;
mod expressions;
mod repository;

pub use repository::DynamoDbRepository;
