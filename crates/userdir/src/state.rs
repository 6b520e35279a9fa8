//! Shared application state.
//!
//! Built once at process start and cloned into every invocation, so the
//! DynamoDB client and its connection pool live for the process lifetime
//! instead of being recreated per request.

use std::sync::Arc;

use userdir_core::storage::RecordRepository;

use crate::config::Config;
use crate::storage::dynamodb::DynamoDbRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Storage adapter for the users collection.
    pub records: Arc<dyn RecordRepository>,
}

impl AppState {
    /// Builds production state targeting the configured table, using the
    /// AWS SDK default credential chain.
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_dynamodb::Client::new(&sdk_config);

        Self::with_repository(Arc::new(DynamoDbRepository::new(
            client,
            config.table_name.clone(),
        )))
    }

    /// Builds state over an arbitrary repository. Tests use this with the
    /// in-memory backend.
    pub fn with_repository(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }
}
