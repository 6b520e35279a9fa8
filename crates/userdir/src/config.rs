use std::env;

use thiserror::Error;

/// Environment variable naming the DynamoDB table to target.
pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";

/// Errors raised while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration missing: DYNAMODB_TABLE_NAME is not set")]
    MissingTableName,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding the users collection.
    pub table_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - table holding the users collection (required)
    ///
    /// Region and credentials are resolved by the AWS SDK's default chain;
    /// `AWS_ENDPOINT_URL` points the SDK at a local DynamoDB.
    pub fn from_env() -> Result<Self, ConfigError> {
        let table_name = env::var(TABLE_NAME_VAR)
            .ok()
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingTableName)?;

        Ok(Self { table_name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env var mutations cannot race each other under
    // the parallel test runner.
    #[test]
    fn test_from_env() {
        env::remove_var(TABLE_NAME_VAR);
        assert_eq!(Config::from_env().unwrap_err(), ConfigError::MissingTableName);

        env::set_var(TABLE_NAME_VAR, "");
        assert_eq!(Config::from_env().unwrap_err(), ConfigError::MissingTableName);

        env::set_var(TABLE_NAME_VAR, "users-test");
        assert_eq!(Config::from_env().unwrap().table_name, "users-test");

        env::remove_var(TABLE_NAME_VAR);
    }
}
