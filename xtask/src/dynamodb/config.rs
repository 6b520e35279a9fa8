//! Table configuration types (pure data, no I/O).

use userdir_core::record::ID_ATTRIBUTE;

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

/// Returns the canonical configuration for the users table: a single
/// string partition key holding the record identifier.
pub fn users_table_config() -> TableConfig {
    TableConfig {
        table_name: "userdir".to_string(),
        partition_key: KeyAttribute {
            name: ID_ATTRIBUTE.to_string(),
            attribute_type: AttributeType::String,
        },
        billing_mode: BillingMode::PayPerRequest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_table_config() {
        let config = users_table_config();
        assert_eq!(config.table_name, "userdir");
        assert_eq!(config.partition_key.name, "userId");
        assert_eq!(config.billing_mode, BillingMode::PayPerRequest);
    }

    #[test]
    fn test_with_table_name() {
        let config = users_table_config().with_table_name("userdir-dev");
        assert_eq!(config.table_name, "userdir-dev");
    }
}
