//! DynamoDB repository implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use userdir_core::record::{Record, ID_ATTRIBUTE};
use userdir_core::storage::{RecordRepository, RepositoryError, Result, UpdatePatch};

use super::conversions::{item_to_record, record_to_item};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};
use super::expressions::SetExpression;

/// DynamoDB-based repository for the users collection.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table
    /// name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl RecordRepository for DynamoDbRepository {
    async fn put_record(&self, record: &Record) -> Result<()> {
        let item = record_to_item(record);

        // No condition expression: create is an unconditional overwrite.
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn get_record(&self, user_id: &str) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn scan_records(&self) -> Result<Vec<Record>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(map_scan_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_record).collect()
    }

    async fn update_record(&self, user_id: &str, patch: &UpdatePatch) -> Result<Record> {
        let update = SetExpression::from_patch(patch);

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, AttributeValue::S(user_id.to_string()))
            .condition_expression(format!("attribute_exists({ID_ATTRIBUTE})"))
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, user_id))?;

        let attributes = result.attributes.ok_or_else(|| {
            RepositoryError::InvalidData("UpdateItem returned no attributes".to_string())
        })?;

        item_to_record(&attributes)
    }

    async fn delete_record(&self, user_id: &str) -> Result<()> {
        // No condition expression: deleting an absent id is a success.
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}
