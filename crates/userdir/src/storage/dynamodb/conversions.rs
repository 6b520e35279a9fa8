//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! records with open JSON fields. Testable in isolation without DynamoDB
//! access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use userdir_core::record::{self, Record};
use userdir_core::storage::RepositoryError;

/// Convert a JSON value to its DynamoDB attribute representation.
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(name, item)| (name.clone(), json_to_attribute(item)))
                .collect(),
        ),
    }
}

/// Convert a DynamoDB attribute back to JSON.
///
/// Set and binary attribute types are rejected: records written by this
/// service never produce them.
pub fn attribute_to_json(attr: &AttributeValue) -> Result<Value, RepositoryError> {
    match attr {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::N(number) => parse_number(number),
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::L(items) => items
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => {
            let mut object = Map::new();
            for (name, item) in map {
                object.insert(name.clone(), attribute_to_json(item)?);
            }
            Ok(Value::Object(object))
        }
        other => Err(RepositoryError::InvalidData(format!(
            "unsupported attribute type: {other:?}"
        ))),
    }
}

fn parse_number(number: &str) -> Result<Value, RepositoryError> {
    if let Ok(int) = number.parse::<i64>() {
        return Ok(Value::from(int));
    }
    if let Ok(unsigned) = number.parse::<u64>() {
        return Ok(Value::from(unsigned));
    }
    number
        .parse::<f64>()
        .map(Value::from)
        .map_err(|err| {
            RepositoryError::InvalidData(format!("invalid numeric attribute {number:?}: {err}"))
        })
}

/// Convert a record to a DynamoDB item.
pub fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(
        record::ID_ATTRIBUTE.to_string(),
        AttributeValue::S(record.user_id.clone()),
    );
    item.insert(
        record::CREATED_AT_ATTRIBUTE.to_string(),
        AttributeValue::S(record.created_at.to_rfc3339()),
    );

    for (name, value) in &record.fields {
        item.insert(name.clone(), json_to_attribute(value));
    }

    item
}

/// Convert a DynamoDB item to a record.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Record, RepositoryError> {
    let user_id = get_string(item, record::ID_ATTRIBUTE)?;
    let created_at = get_datetime(item, record::CREATED_AT_ATTRIBUTE)?;

    let mut fields = Map::new();
    for (name, value) in item {
        if record::is_reserved_attribute(name) {
            continue;
        }
        fields.insert(name.clone(), attribute_to_json(value)?);
    }

    Ok(Record::from_parts(user_id, created_at, fields))
}

fn get_string(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<String, RepositoryError> {
    item.get(name)
        .and_then(|attr| attr.as_s().ok())
        .cloned()
        .ok_or_else(|| {
            RepositoryError::InvalidData(format!("missing or non-string attribute: {name}"))
        })
}

fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let raw = get_string(item, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| RepositoryError::InvalidData(format!("invalid timestamp in {name}: {err}")))
}
