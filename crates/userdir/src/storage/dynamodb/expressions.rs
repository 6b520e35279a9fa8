//! Dynamic SET-expression construction for partial updates.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use userdir_core::storage::UpdatePatch;

use super::conversions::json_to_attribute;

/// A built partial-update instruction: the `SET` expression plus the
/// placeholder tables carrying the actual field names and values.
///
/// Field names never appear in the expression text. Each field gets a
/// `#fN` name placeholder and a `:vN` value placeholder, so DynamoDB
/// reserved words and arbitrary caller-chosen names cannot change the
/// structure of the instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct SetExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl SetExpression {
    /// Builds the instruction from a validated patch, one clause per
    /// field in the patch's iteration order.
    pub fn from_patch(patch: &UpdatePatch) -> Self {
        let mut clauses = Vec::with_capacity(patch.fields().len());
        let mut names = HashMap::with_capacity(patch.fields().len());
        let mut values = HashMap::with_capacity(patch.fields().len());

        for (index, (field, value)) in patch.fields().iter().enumerate() {
            let name_placeholder = format!("#f{index}");
            let value_placeholder = format!(":v{index}");

            clauses.push(format!("{name_placeholder} = {value_placeholder}"));
            names.insert(name_placeholder, field.clone());
            values.insert(value_placeholder, json_to_attribute(value));
        }

        Self {
            expression: format!("SET {}", clauses.join(", ")),
            names,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn patch_from(value: Value) -> UpdatePatch {
        let fields = match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        };
        UpdatePatch::new(fields).unwrap()
    }

    #[test]
    fn test_single_field() {
        let expr = SetExpression::from_patch(&patch_from(json!({ "name": "Ana" })));

        assert_eq!(expr.expression, "SET #f0 = :v0");
        assert_eq!(expr.names["#f0"], "name");
        assert_eq!(expr.values[":v0"], AttributeValue::S("Ana".to_string()));
    }

    #[test]
    fn test_one_clause_per_field() {
        // serde_json maps iterate in key order: age, name.
        let expr = SetExpression::from_patch(&patch_from(json!({ "name": "Ana", "age": 30 })));

        assert_eq!(expr.expression, "SET #f0 = :v0, #f1 = :v1");
        assert_eq!(expr.names["#f0"], "age");
        assert_eq!(expr.names["#f1"], "name");
        assert_eq!(expr.values[":v0"], AttributeValue::N("30".to_string()));
        assert_eq!(expr.values[":v1"], AttributeValue::S("Ana".to_string()));
    }

    #[test]
    fn test_field_names_never_appear_in_expression_text() {
        // "size" and "status" are DynamoDB reserved words; a hostile name
        // tries to smuggle in extra clauses.
        let expr = SetExpression::from_patch(&patch_from(json!({
            "size": 1,
            "status": "ok",
            "a = :v0 REMOVE b": true,
        })));

        for field in expr.names.values() {
            assert!(!expr.expression.contains(field.as_str()));
        }
        assert_eq!(expr.expression, "SET #f0 = :v0, #f1 = :v1, #f2 = :v2");
    }

    #[test]
    fn test_empty_patch_is_unrepresentable() {
        assert!(UpdatePatch::new(Map::new()).is_err());
    }
}
