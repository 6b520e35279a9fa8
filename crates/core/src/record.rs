//! The record type stored in the users collection.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Wire name of the server-assigned identifier attribute.
pub const ID_ATTRIBUTE: &str = "userId";

/// Wire name of the server-assigned creation timestamp attribute.
pub const CREATED_AT_ATTRIBUTE: &str = "createdAt";

/// Returns true for attribute names owned by the server.
pub fn is_reserved_attribute(name: &str) -> bool {
    name == ID_ATTRIBUTE || name == CREATED_AT_ATTRIBUTE
}

/// A stored user record: server-assigned identity plus an open map of
/// caller-supplied fields.
///
/// The identifier is generated at creation and immutable; the creation
/// timestamp is set once. `fields` never contains the reserved attribute
/// names.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates a record from caller-supplied fields with a fresh UUID and
    /// the current time. Caller values for `userId`/`createdAt` are
    /// discarded; the server-assigned values take precedence.
    pub fn new(mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_ATTRIBUTE);
        fields.remove(CREATED_AT_ATTRIBUTE);

        Self {
            user_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            fields,
        }
    }

    /// Reassembles a record with a known identity. Used by storage
    /// backends when reading items back.
    pub fn from_parts(
        user_id: impl Into<String>,
        created_at: DateTime<Utc>,
        mut fields: Map<String, Value>,
    ) -> Self {
        fields.remove(ID_ATTRIBUTE);
        fields.remove(CREATED_AT_ATTRIBUTE);

        Self {
            user_id: user_id.into(),
            created_at,
            fields,
        }
    }

    /// JSON projection of the record under its wire attribute names.
    pub fn to_json(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert(
            ID_ATTRIBUTE.to_string(),
            Value::String(self.user_id.clone()),
        );
        map.insert(
            CREATED_AT_ATTRIBUTE.to_string(),
            Value::String(self.created_at.to_rfc3339()),
        );
        Value::Object(map)
    }
}
