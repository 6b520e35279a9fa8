use serde_json::{Map, Value};
use thiserror::Error;

use crate::record;

/// Errors that can occur when constructing an update patch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdatePatchError {
    #[error("update payload is empty")]
    Empty,
    #[error("update payload contains only reserved attributes")]
    OnlyReservedAttributes,
}

/// A validated partial update: at least one assignable field.
///
/// Construction strips the reserved `userId`/`createdAt` attributes, so a
/// patch can never touch the server-assigned identity of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePatch {
    fields: Map<String, Value>,
}

impl UpdatePatch {
    /// Builds a patch from a decoded payload, validating that something
    /// assignable remains once the reserved attributes are dropped.
    pub fn new(fields: Map<String, Value>) -> Result<Self, UpdatePatchError> {
        if fields.is_empty() {
            return Err(UpdatePatchError::Empty);
        }

        let fields: Map<String, Value> = fields
            .into_iter()
            .filter(|(name, _)| !record::is_reserved_attribute(name))
            .collect();

        if fields.is_empty() {
            return Err(UpdatePatchError::OnlyReservedAttributes);
        }

        Ok(Self { fields })
    }

    /// The fields to set.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
