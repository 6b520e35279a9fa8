//! Storage backend implementations.
//!
//! This module provides concrete implementations of the
//! `userdir_core::storage::RecordRepository` trait:
//!
//! - `dynamodb`: the production backend using `aws-sdk-dynamodb`
//! - `inmemory`: a `HashMap`-backed backend mirroring the DynamoDB
//!   semantics, compiled for tests (or with the `inmemory` feature)

pub mod dynamodb;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;
