//! Core domain types and the storage contract for the userdir service.
//!
//! This crate is free of I/O: it defines the [`record::Record`] stored in
//! the users collection, the [`storage::RecordRepository`] trait that
//! storage backends implement, and the error/payload types shared between
//! them.

pub mod record;
pub mod storage;
