//! Data Transfer Objects for the public API.
//!
//! Field names follow the JSON contract (camelCase); timestamps are ISO-8601
//! UTC with millisecond precision.

pub mod access;
pub mod health;
pub mod shorten;
pub mod stats;
