//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Shortcode generation and validation
//! - [`url_validator`] - Absolute URL validation
//! - [`client_addr`] - Host, client address and user agent extraction
//! - [`geo`] - Placeholder location labels
//! - [`time`] - ISO-8601 timestamp formatting

pub mod client_addr;
pub mod code_generator;
pub mod geo;
pub mod time;
pub mod url_validator;
