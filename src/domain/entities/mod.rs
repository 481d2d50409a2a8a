//! Core domain entities.
//!
//! - [`LinkRecord`] - A shortened URL with its expiry and access counter
//! - [`AccessRecord`] - One successful redirect
//! - [`LinkDetails`] - A link plus its trailing access window, as reported

pub mod access;
pub mod link;

pub use access::AccessRecord;
pub use link::{LinkDetails, LinkRecord};
