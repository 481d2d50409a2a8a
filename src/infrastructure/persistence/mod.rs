//! Registry implementations.
//!
//! # Repositories
//!
//! - [`InMemoryLinkRepository`] - Process-memory link registry; state is lost on restart

pub mod memory_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
