//! Repository trait for the link registry.

use crate::domain::entities::{AccessRecord, LinkDetails, LinkRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Registry of short links and their access histories.
///
/// The single source of truth for shortcode → link. Implementations must make
/// `insert` atomic with respect to other inserts of the same code, and
/// `record_access` atomic per code (counter increment and history append
/// happen together).
///
/// Expired links are kept; expiry is checked by readers via
/// [`LinkRecord::is_expired_at`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-memory registry
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores a new link with an empty access history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already present, even if
    /// the existing link has expired.
    async fn insert(&self, link: LinkRecord) -> Result<(), AppError>;

    /// Fetches a link by its shortcode.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is absent.
    async fn get(&self, code: &str) -> Result<LinkRecord, AppError>;

    /// Returns whether the code is registered (expired or not).
    async fn contains(&self, code: &str) -> Result<bool, AppError>;

    /// Fetches a link and the last `limit` accesses in one consistent read.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is absent.
    async fn get_with_history(&self, code: &str, limit: usize) -> Result<LinkDetails, AppError>;

    /// Appends an access and increments the link's access counter.
    ///
    /// Returns the updated access count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is absent.
    async fn record_access(&self, code: &str, access: AccessRecord) -> Result<u64, AppError>;

    /// Number of registered links, expired ones included.
    async fn count(&self) -> Result<usize, AppError>;
}
