//! In-memory implementation of the link registry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::domain::access_log::AccessLog;
use crate::domain::entities::{AccessRecord, LinkDetails, LinkRecord};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

struct StoredLink {
    link: LinkRecord,
    accesses: AccessLog,
}

/// Process-memory registry guarded by a single lock.
///
/// Links and their access histories live in one map, so an insert's
/// uniqueness check and a redirect's count-and-append are each a single
/// critical section. Nothing is evicted: expired links stay until the process
/// exits.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<HashMap<String, StoredLink>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found() -> AppError {
    AppError::not_found("Shortcode not found")
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, link: LinkRecord) -> Result<(), AppError> {
        let mut links = self.links.write().await;

        match links.entry(link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Shortcode already exists")),
            Entry::Vacant(slot) => {
                slot.insert(StoredLink {
                    link,
                    accesses: AccessLog::new(),
                });
                Ok(())
            }
        }
    }

    async fn get(&self, code: &str) -> Result<LinkRecord, AppError> {
        let links = self.links.read().await;

        links
            .get(code)
            .map(|stored| stored.link.clone())
            .ok_or_else(not_found)
    }

    async fn contains(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.read().await.contains_key(code))
    }

    async fn get_with_history(&self, code: &str, limit: usize) -> Result<LinkDetails, AppError> {
        let links = self.links.read().await;
        let stored = links.get(code).ok_or_else(not_found)?;

        Ok(LinkDetails {
            link: stored.link.clone(),
            recent_accesses: stored.accesses.recent(limit).to_vec(),
        })
    }

    async fn record_access(&self, code: &str, access: AccessRecord) -> Result<u64, AppError> {
        let mut links = self.links.write().await;
        let stored = links.get_mut(code).ok_or_else(not_found)?;

        stored.accesses.append(access);
        stored.link.access_count += 1;

        Ok(stored.link.access_count)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.links.read().await.len())
    }
}
