//! Catalog persistence
//!
//! The service talks to storage only through [`CatalogStore`], so the backing
//! engine is chosen once at startup and injected into the router state.

use crate::{
    error::StoreResult,
    models::{ContentRecord, UpsertOutcome, WatchHistoryRecord, WatchProgress},
};

pub mod memory;
pub mod postgres;
pub mod redis;

pub use memory::MemoryCatalogStore;
pub use postgres::{create_pool, run_migrations, PgCatalogStore};
pub use self::redis::{create_redis_client, Cache, CacheKey, CacheWriterHandle};

/// Storage primitives for content and watch history
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Number of content records
    async fn count_content(&self) -> StoreResult<u64>;

    /// Inserts content records in the given order
    async fn insert_content(&self, records: &[ContentRecord]) -> StoreResult<()>;

    /// All content records in insertion order
    async fn list_content(&self) -> StoreResult<Vec<ContentRecord>>;

    /// Looks up one content record by its `content_id`
    async fn find_content(&self, content_id: &str) -> StoreResult<Option<ContentRecord>>;

    /// Number of watch-history records across all users
    async fn count_watch_history(&self) -> StoreResult<u64>;

    /// Watch-history records belonging to `user_id`; empty for unknown users
    async fn list_watch_history(&self, user_id: &str) -> StoreResult<Vec<WatchHistoryRecord>>;

    /// Creates or overwrites the record keyed by `(user_id, content_id)`
    ///
    /// Must be a single atomic operation so concurrent reports for different
    /// pairs never conflict and reports for the same pair are last-write-wins.
    async fn upsert_watch_progress(&self, progress: &WatchProgress) -> StoreResult<UpsertOutcome>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
