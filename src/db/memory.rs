use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::StoreResult,
    models::{ContentRecord, UpsertOutcome, WatchHistoryRecord, WatchProgress},
};

use super::CatalogStore;

/// In-process store backed by vectors, selected with a `memory://` database URL
#[derive(Clone, Default)]
pub struct MemoryCatalogStore {
    inner: Arc<RwLock<MemoryCatalogInner>>,
}

#[derive(Default)]
struct MemoryCatalogInner {
    content: Vec<ContentRecord>,
    watch_history: Vec<WatchHistoryRecord>,
    next_history_id: i64,
}

impl MemoryCatalogStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn count_content(&self) -> StoreResult<u64> {
        Ok(self.inner.read().await.content.len() as u64)
    }

    async fn insert_content(&self, records: &[ContentRecord]) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.content.extend_from_slice(records);
        Ok(())
    }

    async fn list_content(&self) -> StoreResult<Vec<ContentRecord>> {
        Ok(self.inner.read().await.content.clone())
    }

    async fn find_content(&self, content_id: &str) -> StoreResult<Option<ContentRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .content
            .iter()
            .find(|record| record.content_id == content_id)
            .cloned())
    }

    async fn count_watch_history(&self) -> StoreResult<u64> {
        Ok(self.inner.read().await.watch_history.len() as u64)
    }

    async fn list_watch_history(&self, user_id: &str) -> StoreResult<Vec<WatchHistoryRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .watch_history
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert_watch_progress(&self, progress: &WatchProgress) -> StoreResult<UpsertOutcome> {
        // Single write lock covers find-and-replace
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.watch_history.iter_mut().find(|record| {
            record.user_id == progress.user_id && record.content_id == progress.content_id
        }) {
            existing.progress_seconds = progress.progress_seconds;
            existing.total_seconds = progress.total_seconds;
            existing.last_watched_timestamp = progress.watched_at;
            return Ok(UpsertOutcome::Updated);
        }

        inner.next_history_id += 1;
        let id = inner.next_history_id;
        inner.watch_history.push(WatchHistoryRecord {
            id,
            user_id: progress.user_id.clone(),
            content_id: progress.content_id.clone(),
            progress_seconds: progress.progress_seconds,
            total_seconds: progress.total_seconds,
            last_watched_timestamp: progress.watched_at,
        });

        Ok(UpsertOutcome::Created)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
