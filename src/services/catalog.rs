use chrono::Utc;
use std::sync::Arc;

use crate::{
    cached,
    db::{Cache, CacheKey, CatalogStore},
    error::{AppError, AppResult},
    models::{
        ContentRecord, UpsertOutcome, WatchHistoryRecord, WatchProgress, WatchProgressUpdate,
    },
};

const CONTENT_CACHE_TTL: u64 = 3600; // 1 hour

pub const FETCH_CONTENT_ERROR: &str = "Error fetching content";
pub const FETCH_HISTORY_ERROR: &str = "Error fetching watch history";
pub const UPDATE_PROGRESS_ERROR: &str = "Error updating watch progress";
pub const CONTENT_NOT_FOUND: &str = "Content not found";

/// Catalog and watch-progress operations behind the HTTP layer
///
/// Holds the injected store and the optional content cache; cloning is cheap.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    cache: Option<Cache>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, cache: Option<Cache>) -> Self {
        Self { store, cache }
    }

    /// All content in the store's natural order
    pub async fn list_content(&self) -> AppResult<Vec<ContentRecord>> {
        self.store
            .list_content()
            .await
            .map_err(AppError::store(FETCH_CONTENT_ERROR))
    }

    /// One content record, or `NotFound`
    ///
    /// Content never changes after seeding, so cached lookups stay valid for
    /// the cache TTL.
    pub async fn get_content(&self, content_id: &str) -> AppResult<ContentRecord> {
        let record: Option<ContentRecord> = cached!(
            self.cache,
            CacheKey::Content(content_id.to_string()),
            CONTENT_CACHE_TTL,
            self.store.find_content(content_id)
        )
        .map_err(AppError::store(FETCH_CONTENT_ERROR))?;

        record.ok_or_else(|| {
            tracing::debug!(content_id = %content_id, "Content lookup missed");
            AppError::NotFound(CONTENT_NOT_FOUND.to_string())
        })
    }

    /// Watch history for `user_id`; unknown users get an empty list
    pub async fn continue_watching(&self, user_id: &str) -> AppResult<Vec<WatchHistoryRecord>> {
        self.store
            .list_watch_history(user_id)
            .await
            .map_err(AppError::store(FETCH_HISTORY_ERROR))
    }

    /// Upserts the progress for `(user_id, update.content_id)` stamped with now
    ///
    /// The referenced content is not checked for existence and values are
    /// stored as reported.
    pub async fn record_progress(
        &self,
        user_id: &str,
        update: WatchProgressUpdate,
    ) -> AppResult<UpsertOutcome> {
        let progress = WatchProgress::from_update(user_id, update, Utc::now());

        let outcome = self
            .store
            .upsert_watch_progress(&progress)
            .await
            .map_err(AppError::store(UPDATE_PROGRESS_ERROR))?;

        tracing::info!(
            user_id = %progress.user_id,
            content_id = %progress.content_id,
            progress_seconds = progress.progress_seconds,
            total_seconds = progress.total_seconds,
            outcome = ?outcome,
            "Watch progress recorded"
        );

        Ok(outcome)
    }
}
