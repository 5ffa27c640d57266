use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    error::{StoreError, StoreResult},
    models::{ContentRecord, ContentType, UpsertOutcome, WatchHistoryRecord, WatchProgress},
};

use super::CatalogStore;

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    content_id: String,
    title: String,
    content_type: String,
    genre: Vec<String>,
    image_url: String,
    description: String,
    language: Vec<String>,
    release_year: i32,
    video_url: String,
}

impl TryFrom<ContentRow> for ContentRecord {
    type Error = StoreError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let content_type = row.content_type.parse::<ContentType>().map_err(|e: String| {
            StoreError::Decode(format!("content '{}': {}", row.content_id, e))
        })?;

        Ok(ContentRecord {
            content_id: row.content_id,
            title: row.title,
            content_type,
            genre: row.genre,
            image_url: row.image_url,
            description: row.description,
            language: row.language,
            release_year: row.release_year,
            video_url: row.video_url,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WatchHistoryRow {
    id: i64,
    user_id: String,
    content_id: String,
    progress_seconds: i64,
    total_seconds: i64,
    last_watched_at: DateTime<Utc>,
}

impl From<WatchHistoryRow> for WatchHistoryRecord {
    fn from(row: WatchHistoryRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            content_id: row.content_id,
            progress_seconds: row.progress_seconds,
            total_seconds: row.total_seconds,
            last_watched_timestamp: row.last_watched_at,
        }
    }
}

const CONTENT_COLUMNS: &str = "content_id, title, content_type, genre, image_url, description, \
                               language, release_year, video_url";

/// PostgreSQL-backed catalog store
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgCatalogStore {
    async fn count_content(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn insert_content(&self, records: &[ContentRecord]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO content
                    (content_id, title, content_type, genre, image_url, description,
                     language, release_year, video_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(&record.content_id)
            .bind(&record.title)
            .bind(record.content_type.as_str())
            .bind(&record.genre)
            .bind(&record.image_url)
            .bind(&record.description)
            .bind(&record.language)
            .bind(record.release_year)
            .bind(&record.video_url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_content(&self) -> StoreResult<Vec<ContentRecord>> {
        let sql = format!("SELECT {} FROM content ORDER BY id", CONTENT_COLUMNS);
        let rows: Vec<ContentRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(ContentRecord::try_from).collect()
    }

    async fn find_content(&self, content_id: &str) -> StoreResult<Option<ContentRecord>> {
        let sql = format!("SELECT {} FROM content WHERE content_id = $1", CONTENT_COLUMNS);
        let row: Option<ContentRow> = sqlx::query_as(&sql)
            .bind(content_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ContentRecord::try_from).transpose()
    }

    async fn count_watch_history(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM watch_history")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn list_watch_history(&self, user_id: &str) -> StoreResult<Vec<WatchHistoryRecord>> {
        let rows: Vec<WatchHistoryRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, content_id, progress_seconds, total_seconds, last_watched_at
            FROM watch_history
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WatchHistoryRecord::from).collect())
    }

    async fn upsert_watch_progress(&self, progress: &WatchProgress) -> StoreResult<UpsertOutcome> {
        // xmax is zero only for freshly inserted tuples
        let inserted: bool = sqlx::query_scalar(
            r#"
            INSERT INTO watch_history
                (user_id, content_id, progress_seconds, total_seconds, last_watched_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, content_id) DO UPDATE SET
                progress_seconds = EXCLUDED.progress_seconds,
                total_seconds = EXCLUDED.total_seconds,
                last_watched_at = EXCLUDED.last_watched_at
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(&progress.user_id)
        .bind(&progress.content_id)
        .bind(progress.progress_seconds)
        .bind(progress.total_seconds)
        .bind(progress.watched_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(if inserted {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        })
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
