use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored playback position of one user on one title
///
/// At most one record exists per `(user_id, content_id)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryRecord {
    /// Store-assigned identity
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: String,
    pub content_id: String,
    pub progress_seconds: i64,
    pub total_seconds: i64,
    pub last_watched_timestamp: DateTime<Utc>,
}

/// Body of a progress report
///
/// Values are taken as reported; ranges are left to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchProgressUpdate {
    pub content_id: String,
    pub progress_seconds: i64,
    pub total_seconds: i64,
}

/// Full upsert payload handed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct WatchProgress {
    pub user_id: String,
    pub content_id: String,
    pub progress_seconds: i64,
    pub total_seconds: i64,
    pub watched_at: DateTime<Utc>,
}

impl WatchProgress {
    pub fn from_update(user_id: &str, update: WatchProgressUpdate, watched_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            content_id: update.content_id,
            progress_seconds: update.progress_seconds,
            total_seconds: update.total_seconds,
            watched_at,
        }
    }
}

/// Whether an upsert created a new record or overwrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_watch_history_record_exposes_store_identity() {
        let record = WatchHistoryRecord {
            id: 7,
            user_id: "demo_user_1".to_string(),
            content_id: "the-boys-series".to_string(),
            progress_seconds: 1500,
            total_seconds: 2400,
            last_watched_timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["_id"], 7);
        assert_eq!(value["userId"], "demo_user_1");
        assert_eq!(value["progressSeconds"], 1500);
        assert_eq!(value["totalSeconds"], 2400);
        assert_eq!(value["lastWatchedTimestamp"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_update_accepts_out_of_range_values() {
        let update: WatchProgressUpdate = serde_json::from_value(json!({
            "contentId": "reacher-series",
            "progressSeconds": -10,
            "totalSeconds": 0
        }))
        .unwrap();

        assert_eq!(update.progress_seconds, -10);
        assert_eq!(update.total_seconds, 0);
    }

    #[test]
    fn test_from_update_carries_key_and_values() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let progress = WatchProgress::from_update(
            "u1",
            WatchProgressUpdate {
                content_id: "c1".to_string(),
                progress_seconds: 10,
                total_seconds: 20,
            },
            at,
        );

        assert_eq!(progress.user_id, "u1");
        assert_eq!(progress.content_id, "c1");
        assert_eq!(progress.progress_seconds, 10);
        assert_eq!(progress.total_seconds, 20);
        assert_eq!(progress.watched_at, at);
    }
}
