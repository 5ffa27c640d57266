use serde::{Deserialize, Serialize};

pub mod content;
pub mod watch_history;

pub use content::{ContentRecord, ContentType};
pub use watch_history::{
    UpsertOutcome, WatchHistoryRecord, WatchProgress, WatchProgressUpdate,
};

/// `{ "message": ... }` body used for acknowledgements and errors alike
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
