use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{MessageResponse, WatchHistoryRecord, WatchProgressUpdate},
};

use super::AppState;

pub const PROGRESS_UPDATED: &str = "Watch progress updated";

/// Handler for a user's continue-watching list
pub async fn continue_watching(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<WatchHistoryRecord>>> {
    let history = state.catalog.continue_watching(&user_id).await?;
    Ok(Json(history))
}

/// Handler for progress reports
pub async fn report_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<WatchProgressUpdate>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(update) = payload.map_err(|rejection| {
        tracing::warn!(
            request_id = %request_id,
            user_id = %user_id,
            error = %rejection,
            "Rejected watch progress body"
        );
        AppError::InvalidInput(rejection.body_text())
    })?;

    state.catalog.record_progress(&user_id, update).await?;

    Ok(Json(MessageResponse::new(PROGRESS_UPDATED)))
}
