use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::ContentRecord};

use super::AppState;

/// Handler for listing the whole catalog
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ContentRecord>>> {
    let content = state.catalog.list_content().await?;
    Ok(Json(content))
}

/// Handler for a single catalog entry
pub async fn get(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> AppResult<Json<ContentRecord>> {
    let record = state.catalog.get_content(&content_id).await?;
    Ok(Json(record))
}
