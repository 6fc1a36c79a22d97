// src/api/http/comment.rs
// POST /comment

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::error::ApiResult;
use crate::api::types::{CommentRequest, SentimentResponse};
use crate::state::AppState;

/// Rate the sentiment of one comment.
///
/// Body rejections and blank comments are 400; provider failures are 500.
pub async fn analyze_comment_handler(
    State(state): State<AppState>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> ApiResult<Json<SentimentResponse>> {
    let Json(request) = payload?;
    let response = state.analyzer.analyze(request.comment()).await?;
    Ok(Json(response))
}
