//! POST /chat - Run one conversation turn.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use fingertips_core::history::repository::HistoryRepository;
use fingertips_types::chat::{ChatRequest, ChatResponse};

use crate::http::error::AppError;
use crate::state::AppState;
use crate::turn::run_turn;

/// POST /chat - Run one turn and return the reply with the updated history.
pub async fn chat<H: HistoryRepository + 'static>(
    State(state): State<AppState<H>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    let response = run_turn(&state.handler, &request).await?;
    Ok(Json(response))
}
