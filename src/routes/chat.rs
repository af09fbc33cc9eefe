use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, HistoryResponse},
    services::metrics_manager::MetricsData,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();

    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let sessions = state.conversation.sessions();
    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => sessions.ensure_session(s).await,
        _ => sessions.create_session().await,
    };

    let exchange = state.conversation.send(&session_id, trimmed).await?;

    Ok(Json(ChatResponse {
        session_id,
        intent: exchange.reply.intent,
        entities: exchange.reply.entities,
        message: exchange.assistant,
        history_len: exchange.history_len,
    }))
}

pub async fn history_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let sessions = state.conversation.sessions();
    let messages = sessions
        .get_history(&session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;
    let busy = sessions.is_busy(&session_id).await;

    Ok(Json(HistoryResponse { session_id, busy, messages }))
}

pub async fn delete_session_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.conversation.sessions().remove_session(&session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("session {session_id}")))
    }
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
