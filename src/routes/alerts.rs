use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::CreateAlertRequest,
    services::price_alerts::PriceAlert,
    state::SharedState,
};

pub async fn list_alerts_handler(State(state): State<SharedState>) -> Json<Vec<PriceAlert>> {
    Json(state.alerts.list().await)
}

pub async fn create_alert_handler(
    State(state): State<SharedState>,
    Json(payload): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<PriceAlert>), AppError> {
    if state.catalog.get(&payload.product_id).is_none() {
        return Err(AppError::NotFound(format!("deal {}", payload.product_id)));
    }
    let alert = state
        .alerts
        .create(&payload.product_id, payload.target_price)
        .await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

pub async fn delete_alert_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.alerts.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("alert {id}")))
    }
}
