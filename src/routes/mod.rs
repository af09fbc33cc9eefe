// src/routes/mod.rs
pub mod alerts;
pub mod chat;
pub mod deals;
pub mod experiments;

use crate::state::SharedState;
use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: SharedState) -> Router {
    let admin_routes = Router::new()
        .route("/metrics", get(chat::get_metrics_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/chat", post(chat::chat_handler))
        .route(
            "/chat/{session_id}",
            delete(chat::delete_session_handler),
        )
        .route("/chat/{session_id}/history", get(chat::history_handler))
        .route("/deals", get(deals::list_deals_handler))
        .route("/deals/score", post(deals::score_deal_handler))
        .route("/deals/{id}/similar", get(deals::similar_deals_handler))
        .route("/deals/{id}/price-history", get(deals::price_history_handler))
        .route(
            "/alerts",
            get(alerts::list_alerts_handler).post(alerts::create_alert_handler),
        )
        .route("/alerts/{id}", delete(alerts::delete_alert_handler))
        .route("/experiments/{name}", get(experiments::assign_variant_handler))
        .nest("/admin", admin_routes)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn auth_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // API Key check.
    match req.headers().get("x-admin-key") {
        Some(val) if val.as_bytes() == state.admin_key.as_bytes() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
