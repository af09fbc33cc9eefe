// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::{
    ab_testing::Variant, catalog::CatalogProduct, entities::Entities, intent::Intent,
    session_manager::ChatMessage,
};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub intent: Intent,
    pub entities: Entities,
    pub message: ChatMessage,
    pub history_len: usize,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub busy: bool,
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
pub struct SimilarDealsResponse {
    pub product_id: String,
    pub deals: Vec<CatalogProduct>,
}

#[derive(Deserialize)]
pub struct PriceHistoryQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Serialize)]
pub struct PriceHistoryResponse {
    pub product_id: String,
    pub points: Vec<f64>,
    pub path: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    pub product_id: String,
    pub target_price: f64,
}

#[derive(Deserialize)]
pub struct AssignmentQuery {
    pub client_id: String,
}

#[derive(Serialize)]
pub struct AssignmentResponse {
    pub experiment: String,
    pub variant: String,
    pub variants: Vec<Variant>,
}
