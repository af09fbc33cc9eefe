use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    error::AppError,
    message::{PriceHistoryQuery, PriceHistoryResponse, SimilarDealsResponse},
    services::{
        aggregation_client::{ScoreRequest, ScoreResponse},
        catalog::CatalogProduct,
        price_history::svg_path,
    },
    state::SharedState,
};

const SIMILAR_LIMIT: usize = 4;

pub async fn list_deals_handler(State(state): State<SharedState>) -> Json<Vec<CatalogProduct>> {
    Json(state.catalog.products().to_vec())
}

pub async fn similar_deals_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SimilarDealsResponse>, AppError> {
    let deals = state
        .catalog
        .similar_to(&id, SIMILAR_LIMIT)
        .ok_or_else(|| AppError::NotFound(format!("deal {id}")))?
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(SimilarDealsResponse { product_id: id, deals }))
}

pub async fn price_history_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<PriceHistoryQuery>,
) -> Result<Json<PriceHistoryResponse>, AppError> {
    let product = state
        .catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("deal {id}")))?;

    let width = query.width.unwrap_or(300.0);
    let height = query.height.unwrap_or(100.0);
    if !(width > 0.0 && height > 0.0) {
        return Err(AppError::BadRequest("width and height must be positive".to_string()));
    }

    Ok(Json(PriceHistoryResponse {
        product_id: product.id.clone(),
        path: svg_path(&product.price_history, width, height),
        points: product.price_history.clone(),
    }))
}

pub async fn score_deal_handler(
    State(state): State<SharedState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let client = state
        .aggregation
        .as_ref()
        .ok_or(AppError::Unavailable("aggregation service"))?;
    Ok(Json(client.score(&request).await?))
}
