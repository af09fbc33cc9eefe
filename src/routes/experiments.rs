use axum::{
    Json,
    extract::{Path, Query, State},
};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    error::AppError,
    message::{AssignmentQuery, AssignmentResponse},
    state::SharedState,
};

pub async fn assign_variant_handler(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Query(query): Query<AssignmentQuery>,
) -> Result<Json<AssignmentResponse>, AppError> {
    if query.client_id.trim().is_empty() {
        return Err(AppError::BadRequest("client_id cannot be empty".to_string()));
    }
    let experiment = state
        .experiment(&name)
        .ok_or_else(|| AppError::NotFound(format!("experiment {name}")))?;

    let mut rng = StdRng::from_os_rng();
    let variant = state
        .assignments
        .assign(query.client_id.trim(), experiment, &mut rng)
        .await?;

    Ok(Json(AssignmentResponse {
        experiment: experiment.name.clone(),
        variant,
        variants: experiment.variants.clone(),
    }))
}
