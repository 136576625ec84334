use super::types::ErrorResponse;
use crate::scoring::{Scorer, ScoringRequest, ScoringResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<Scorer>,
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<ScoringRequest>,
) -> Result<Json<ScoringResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        purpose = request.purpose.as_str(),
        "Received scoring request"
    );

    match state.scorer.score(&request) {
        Ok(result) => {
            info!(
                %request_id,
                risk_score = result.risk_score,
                risk_level = %result.risk_level,
                "Scored request"
            );
            Ok(Json(result))
        }
        Err(e) => {
            error!(%request_id, "Failed to score request: {}", e);
            let status = if e.is_client_fault() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Err((
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
