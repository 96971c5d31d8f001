use crate::error::Result;
use crate::model::HealthResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use stubby_core::ReadRepository;

pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let records = state.repository().len().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        records,
    }))
}
