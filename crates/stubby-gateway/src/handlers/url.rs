use crate::error::{AppError, Result};
use crate::model::{ShortenResponse, StatsResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use stubby_core::{ReadRepository, Repository};
use stubby_redirector::Redirector;
use tracing::info;

/// `POST /api/shorten`. The raw body, trimmed, is the destination.
///
/// Answers `201` for a new short url and `200` when the destination had
/// already been shortened. Both carry `Location` and a `Link` to the stats.
/// A destination that could not be sent back as a `Location` header is
/// rejected with `400`.
pub async fn shorten_handler(State(state): State<AppState>, body: String) -> Result<Response> {
    let destination = body.trim();
    if HeaderValue::try_from(destination).is_err() {
        return Err(AppError::InvalidInput(
            "destination is not a valid redirect target".to_string(),
        ));
    }

    let created = state.repository().create_or_fetch(destination).await?;
    let record = created.record;

    let short_url = state.short_url(&record.id);
    let stats_url = state.stats_url(&record.id);
    let status = if created.is_new {
        info!(id = %record.id, destination = %record.destination, "shortened url");
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let headers = [
        (header::LOCATION, short_url.clone()),
        (header::LINK, format!("<{stats_url}>; rel=\"stats\"")),
    ];
    let body = ShortenResponse {
        id: record.id.into_string(),
        short_url,
        stats_url,
        destination: record.destination,
        is_new: created.is_new,
    };

    Ok((status, headers, Json(body)).into_response())
}

/// `GET /r/{id}`. Permanent redirect; the click is queued before responding.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let record = state
        .redirector()
        .resolve(&id)
        .await?
        .ok_or(AppError::NotFound(id))?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, record.destination)],
    )
        .into_response())
}

/// `GET /api/stats/{id}`.
pub async fn stats_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>> {
    let (Some(record), Some(stats)) = (
        state.repository().lookup(&id).await?,
        state.redirector().stats(&id).await?,
    ) else {
        return Err(AppError::NotFound(id));
    };

    Ok(Json(StatsResponse::new(record, stats)))
}
