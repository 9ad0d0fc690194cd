//! Horoscope endpoints
//!
//! `GET /` plus the GET and POST variants of `/daily-horoscope/`. Both
//! horoscope handlers funnel into the same [`HoroscopeService`] call.
//!
//! [`HoroscopeService`]: crate::services::HoroscopeService

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};

use crate::error::ApiError;
use crate::middleware::TraceId;
use crate::schemas::{HoroscopeRequest, HoroscopeResponse, WelcomeResponse};
use crate::server::state::AppState;

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Horoscope API! Please use /daily-horoscope for predictions.";

/// GET /
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// GET /daily-horoscope/?birthdate=..&zodiac_sign=..
pub async fn daily_horoscope_get(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    query: Result<Query<HoroscopeRequest>, QueryRejection>,
) -> Result<Json<HoroscopeResponse>, ApiError> {
    let Query(request) = query?;

    tracing::debug!(
        trace_id = %trace_id,
        birthdate = %request.birthdate,
        zodiac_sign = %request.zodiac_sign,
        "GET request received"
    );

    generate(&state, request).await
}

/// POST /daily-horoscope/
pub async fn daily_horoscope_post(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    body: Result<Json<HoroscopeRequest>, JsonRejection>,
) -> Result<Json<HoroscopeResponse>, ApiError> {
    let Json(request) = body?;

    tracing::debug!(trace_id = %trace_id, request = ?request, "POST request received");

    generate(&state, request).await
}

async fn generate(
    state: &AppState,
    request: HoroscopeRequest,
) -> Result<Json<HoroscopeResponse>, ApiError> {
    let response = state
        .horoscope
        .generate_horoscope(&request.birthdate, &request.zodiac_sign)
        .await?;

    Ok(Json(response))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
