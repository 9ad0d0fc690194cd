//! API error types

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::schemas::ErrorBody;
use crate::services::HoroscopeError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed query/body fields
    #[error("{0}")]
    Validation(String),

    /// The inference backend failed; the message is passed through to the client
    #[error(transparent)]
    Generation(#[from] HoroscopeError),

    #[error("Not Found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Horoscope generation failed");
        }

        let body = Json(ErrorBody {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InferenceError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("missing field".to_string()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);

        let err = ApiError::from(HoroscopeError::from(InferenceError::MissingApiKey));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_generation_message_is_passed_through() {
        let err = ApiError::from(HoroscopeError::from(InferenceError::Parse(
            "expected value at line 1 column 1".to_string(),
        )));
        assert_eq!(
            err.to_string(),
            "Failed to parse response: expected value at line 1 column 1"
        );
    }
}
