//! API error handling for consistent JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::pipeline::PipelineError;

/// API error type that converts to JSON responses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// An upstream provider (Fireflies, Anthropic, Slack) failed.
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": true,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::EmptyTranscript => Self::bad_request(err.to_string()),
            PipelineError::TranscriptNotFound(_) => Self::not_found(err.to_string()),
            PipelineError::Fetch(_) | PipelineError::Generate(_) | PipelineError::Publish(_) => {
                Self::bad_gateway(err.to_string())
            }
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_pipeline_error_status_mapping() {
        let cases = [
            (PipelineError::EmptyTranscript, StatusCode::BAD_REQUEST),
            (
                PipelineError::TranscriptNotFound("abc".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (PipelineError::Fetch(anyhow!("timeout")), StatusCode::BAD_GATEWAY),
            (PipelineError::Generate(anyhow!("overloaded")), StatusCode::BAD_GATEWAY),
            (PipelineError::Publish(anyhow!("not_in_channel")), StatusCode::BAD_GATEWAY),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_empty_transcript_message() {
        let err = ApiError::from(PipelineError::EmptyTranscript);
        assert_eq!(err.message(), "transcript is empty");
    }
}
