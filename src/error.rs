use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslationError {
    /// Bad, missing or unsupported input.
    #[error("{0}")]
    Validation(String),

    /// The requested provider is not configured.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// The external provider errored or returned nothing usable.
    #[error("Translation failed: {0}")]
    ProviderFailure(String),

    /// A provider could not be constructed at start-up.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TranslationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TranslationError::Validation(_) => StatusCode::BAD_REQUEST,
            TranslationError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            TranslationError::ProviderFailure(_) | TranslationError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for TranslationError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            TranslationError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TranslationError::ServiceUnavailable("x".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            TranslationError::ProviderFailure("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn provider_failure_message_is_prefixed() {
        let err = TranslationError::ProviderFailure("timeout".into());
        assert_eq!(err.to_string(), "Translation failed: timeout");
    }
}
