//! API error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use battlescore_core::error::{DirectorError, ProviderError};
use serde::Serialize;

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DirectorError` that implements
/// `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DirectorError);

impl From<DirectorError> for ApiError {
    fn from(err: DirectorError) -> Self {
        Self(err)
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        Self(DirectorError::Provider(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DirectorError::InvalidState(_) => (StatusCode::BAD_REQUEST, "invalid_state"),
            DirectorError::UnknownCharacter(_) => (StatusCode::BAD_REQUEST, "unknown_character"),
            DirectorError::NoCandidateTrack { .. } => (StatusCode::NOT_FOUND, "no_candidate_track"),
            DirectorError::Provider(ProviderError::Unavailable(_)) => {
                (StatusCode::BAD_GATEWAY, "provider_unavailable")
            }
            DirectorError::Provider(ProviderError::Timeout) => {
                (StatusCode::GATEWAY_TIMEOUT, "provider_timeout")
            }
            DirectorError::Provider(_) => (StatusCode::INTERNAL_SERVER_ERROR, "provider_error"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: DirectorError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_invalid_state_maps_to_400() {
        assert_eq!(
            status_of(DirectorError::InvalidState("no boss".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_unknown_character_maps_to_400() {
        assert_eq!(
            status_of(DirectorError::UnknownCharacter("Ghost".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_no_candidate_track_maps_to_404() {
        assert_eq!(
            status_of(DirectorError::NoCandidateTrack {
                query: "victory theme".into(),
            }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_provider_unavailable_maps_to_502() {
        assert_eq!(
            status_of(DirectorError::Provider(ProviderError::Unavailable(
                "down".into()
            ))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_provider_timeout_maps_to_504() {
        assert_eq!(
            status_of(DirectorError::Provider(ProviderError::Timeout)),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_exhausted_auth_retry_maps_to_500() {
        assert_eq!(
            status_of(DirectorError::Provider(ProviderError::AuthExpired)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
