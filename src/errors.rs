use crate::render::LiveLookupXml;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Application-specific error types.
///
/// None of these ever reach the helpdesk as an error status: the
/// `IntoResponse` impl degrades every variant to the empty live lookup
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Transport-level failure talking to the directory (connect, TLS, timeout).
    ExternalApiError(String),
    /// Directory answered with something other than `200 OK`.
    UnexpectedStatus(u16),
    /// Directory body was empty, not JSON, or not shaped like a search result.
    InvalidPayload(String),
    /// XML serialization failed.
    RenderError(String),
    /// Internal server error.
    InternalError(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::UnexpectedStatus(code) => {
                write!(f, "Directory returned unexpected status {}", code)
            }
            AppError::InvalidPayload(msg) => write!(f, "Invalid directory payload: {}", msg),
            AppError::RenderError(msg) => write!(f, "Render error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Logs the error, then answers `200 OK` with the empty document so the
    /// helpdesk always receives well-formed XML.
    fn into_response(self) -> Response {
        match &self {
            AppError::ExternalApiError(msg) => {
                tracing::warn!("External API error: {}", msg);
            }
            AppError::UnexpectedStatus(code) => {
                tracing::warn!("Directory returned status {}", code);
            }
            AppError::InvalidPayload(msg) => {
                tracing::warn!("Invalid directory payload: {}", msg);
            }
            AppError::RenderError(msg) => {
                tracing::error!("Render error: {}", msg);
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
            }
        }

        LiveLookupXml::empty().into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ExternalApiError(format!("request timed out: {}", err))
        } else {
            AppError::ExternalApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    /// Converts a `serde_json::Error` into an `AppError`.
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};

    #[test]
    fn test_display_includes_status_code() {
        let err = AppError::UnexpectedStatus(503);
        assert_eq!(err.to_string(), "Directory returned unexpected status 503");
    }

    #[test]
    fn test_every_variant_degrades_to_xml_ok() {
        let errors = vec![
            AppError::ExternalApiError("connection refused".to_string()),
            AppError::UnexpectedStatus(500),
            AppError::InvalidPayload("not json".to_string()),
            AppError::RenderError("boom".to_string()),
            AppError::InternalError("boom".to_string()),
        ];

        for err in errors {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers().get(header::CONTENT_TYPE).unwrap(),
                "text/xml; charset=utf-8"
            );
        }
    }

    #[test]
    fn test_json_error_maps_to_invalid_payload() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(AppError::from(err), AppError::InvalidPayload(_)));
    }
}
