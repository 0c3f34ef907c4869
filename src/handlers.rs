use crate::config::Config;
use crate::directory_client::DirectoryClient;
use crate::errors::AppError;
use crate::models::LookupRequest;
use crate::query::search_term_for;
use crate::render::{self, LiveLookupXml};
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the external user directory.
    pub directory: DirectoryClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let directory = DirectoryClient::new(&config)?;
        Ok(Self { config, directory })
    }
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "livelookup-bridge",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /livelookup
///
/// Live lookup endpoint polled by the helpdesk. Derives a search term from
/// the query string, asks the directory, and answers with the XML document.
/// Always `200 OK` with well-formed XML. A repeated field keeps its last
/// value.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `query` - `first_name`, `last_name`, `email`, `customer_id`, all optional.
pub async fn live_lookup(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<LiveLookupXml, AppError> {
    let request = LookupRequest::from_query(query.as_deref().unwrap_or(""));

    tracing::info!("GET /livelookup - params: {:?}", request);

    let term = search_term_for(&request);
    let users = state.directory.search(&term).await;
    let xml = render::render(&users)?;

    Ok(LiveLookupXml(xml))
}

/// Runs one lookup outside of HTTP, returning the document text.
pub async fn lookup_document(directory: &DirectoryClient, request: &LookupRequest) -> String {
    let term = search_term_for(request);
    let users = directory.search(&term).await;
    render::render_or_empty(&users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (status, Json(body)) = health().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "livelookup-bridge");
    }

    #[tokio::test]
    async fn test_lookup_document_without_input_is_empty() {
        let config = Config {
            directory_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let state = AppState::new(config).unwrap();
        let xml = lookup_document(&state.directory, &LookupRequest::default()).await;
        assert_eq!(xml, render::EMPTY_DOCUMENT);
    }
}
