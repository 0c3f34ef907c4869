use crate::config::Config;
use crate::errors::AppError;
use crate::models::DirectoryUser;
use crate::query::SearchTerm;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

/// Path of the directory's free-text user search.
pub const SEARCH_PATH: &str = "/users/search";

/// Client for the external user-directory search API.
///
/// One attempt per lookup, no retries, redirects are not followed. Certificate and hostname verification
/// stay at reqwest's defaults (enabled).
#[derive(Clone)]
pub struct DirectoryClient {
    client: reqwest::Client,
    search_url: Url,
}

impl DirectoryClient {
    /// Creates a new `DirectoryClient`.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the base URL, timeout and User-Agent.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.directory_timeout())
            .user_agent(config.directory_user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create directory client: {}", e))
            })?;

        let search_url = Url::parse(&format!("{}{}", config.directory_base_url, SEARCH_PATH))
            .map_err(|e| AppError::InternalError(format!("Invalid directory URL: {}", e)))?;

        Ok(Self { client, search_url })
    }

    /// Searches the directory, degrading every failure to "no results".
    pub async fn search(&self, term: &SearchTerm) -> Vec<DirectoryUser> {
        match self.try_search(term).await {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!("Directory search for '{}' failed: {}", term, e);
                Vec::new()
            }
        }
    }

    /// Searches the directory, reporting why a lookup produced nothing.
    ///
    /// An empty term returns `Ok(vec![])` without touching the network.
    pub async fn try_search(&self, term: &SearchTerm) -> Result<Vec<DirectoryUser>, AppError> {
        if term.is_empty() {
            tracing::debug!("Empty search term, skipping directory call");
            return Ok(Vec::new());
        }

        let url = self.url_for(term);
        tracing::info!("Searching directory for '{}'", term);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let users = parse_search_payload(&body)?;

        tracing::info!("Directory returned {} user(s) for '{}'", users.len(), term);
        Ok(users)
    }

    /// Full search URL for `term`, with the term form-encoded as `q`.
    pub fn url_for(&self, term: &SearchTerm) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("q", term.as_str());
        url
    }
}

/// Extracts the `users` array from a directory search response body.
pub fn parse_search_payload(body: &str) -> Result<Vec<DirectoryUser>, AppError> {
    if body.is_empty() {
        return Err(AppError::InvalidPayload("empty body".to_string()));
    }

    let payload: Value = serde_json::from_str(body)?;
    let Value::Object(mut payload) = payload else {
        return Err(AppError::InvalidPayload(
            "response is not a JSON object".to_string(),
        ));
    };

    if let Some(total) = payload.get("total") {
        tracing::debug!("Directory reports {} total match(es)", total);
    }

    match payload.remove("users") {
        Some(Value::Array(users)) => Ok(users
            .into_iter()
            .map(DirectoryUser::from_value)
            .collect()),
        Some(_) => Err(AppError::InvalidPayload("'users' is not an array".to_string())),
        None => Err(AppError::InvalidPayload("missing 'users' field".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> DirectoryClient {
        DirectoryClient::new(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = DirectoryClient::new(&Config::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_url_encodes_term() {
        let url = client().url_for(&SearchTerm::new("Ada Lovelace&x=1"));
        assert_eq!(
            url.as_str(),
            "https://dummyjson.com/users/search?q=Ada+Lovelace%26x%3D1"
        );
    }

    #[tokio::test]
    async fn test_empty_term_short_circuits() {
        // Nothing listens on port 9; a network attempt would surface as an error.
        let config = Config {
            directory_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let client = DirectoryClient::new(&config).unwrap();
        let users = client.try_search(&SearchTerm::default()).await;
        assert_eq!(users, Ok(Vec::new()));
    }

    #[test]
    fn test_parse_users() {
        let body = json!({
            "users": [
                {"id": 5, "firstName": "Ada", "email": "a@b.com"},
                {"id": "6"}
            ],
            "total": 2,
            "skip": 0,
            "limit": 30
        })
        .to_string();

        let users = parse_search_payload(&body).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id.as_deref(), Some("5"));
        assert_eq!(users[0].email.as_deref(), Some("a@b.com"));
        assert_eq!(users[1].id.as_deref(), Some("6"));
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for body in [
            "",
            "not json",
            "[1, 2, 3]",
            "\"users\"",
            r#"{"total": 0}"#,
            r#"{"users": {"id": 1}}"#,
            r#"{"users": null}"#,
        ] {
            assert!(
                matches!(parse_search_payload(body), Err(AppError::InvalidPayload(_))),
                "expected InvalidPayload for {:?}",
                body
            );
        }
    }

    #[test]
    fn test_parse_empty_users_array() {
        let users = parse_search_payload(r#"{"users": [], "total": 0}"#).unwrap();
        assert!(users.is_empty());
    }
}
