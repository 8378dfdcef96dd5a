//! External search API backend adapter

use super::traits::{Adapter, AdapterOutcome};
use crate::network::HttpClient;
use crate::results::ResultRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Adapter for a generic external search API
///
/// Best-effort alternate backend returning title/url pairs as JSON.
/// Requires an API key; without one the call is not attempted. Accepts
/// either a top-level `results` array or a serpapi-style
/// `organic_results` array, with `title` and `url`/`link` fields per
/// item.
pub struct ExternalSearchApiAdapter {
    client: HttpClient,
    api_url: String,
}

impl ExternalSearchApiAdapter {
    pub fn new(client: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    fn parse_results(&self, json: &serde_json::Value, limit: u32) -> Vec<ResultRecord> {
        let items = json
            .get("results")
            .or_else(|| json.get("organic_results"))
            .and_then(|v| v.as_array());

        let mut records = Vec::new();
        if let Some(items) = items {
            for item in items.iter().take(limit as usize) {
                let title = item
                    .get("title")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string());
                let url = item
                    .get("url")
                    .or_else(|| item.get("link"))
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string());
                records.push(ResultRecord::normalized(title, url));
            }
        }
        records
    }
}

#[async_trait]
impl Adapter for ExternalSearchApiAdapter {
    fn name(&self) -> &str {
        "external_api"
    }

    async fn execute(&self, query: &str, limit: u32, credential: Option<&str>) -> AdapterOutcome {
        let api_key = match credential {
            Some(key) if !key.trim().is_empty() => key,
            _ => return AdapterOutcome::failed("External search API requires an API key"),
        };

        let mut params = HashMap::new();
        params.insert("q".to_string(), query.to_string());
        params.insert("num".to_string(), limit.to_string());
        params.insert("api_key".to_string(), api_key.to_string());

        let response = match self.client.get_with_params(&self.api_url, &params).await {
            Ok(response) => response,
            Err(e) => {
                warn!("External API request failed: {}", e);
                return AdapterOutcome::failed(format!("External API Search Error: {}", e));
            }
        };

        if !response.is_success() {
            warn!("External API returned HTTP {}", response.status);
            return AdapterOutcome::failed(format!(
                "External API Search Error: HTTP {}",
                response.status
            ));
        }

        let json: serde_json::Value = match response.json() {
            Ok(json) => json,
            Err(e) => {
                warn!("External API returned unparseable body: {}", e);
                return AdapterOutcome::failed(format!("External API Search Error: {}", e));
            }
        };

        let records = self.parse_results(&json, limit);
        debug!("External API returned {} results", records.len());

        AdapterOutcome::found(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::NO_TITLE;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_missing_credential_skips_call() {
        // Endpoint that would fail loudly if hit
        let adapter =
            ExternalSearchApiAdapter::new(HttpClient::new().unwrap(), "http://127.0.0.1:1/search");
        let outcome = adapter.execute("intitle:index.of", 10, None).await;

        assert!(outcome.records.is_empty());
        assert!(outcome.status.contains("requires an API key"));
    }

    #[tokio::test]
    async fn test_execute_parses_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"title": "Exposed Backup", "url": "https://example.com/backup"},
                    {"url": "https://example.com/untitled"}
                ]
            })))
            .mount(&server)
            .await;

        let adapter = ExternalSearchApiAdapter::new(
            HttpClient::new().unwrap(),
            format!("{}/search", server.uri()),
        );
        let outcome = adapter
            .execute("intitle:index.of", 10, Some("test-key"))
            .await;

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].title, "Exposed Backup");
        assert_eq!(outcome.records[1].title, NO_TITLE);
        assert_eq!(outcome.status, "✅ Found 2 results");
    }

    #[tokio::test]
    async fn test_serpapi_shaped_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic_results": [
                    {"title": "Login Portal", "link": "https://example.com/login"}
                ]
            })))
            .mount(&server)
            .await;

        let adapter = ExternalSearchApiAdapter::new(
            HttpClient::new().unwrap(),
            format!("{}/search", server.uri()),
        );
        let outcome = adapter.execute("inurl:admin", 10, Some("k")).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].url, "https://example.com/login");
    }

    #[tokio::test]
    async fn test_execute_soft_fails_on_bad_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let adapter = ExternalSearchApiAdapter::new(
            HttpClient::new().unwrap(),
            format!("{}/search", server.uri()),
        );
        let outcome = adapter.execute("inurl:admin", 10, Some("k")).await;

        assert!(outcome.records.is_empty());
        assert!(outcome.status.starts_with("❌ External API Search Error"));
    }
}
