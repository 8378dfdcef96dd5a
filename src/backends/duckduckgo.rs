//! DuckDuckGo backend adapter

use super::traits::{Adapter, AdapterOutcome};
use crate::network::HttpClient;
use crate::results::ResultRecord;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Results served per page by the HTML endpoint
const RESULTS_PER_PAGE: u32 = 30;

/// Adapter for the DuckDuckGo HTML endpoint
///
/// Ignores the credential. Pages through results with the `s` offset
/// form parameter until `limit` records are collected or a page comes
/// back empty. A result whose title text is empty is kept with the
/// "No Title" sentinel, a missing href becomes an empty URL.
pub struct DuckDuckGoAdapter {
    client: HttpClient,
    html_url: String,
}

impl DuckDuckGoAdapter {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            html_url: "https://html.duckduckgo.com/html/".to_string(),
        }
    }

    /// Point the adapter at a different endpoint (used by tests)
    pub fn with_html_url(mut self, url: impl Into<String>) -> Self {
        self.html_url = url.into();
        self
    }

    fn search_form(&self, query: &str, offset: u32) -> HashMap<String, String> {
        let mut form = HashMap::new();
        form.insert("q".to_string(), query.to_string());
        form.insert("b".to_string(), String::new());
        form.insert("kl".to_string(), "us-en".to_string());
        if offset > 0 {
            form.insert("s".to_string(), offset.to_string());
        }
        form
    }

    fn parse_html_results(&self, html: &str) -> Vec<ResultRecord> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        // DuckDuckGo HTML result selectors
        let result_selector = Selector::parse("div.result").unwrap();
        let title_selector = Selector::parse("a.result__a").unwrap();

        for element in document.select(&result_selector) {
            // Containers without a result anchor are navigation or ads
            let anchor = match element.select(&title_selector).next() {
                Some(a) => a,
                None => continue,
            };

            let title = anchor.text().collect::<String>();
            let url = anchor.value().attr("href").map(|h| h.to_string());

            // Skip DuckDuckGo internal links
            if let Some(ref u) = url {
                if u.contains("duckduckgo.com") {
                    continue;
                }
            }

            records.push(ResultRecord::normalized(Some(title), url));
        }

        records
    }
}

#[async_trait]
impl Adapter for DuckDuckGoAdapter {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn execute(&self, query: &str, limit: u32, _credential: Option<&str>) -> AdapterOutcome {
        let mut records: Vec<ResultRecord> = Vec::new();
        let mut offset = 0u32;

        while records.len() < limit as usize {
            let form = self.search_form(query, offset);

            let response = match self.client.post_form(&self.html_url, &form).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("DuckDuckGo request failed at offset {}: {}", offset, e);
                    if records.is_empty() {
                        return AdapterOutcome::failed(format!("DuckDuckGo Search Error: {}", e));
                    }
                    // Keep what earlier pages returned
                    break;
                }
            };

            if !response.is_success() {
                warn!("DuckDuckGo returned HTTP {} at offset {}", response.status, offset);
                if records.is_empty() {
                    return AdapterOutcome::failed(format!(
                        "DuckDuckGo Search Error: HTTP {}",
                        response.status
                    ));
                }
                break;
            }

            let page = self.parse_html_results(&response.text);
            if page.is_empty() {
                break;
            }

            records.extend(page);
            offset += RESULTS_PER_PAGE;
        }

        records.truncate(limit as usize);
        debug!("DuckDuckGo returned {} results", records.len());

        AdapterOutcome::found(records)
    }
}
