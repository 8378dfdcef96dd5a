//! Query dispatcher: one worker task per accepted invocation

use super::models::{DispatchError, InvocationId, SearchEvent, SearchRequest};
use crate::backends::{Adapter, Backend, DuckDuckGoAdapter, ExternalSearchApiAdapter};
use crate::config::Settings;
use crate::network::HttpClient;
use crate::results::ResultBatch;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Dispatches search requests to backend workers
///
/// `submit` validates synchronously, then spawns one tokio task that
/// runs the selected adapter exactly once and emits a `Progress` event
/// followed by a `Completed` event on the channel handed out at
/// construction. Workers are never cancelled: once scheduled they run
/// to completion and emit their events even if a newer invocation has
/// been submitted since. Consumers use [`CurrentBatch`] to discard
/// events from superseded invocations.
pub struct Dispatcher {
    client: HttpClient,
    api_url: String,
    events: UnboundedSender<SearchEvent>,
    next_id: AtomicU64,
}

impl Dispatcher {
    /// Create a dispatcher and the single-consumer event channel
    pub fn new(client: HttpClient, settings: &Settings) -> (Self, UnboundedReceiver<SearchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            client,
            api_url: settings.outgoing.api_url.clone(),
            events: tx,
            next_id: AtomicU64::new(0),
        };
        (dispatcher, rx)
    }

    /// Validate and schedule one search invocation
    ///
    /// Returns the invocation id on success. On `InvalidRequest` no
    /// worker is scheduled and no event will ever be emitted for the
    /// rejected request.
    pub fn submit(&self, request: SearchRequest) -> Result<InvocationId, DispatchError> {
        request.validate()?;

        let id = InvocationId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let adapter = self.adapter_for(request.backend);
        let events = self.events.clone();

        info!(
            "Dispatching search {} '{}' to {} (limit {})",
            id, request.query, request.backend, request.limit
        );

        tokio::spawn(async move {
            let start = Instant::now();
            let outcome = adapter
                .execute(&request.query, request.limit, request.credential.as_deref())
                .await;

            debug!(
                "Search {} finished in {:?} with {} records",
                id,
                start.elapsed(),
                outcome.records.len()
            );

            // Receiver dropped means the consumer is gone; nothing to do.
            let _ = events.send(SearchEvent::Progress {
                id,
                status: outcome.status,
            });
            let batch = ResultBatch::new(request.query, adapter.name(), outcome.records);
            let _ = events.send(SearchEvent::Completed { id, batch });
        });

        Ok(id)
    }

    fn adapter_for(&self, backend: Backend) -> Arc<dyn Adapter> {
        match backend {
            Backend::DuckDuckGo => Arc::new(DuckDuckGoAdapter::new(self.client.clone())),
            Backend::ExternalApi => Arc::new(ExternalSearchApiAdapter::new(
                self.client.clone(),
                self.api_url.clone(),
            )),
        }
    }
}

/// Consumer-side holder of the current result batch
///
/// Tracks the most recently submitted invocation and accepts only its
/// events; events from older, still-running workers are discarded. The
/// batch is replaced wholesale on each accepted completion, never
/// merged. Only the consuming side mutates this.
#[derive(Debug, Default)]
pub struct CurrentBatch {
    latest: Option<InvocationId>,
    batch: Option<ResultBatch>,
}

impl CurrentBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as the invocation whose events are accepted
    pub fn track(&mut self, id: InvocationId) {
        self.latest = Some(id);
    }

    /// Apply an event; returns false if the event was stale and dropped
    pub fn accept(&mut self, event: &SearchEvent) -> bool {
        if Some(event.invocation()) != self.latest {
            debug!("Discarding stale event from {}", event.invocation());
            return false;
        }
        if let SearchEvent::Completed { batch, .. } = event {
            self.batch = Some(batch.clone());
        }
        true
    }

    /// The current batch, if a tracked invocation has completed
    pub fn batch(&self) -> Option<&ResultBatch> {
        self.batch.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{ResultRecord, NO_TITLE};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(api_url: String) -> Settings {
        let mut settings = Settings::default();
        settings.outgoing.api_url = api_url;
        settings
    }

    #[tokio::test]
    async fn test_invalid_request_schedules_nothing() {
        let settings = Settings::default();
        let (dispatcher, mut rx) = Dispatcher::new(HttpClient::new().unwrap(), &settings);

        let request = SearchRequest::new("inurl:admin", Backend::ExternalApi);
        let result = dispatcher.submit(request);
        assert!(matches!(result, Err(DispatchError::InvalidRequest(_))));

        // No worker was spawned, so no event can ever arrive.
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_progress_precedes_completion() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"title": "One", "url": "https://example.com/1"},
                    {"url": "https://example.com/2"},
                    {"title": "Three", "url": "https://example.com/3"}
                ]
            })))
            .mount(&server)
            .await;

        let settings = settings_for(format!("{}/search", server.uri()));
        let (dispatcher, mut rx) = Dispatcher::new(HttpClient::new().unwrap(), &settings);

        let request = SearchRequest::new("site:example.com filetype:pdf", Backend::ExternalApi)
            .with_limit(10)
            .with_credential("test-key");
        let id = dispatcher.submit(request).unwrap();

        let first = rx.recv().await.unwrap();
        match first {
            SearchEvent::Progress { id: got, status } => {
                assert_eq!(got, id);
                assert_eq!(status, "✅ Found 3 results");
            }
            other => panic!("expected progress first, got {:?}", other),
        }

        let second = rx.recv().await.unwrap();
        match second {
            SearchEvent::Completed { id: got, batch } => {
                assert_eq!(got, id);
                assert_eq!(batch.len(), 3);
                assert_eq!(batch.records[1].title, NO_TITLE);
                assert_eq!(batch.backend, "external_api");
            }
            other => panic!("expected completion second, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_soft_failure_completes_with_empty_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let settings = settings_for(format!("{}/search", server.uri()));
        let (dispatcher, mut rx) = Dispatcher::new(HttpClient::new().unwrap(), &settings);

        let request = SearchRequest::new("inurl:admin", Backend::ExternalApi)
            .with_credential("test-key");
        dispatcher.submit(request).unwrap();

        let progress = rx.recv().await.unwrap();
        match progress {
            SearchEvent::Progress { status, .. } => assert!(status.starts_with('❌')),
            other => panic!("expected progress, got {:?}", other),
        }

        let completed = rx.recv().await.unwrap();
        match completed {
            SearchEvent::Completed { batch, .. } => assert!(batch.is_empty()),
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_current_batch_discards_stale_events() {
        let mut current = CurrentBatch::new();
        let old = InvocationId(1);
        let new = InvocationId(2);
        current.track(new);

        let stale = SearchEvent::Completed {
            id: old,
            batch: ResultBatch::new("q", "duckduckgo", vec![ResultRecord::new("A", "u")]),
        };
        assert!(!current.accept(&stale));
        assert!(current.batch().is_none());

        let fresh = SearchEvent::Completed {
            id: new,
            batch: ResultBatch::new("q2", "duckduckgo", vec![ResultRecord::new("B", "u2")]),
        };
        assert!(current.accept(&fresh));
        assert_eq!(current.batch().unwrap().records[0].title, "B");
    }

    #[test]
    fn test_current_batch_replaces_wholesale() {
        let mut current = CurrentBatch::new();

        current.track(InvocationId(1));
        current.accept(&SearchEvent::Completed {
            id: InvocationId(1),
            batch: ResultBatch::new(
                "q1",
                "duckduckgo",
                vec![
                    ResultRecord::new("A", "ua"),
                    ResultRecord::new("B", "ub"),
                ],
            ),
        });

        current.track(InvocationId(2));
        current.accept(&SearchEvent::Completed {
            id: InvocationId(2),
            batch: ResultBatch::new("q2", "duckduckgo", vec![ResultRecord::new("C", "uc")]),
        });

        let batch = current.batch().unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.query, "q2");
    }
}
