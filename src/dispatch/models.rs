//! Search request and event data models

use crate::backends::Backend;
use crate::results::ResultBatch;
use crate::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identity of one accepted search invocation
///
/// Monotonically increasing per dispatcher; every event carries the id
/// of the invocation that produced it so consumers can discard events
/// from superseded searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InvocationId(pub u64);

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One search invocation's parameters
///
/// Read-only for the lifetime of the request; consumed by the worker
/// that executes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The dork query, trimmed
    pub query: String,
    /// Maximum number of results, clamped into [10, 200]
    pub limit: u32,
    /// Backend to run the query against
    pub backend: Backend,
    /// API key for backends that need one
    pub credential: Option<String>,
}

impl SearchRequest {
    /// Create a request with the default limit and no credential
    pub fn new(query: impl Into<String>, backend: Backend) -> Self {
        Self {
            query: query.into().trim().to_string(),
            limit: DEFAULT_LIMIT,
            backend,
            credential: None,
        }
    }

    /// Set the result limit, clamped into the valid range
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
        self
    }

    /// Attach a backend credential
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Check the invariants the dispatcher enforces before scheduling
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.query.trim().is_empty() {
            return Err(DispatchError::InvalidRequest(
                "query must not be empty".to_string(),
            ));
        }
        if self.backend.requires_credential()
            && self
                .credential
                .as_deref()
                .map_or(true, |c| c.trim().is_empty())
        {
            return Err(DispatchError::InvalidRequest(format!(
                "backend {} requires a credential",
                self.backend
            )));
        }
        Ok(())
    }
}

/// Event emitted by a search worker, tagged with its invocation
///
/// For one invocation exactly one `Progress` is emitted, followed by
/// exactly one `Completed`. No ordering is guaranteed across
/// invocations.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// Adapter status line, rendered verbatim by the consumer
    Progress { id: InvocationId, status: String },
    /// Final batch; empty on backend soft failure
    Completed { id: InvocationId, batch: ResultBatch },
}

impl SearchEvent {
    /// The invocation this event belongs to
    pub fn invocation(&self) -> InvocationId {
        match self {
            Self::Progress { id, .. } | Self::Completed { id, .. } => *id,
        }
    }
}

/// Errors reported synchronously by [`Dispatcher::submit`](super::Dispatcher::submit)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The request violates an invariant; no worker was scheduled
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_query() {
        let request = SearchRequest::new("  site:example.com  ", Backend::DuckDuckGo);
        assert_eq!(request.query, "site:example.com");
        assert_eq!(request.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_limit_clamping() {
        let low = SearchRequest::new("q", Backend::DuckDuckGo).with_limit(1);
        let high = SearchRequest::new("q", Backend::DuckDuckGo).with_limit(1000);
        assert_eq!(low.limit, MIN_LIMIT);
        assert_eq!(high.limit, MAX_LIMIT);
    }

    #[test]
    fn test_empty_query_is_invalid() {
        let request = SearchRequest::new("   ", Backend::DuckDuckGo);
        assert!(matches!(
            request.validate(),
            Err(DispatchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_external_api_requires_credential() {
        let request = SearchRequest::new("inurl:admin", Backend::ExternalApi);
        assert!(request.validate().is_err());

        let request = request.with_credential("  ");
        assert!(request.validate().is_err());

        let request = request.with_credential("key");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_duckduckgo_needs_no_credential() {
        let request = SearchRequest::new("site:example.com", Backend::DuckDuckGo);
        assert!(request.validate().is_ok());
    }
}
