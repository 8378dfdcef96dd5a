//! Adapter trait and types

use crate::results::ResultRecord;
use async_trait::async_trait;

/// What an adapter hands back from one execution
///
/// Adapters never return an error: every provider-level fault is
/// absorbed at this boundary and surfaces as an empty record sequence
/// plus a human-readable status string. The status is prefixed with a
/// cross mark on failure and a check mark on success, and is rendered
/// verbatim by the caller.
#[derive(Debug, Clone, Default)]
pub struct AdapterOutcome {
    /// Normalized records in provider order
    pub records: Vec<ResultRecord>,
    /// Human-readable status line for this execution
    pub status: String,
}

impl AdapterOutcome {
    /// Successful execution with the standard status line
    pub fn found(records: Vec<ResultRecord>) -> Self {
        let status = format!("✅ Found {} results", records.len());
        Self { records, status }
    }

    /// Soft failure: no records, cross-marked status
    pub fn failed(message: impl AsRef<str>) -> Self {
        Self {
            records: Vec::new(),
            status: format!("❌ {}", message.as_ref()),
        }
    }
}

/// Capability every search backend implements
///
/// One adapter instance serves one backend; the dispatcher selects the
/// implementation from the request's [`Backend`](super::Backend) variant.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Adapter name, recorded on the batch
    fn name(&self) -> &str;

    /// Run the query against the provider, returning up to `limit`
    /// normalized records. Must not fail past this boundary.
    async fn execute(&self, query: &str, limit: u32, credential: Option<&str>) -> AdapterOutcome;
}
