//! Result batch owned by a single search invocation

use super::types::ResultRecord;
use serde::{Deserialize, Serialize};

/// An ordered sequence of records produced by exactly one search request
///
/// All records in a batch originate from a single backend and a single
/// request; batches are never merged. Duplicates are permitted and kept
/// in arrival order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultBatch {
    /// The query that produced this batch
    pub query: String,
    /// Name of the backend that produced this batch
    pub backend: String,
    /// Records in arrival order
    pub records: Vec<ResultRecord>,
}

impl ResultBatch {
    /// Create a batch from a backend's records
    pub fn new(
        query: impl Into<String>,
        backend: impl Into<String>,
        records: Vec<ResultRecord>,
    ) -> Self {
        Self {
            query: query.into(),
            backend: backend.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in arrival order
    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_preserves_order_and_duplicates() {
        let a = ResultRecord::new("A", "https://example.com/a");
        let batch = ResultBatch::new(
            "site:example.com",
            "duckduckgo",
            vec![a.clone(), a.clone()],
        );
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.records[0], batch.records[1]);
    }
}
