//! Result record definition

use serde::{Deserialize, Serialize};

/// Sentinel title for results the provider returned without one
pub const NO_TITLE: &str = "No Title";

/// A single normalized search result
///
/// Both fields are always present: backends substitute [`NO_TITLE`] for
/// a missing title and an empty string for a missing URL. Records are
/// immutable after creation and owned by the batch they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The title of the result
    pub title: String,
    /// The URL of the result
    pub url: String,
}

impl ResultRecord {
    /// Create a new record from already-present fields
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Create a record from optional provider fields, applying the
    /// normalization defaults
    pub fn normalized(title: Option<String>, url: Option<String>) -> Self {
        let title = match title {
            Some(t) if !t.trim().is_empty() => t,
            _ => NO_TITLE.to_string(),
        };
        Self {
            title,
            url: url.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_defaults() {
        let record = ResultRecord::normalized(None, None);
        assert_eq!(record.title, NO_TITLE);
        assert_eq!(record.url, "");
    }

    #[test]
    fn test_normalized_blank_title() {
        let record = ResultRecord::normalized(
            Some("   ".to_string()),
            Some("https://example.com/a".to_string()),
        );
        assert_eq!(record.title, NO_TITLE);
        assert_eq!(record.url, "https://example.com/a");
    }

    #[test]
    fn test_normalized_keeps_present_fields() {
        let record = ResultRecord::normalized(
            Some("Admin Panel".to_string()),
            Some("https://example.com/admin".to_string()),
        );
        assert_eq!(record.title, "Admin Panel");
        assert_eq!(record.url, "https://example.com/admin");
    }
}
