//! Search backend module
//!
//! Defines the Adapter trait and the closed set of backend variants a
//! search can be dispatched to.

mod traits;

// Adapter implementations
pub mod duckduckgo;
pub mod external;

pub use duckduckgo::DuckDuckGoAdapter;
pub use external::ExternalSearchApiAdapter;
pub use traits::{Adapter, AdapterOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of search backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    DuckDuckGo,
    ExternalApi,
}

impl Backend {
    /// Backend name as recorded on batches and used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "duckduckgo",
            Self::ExternalApi => "external_api",
        }
    }

    /// Whether this backend requires a credential at submit time
    pub fn requires_credential(&self) -> bool {
        matches!(self, Self::ExternalApi)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            "external" | "external_api" | "api" => Ok(Self::ExternalApi),
            other => Err(format!("unknown backend: {}", other)),
        }
    }
}
