//! DorkRecon: search-engine dork reconnaissance in Rust
//!
//! Dispatches a dork query to one of several pluggable search backends,
//! normalizes the provider responses into a single record type, and
//! exports the collected batch to CSV or JSON.

pub mod backends;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod network;
pub mod results;
pub mod templates;

pub use backends::{Adapter, AdapterOutcome, Backend};
pub use config::Settings;
pub use dispatch::{
    CurrentBatch, DispatchError, Dispatcher, InvocationId, SearchEvent, SearchRequest,
};
pub use export::{ExportError, ExportFormat};
pub use results::{ResultBatch, ResultRecord};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of results requested per search
pub const DEFAULT_LIMIT: u32 = 50;

/// Bounds for the per-search result limit
pub const MIN_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 200;

/// Default timeout for backend requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 10;
