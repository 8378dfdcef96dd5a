//! Query dispatch module
//!
//! Validates search requests, runs the selected backend adapter on a
//! background task, and delivers tagged progress/completion events to a
//! single consumer.

mod dispatcher;
mod models;

pub use dispatcher::{CurrentBatch, Dispatcher};
pub use models::{DispatchError, InvocationId, SearchEvent, SearchRequest};
