//! Result data model
//!
//! Defines the normalized record type all backends produce and the
//! batch that owns the records of one search invocation.

mod batch;
mod types;

pub use batch::ResultBatch;
pub use types::{ResultRecord, NO_TITLE};
