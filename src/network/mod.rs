//! HTTP networking module
//!
//! Provides the HTTP client backends use to reach their providers.

mod client;
mod user_agent;

pub use client::{HttpClient, HttpResponse};
pub use user_agent::generate_user_agent;
