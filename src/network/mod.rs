//! HTTP networking module
//!
//! Provides the HTTP client shared by the search and text-generation stages.

mod client;

pub use client::{ApiRequest, ApiResponse, HttpClient, USER_AGENT};
