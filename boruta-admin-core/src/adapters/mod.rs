//! Adapter implementations
//!
//! Adapters implement the port traits and the HTTP access layer:
//! - reqwest client for the Boruta admin users endpoint
//! - File and in-memory token stores for the TokenStore port
//! - Logging and recording navigators for the Navigator port
//! - Mock admin API server for testing

pub mod api_client;
pub mod navigation;
pub mod token_store;

#[cfg(test)]
pub mod admin_api_mock;

pub use api_client::{ApiClient, HttpResponse};
pub use navigation::{LogNavigator, RecordingNavigator};
pub use token_store::{FileTokenStore, MemoryTokenStore};
