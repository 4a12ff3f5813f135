//! Common test infrastructure
//!
//! Everything end-to-end tests need: a server on a random port backed by a
//! temporary CSV catalog and fake classification/search backends, plus an
//! HTTP client that knows the API routes.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestClient, TestServer};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_list_moods() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.get_moods().await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod fakes;
mod fixtures;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use fakes::FakeClassifier;
pub use constants::*;
pub use server::TestServer;
