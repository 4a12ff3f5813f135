//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per API route.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    /// GET /v1/moods
    pub async fn get_moods(&self) -> Response {
        self.client
            .get(format!("{}/v1/moods", self.base_url))
            .send()
            .await
            .expect("Moods request failed")
    }

    /// POST /v1/mood
    pub async fn detect_mood(&self, text: &str) -> Response {
        self.client
            .post(format!("{}/v1/mood", self.base_url))
            .json(&json!({ "text": text }))
            .send()
            .await
            .expect("Mood request failed")
    }

    /// POST /v1/recommend
    pub async fn recommend(&self, text: &str) -> Response {
        self.client
            .post(format!("{}/v1/recommend", self.base_url))
            .json(&json!({ "text": text }))
            .send()
            .await
            .expect("Recommend request failed")
    }

    /// POST with an arbitrary body, for malformed-request tests
    pub async fn post_raw(&self, path: &str, body: &'static str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Raw request failed")
    }
}
