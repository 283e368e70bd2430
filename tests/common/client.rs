//! HTTP client for end-to-end tests
//!
//! High-level wrapper around reqwest with methods for every endpoint.
//! When API routes change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// HTTP test client
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

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Mission plan endpoints
    // ========================================================================

    /// GET /api/mission-plan with a raw query string ("" or "?team=CAPS&limit=5")
    pub async fn get_mission_plan(&self, query: &str) -> Response {
        self.get(&format!("/api/mission-plan{}", query)).await
    }

    /// GET /api/mission-plan/{id}
    pub async fn get_mission_plan_entry(&self, id: &str) -> Response {
        self.get(&format!("/api/mission-plan/{}", id)).await
    }

    /// GET /api/mission-plan/search/text with a raw query string
    pub async fn search_mission_plan(&self, query: &str) -> Response {
        self.get(&format!("/api/mission-plan/search/text{}", query))
            .await
    }

    // ========================================================================
    // Metadata endpoints
    // ========================================================================

    pub async fn get_teams(&self) -> Response {
        self.get("/api/metadata/teams").await
    }

    pub async fn get_targets(&self) -> Response {
        self.get("/api/metadata/targets").await
    }

    pub async fn get_spass_types(&self) -> Response {
        self.get("/api/metadata/spass-types").await
    }

    pub async fn get_stats(&self) -> Response {
        self.get("/api/metadata/stats").await
    }

    // ========================================================================
    // Service endpoints
    // ========================================================================

    pub async fn get_health(&self) -> Response {
        self.get("/health").await
    }
}
