//! Configuration for the budget sync service.

use std::env;

use crate::client::ASANA_API_URL;

/// Budget sync service configuration.
///
/// Loaded once at process start and injected into the server and client;
/// never read from the environment at call time.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// Asana Personal Access Token or OAuth token for API calls.
    pub access_token: Option<String>,
    /// GID of the project whose budget is aggregated.
    pub project_gid: String,
    /// Asana API base URL (overridable for tests).
    pub api_base_url: String,
    /// Maximum number of task-detail fetches in flight at once.
    pub fetch_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            access_token: env::var("ASANA_ACCESS_TOKEN")
                .ok()
                .filter(|s| !s.is_empty()),
            project_gid: env::var("ASANA_PROJECT_GID").unwrap_or_default(),
            api_base_url: env::var("ASANA_API_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| ASANA_API_URL.to_string()),
            fetch_concurrency: env::var("FETCH_CONCURRENCY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8),
        }
    }
}
