//! REST client for the Asana API.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{Task, TaskCompact};

/// Asana REST API base URL.
pub const ASANA_API_URL: &str = "https://app.asana.com/api/1.0";

/// Page size requested from list endpoints.
const PAGE_LIMIT: usize = 100;

/// Error returned when the Asana API responds with a non-success status.
#[derive(Debug, Error)]
#[error("Asana API error: {status} - {body}")]
pub struct ApiError {
    /// HTTP status returned by the API
    pub status: StatusCode,
    /// Response body text
    pub body: String,
}

/// Asana REST API client.
#[derive(Debug, Clone)]
pub struct AsanaClient {
    client: reqwest::Client,
    base_url: String,
}

/// Response envelope used by the Asana API.
///
/// Endpoints wrap their payload as `{"data": ...}` with an optional
/// `next_page` token; a bare payload is accepted too so that simple fixtures
/// keep working.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped {
        data: T,
        #[serde(default)]
        next_page: Option<NextPage>,
    },
    Bare(T),
}

/// Pagination token for list endpoints.
#[derive(Debug, Deserialize)]
struct NextPage {
    offset: String,
}

impl AsanaClient {
    /// Create a new Asana client with a Personal Access Token or OAuth token.
    ///
    /// # Errors
    /// Returns error if headers cannot be constructed
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_base_url(access_token, ASANA_API_URL)
    }

    /// Create a client against a custom API base URL (used in tests and
    /// supported via `ASANA_API_BASE_URL`).
    ///
    /// # Errors
    /// Returns error if headers cannot be constructed
    pub fn with_base_url(access_token: &str, base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {access_token}"))
                .context("Invalid access token")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Execute a GET request and deserialize the response.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request to Asana API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError { status, body }.into());
        }

        response
            .json()
            .await
            .context("Failed to parse Asana API response")
    }

    /// List all tasks in a project, following pagination tokens until the
    /// listing is exhausted.
    #[instrument(skip(self), fields(project_gid = %project_gid))]
    pub async fn list_project_tasks(&self, project_gid: &str) -> Result<Vec<TaskCompact>> {
        let mut tasks = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut url = format!(
                "{}/projects/{project_gid}/tasks?limit={PAGE_LIMIT}",
                self.base_url
            );
            if let Some(o) = &offset {
                url.push_str(&format!("&offset={o}"));
            }

            match self.get_json::<Envelope<Vec<TaskCompact>>>(&url).await? {
                Envelope::Wrapped { data, next_page } => {
                    tasks.extend(data);
                    match next_page {
                        Some(page) => offset = Some(page.offset),
                        None => break,
                    }
                }
                Envelope::Bare(data) => {
                    tasks.extend(data);
                    break;
                }
            }
        }

        debug!(count = tasks.len(), "Listed project tasks");
        Ok(tasks)
    }

    /// Fetch a task's full detail, including custom fields.
    #[instrument(skip(self), fields(task_gid = %task_gid))]
    pub async fn get_task(&self, task_gid: &str) -> Result<Task> {
        let url = format!("{}/tasks/{task_gid}", self.base_url);

        let task = match self.get_json::<Envelope<Task>>(&url).await? {
            Envelope::Wrapped { data, .. } | Envelope::Bare(data) => data,
        };

        debug!(name = %task.name, "Retrieved task");
        Ok(task)
    }

    /// Overwrite a task's notes (description).
    #[instrument(skip(self, notes), fields(task_gid = %task_gid))]
    pub async fn update_task_notes(&self, task_gid: &str, notes: &str) -> Result<()> {
        let url = format!("{}/tasks/{task_gid}", self.base_url);

        let response = self
            .client
            .put(&url)
            .json(&json!({ "notes": notes }))
            .send()
            .await
            .context("Failed to send task update to Asana API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError { status, body }.into());
        }

        debug!("Updated task notes");
        Ok(())
    }
}
