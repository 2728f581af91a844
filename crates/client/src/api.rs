//! REST API client for the job collection endpoints.

use async_trait::async_trait;
use serde::Deserialize;

use jobdeck_core::job::JobRecord;
use jobdeck_core::types::{JobId, PageNumber};

/// One page of the remote collection, as returned by `GET ?page=N`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPage {
    pub results: Vec<JobRecord>,
    /// Total number of records across all pages.
    pub count: u64,
    /// URL of the following page; `null` on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

impl JobPage {
    /// Whether the server reports a following page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Errors from the collection client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connection, DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The resource returned a non-2xx status code.
    #[error("collection resource error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Operations the view controller needs from the collection resource.
///
/// [`JobsApi`] is the production implementation. Implementations perform
/// no caching and no retries; retry policy belongs to the caller.
#[async_trait]
pub trait CollectionClient: Send + Sync {
    /// Fetch one page of the collection.
    async fn fetch_page(&self, page: PageNumber) -> Result<JobPage, ClientError>;

    /// Create a record from a draft without an `id`.
    async fn create(&self, draft: &JobRecord) -> Result<JobRecord, ClientError>;

    /// Replace the record with the given `id`.
    async fn update(&self, id: JobId, record: &JobRecord) -> Result<JobRecord, ClientError>;

    /// Delete the record with the given `id`.
    async fn delete(&self, id: JobId) -> Result<(), ClientError>;
}

/// `reqwest`-backed client for one collection resource.
pub struct JobsApi {
    client: reqwest::Client,
    base_url: String,
}

impl JobsApi {
    /// Create a client for the resource at `base_url`
    /// (e.g. `http://127.0.0.1:8000/jobs/`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across resources).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { client, base_url }
    }

    /// Base URL of the collection resource, with trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn record_url(&self, id: JobId) -> String {
        format!("{}{}/", self.base_url, id)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Status`] with
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Read a success body as text and decode it, keeping decode failures
    /// distinct from transport failures.
    async fn decode_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ClientError::Decode)
    }
}

#[async_trait]
impl CollectionClient for JobsApi {
    async fn fetch_page(&self, page: PageNumber) -> Result<JobPage, ClientError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page)])
            .send()
            .await?;

        let fetched = Self::decode_json::<JobPage>(response).await?;
        tracing::debug!(
            page,
            count = fetched.count,
            returned = fetched.results.len(),
            has_next = fetched.has_next(),
            "Fetched collection page",
        );
        Ok(fetched)
    }

    async fn create(&self, draft: &JobRecord) -> Result<JobRecord, ClientError> {
        let response = self.client.post(&self.base_url).json(draft).send().await?;

        let created = Self::decode_json::<JobRecord>(response).await?;
        tracing::info!(id = ?created.id, title = %created.title, "Created job record");
        Ok(created)
    }

    async fn update(&self, id: JobId, record: &JobRecord) -> Result<JobRecord, ClientError> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(record)
            .send()
            .await?;

        let updated = Self::decode_json::<JobRecord>(response).await?;
        tracing::info!(id, "Updated job record");
        Ok(updated)
    }

    async fn delete(&self, id: JobId) -> Result<(), ClientError> {
        let response = self.client.delete(self.record_url(id)).send().await?;

        Self::ensure_success(response).await?;
        tracing::info!(id, "Deleted job record");
        Ok(())
    }
}
