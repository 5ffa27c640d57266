use reqwest::{Client as HttpClient, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::models::{ContentRecord, MessageResponse, WatchHistoryRecord, WatchProgressUpdate};

/// Failures talking to the catalog backend
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: StatusCode, url: String },

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// HTTP client for the catalog endpoints
///
/// Every call is a single request; nothing is retried.
#[derive(Clone)]
pub struct CatalogClient {
    http_client: HttpClient,
    api_url: String,
}

impl CatalogClient {
    /// `backend_url` is the origin, `api_base_path` the prefix the routes live under
    pub fn new(backend_url: &str, api_base_path: &str) -> Self {
        Self::with_http_client(HttpClient::new(), backend_url, api_base_path)
    }

    pub fn with_http_client(http_client: HttpClient, backend_url: &str, api_base_path: &str) -> Self {
        let origin = backend_url.trim_end_matches('/');
        let base = api_base_path.trim_matches('/');
        let api_url = if base.is_empty() {
            origin.to_string()
        } else {
            format!("{}/{}", origin, base)
        };

        Self {
            http_client,
            api_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `GET /content`
    pub async fn list_content(&self) -> ClientResult<Vec<ContentRecord>> {
        let url = self.endpoint(&["content"])?;
        let response = self.http_client.get(url.clone()).send().await?;
        Self::decode(response, url).await
    }

    /// `GET /content/:contentId`; a 404 is `Ok(None)`
    pub async fn get_content(&self, content_id: &str) -> ClientResult<Option<ContentRecord>> {
        let url = self.endpoint(&["content", content_id])?;
        let response = self.http_client.get(url.clone()).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Self::decode(response, url).await.map(Some)
    }

    /// `GET /users/:userId/continueWatching`
    pub async fn continue_watching(&self, user_id: &str) -> ClientResult<Vec<WatchHistoryRecord>> {
        let url = self.endpoint(&["users", user_id, "continueWatching"])?;
        let response = self.http_client.get(url.clone()).send().await?;
        Self::decode(response, url).await
    }

    /// `POST /users/:userId/watchProgress`
    pub async fn report_progress(
        &self,
        user_id: &str,
        update: &WatchProgressUpdate,
    ) -> ClientResult<MessageResponse> {
        let url = self.endpoint(&["users", user_id, "watchProgress"])?;
        let response = self.http_client.post(url.clone()).json(update).send().await?;
        Self::decode(response, url).await
    }

    /// Appends `segments` to the API URL, percent-encoding each one
    ///
    /// Ids are opaque, so `?`, `#` and `/` inside one stay part of its segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.api_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(response: Response, url: Url) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = %url, status = %status, "Catalog request failed");
            return Err(ClientError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}
