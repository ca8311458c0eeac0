//! REST client for `/api/v1/bookmarks/`.

use crate::config::ApiConfig;
use crate::error::{BookmarksError, Result};
use crate::model::{Bookmark, CreateBookmarkRequest, UpdateBookmarkRequest};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Authenticated client for the bookmark backend.
///
/// Every call needs a bearer token; without one it fails with
/// [`BookmarksError::Unauthorized`] before touching the network.
#[derive(Debug, Clone)]
pub struct BookmarksClient {
    http: Client,
    collection: Url,
    token: Option<String>,
}

impl BookmarksClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api = Url::parse(&config.api_v1_url())
            .map_err(|e| BookmarksError::InvalidUrl(format!("{}: {}", config.api_v1_url(), e)))?;
        let collection = api
            .join("bookmarks/")
            .map_err(|e| BookmarksError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| BookmarksError::Request(e.to_string()))?;

        Ok(Self {
            http,
            collection,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// All bookmarks of the signed-in user.
    pub async fn list(&self) -> Result<Vec<Bookmark>> {
        let request = self.authorized(self.http.get(self.collection.clone()))?;
        let bookmarks: Vec<Bookmark> = json(send(request, None).await?).await?;
        tracing::debug!(count = bookmarks.len(), "loaded bookmarks");
        Ok(bookmarks)
    }

    pub async fn get(&self, id: i64) -> Result<Bookmark> {
        let request = self.authorized(self.http.get(self.item_url(id)?))?;
        json(send(request, Some(id)).await?).await
    }

    pub async fn create(&self, body: &CreateBookmarkRequest) -> Result<Bookmark> {
        let request = self.authorized(self.http.post(self.collection.clone()).json(body))?;
        let created: Bookmark = json(send(request, None).await?).await?;
        tracing::info!(id = created.id, episode = %created.episode_name, "bookmark created");
        Ok(created)
    }

    /// Replace the transcript text of a bookmark.
    pub async fn update_transcript(&self, id: i64, text: impl Into<String>) -> Result<Bookmark> {
        let body = UpdateBookmarkRequest {
            transcript_text: text.into(),
        };
        let request = self.authorized(self.http.put(self.item_url(id)?).json(&body))?;
        let updated = json(send(request, Some(id)).await?).await?;
        tracing::info!(id, "bookmark updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let request = self.authorized(self.http.delete(self.item_url(id)?))?;
        send(request, Some(id)).await?;
        tracing::info!(id, "bookmark deleted");
        Ok(())
    }

    fn item_url(&self, id: i64) -> Result<Url> {
        self.collection
            .join(&id.to_string())
            .map_err(|e| BookmarksError::InvalidUrl(e.to_string()))
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or(BookmarksError::Unauthorized)?;
        Ok(request.bearer_auth(token))
    }
}

async fn send(request: RequestBuilder, id: Option<i64>) -> Result<Response> {
    let response = request.send().await.map_err(|e| {
        tracing::warn!(error = %e, "bookmark request failed");
        BookmarksError::Request(e.to_string())
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    tracing::warn!(status = status.as_u16(), "bookmark backend rejected request");
    Err(match (status, id) {
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => BookmarksError::Unauthorized,
        (StatusCode::NOT_FOUND, Some(id)) => BookmarksError::NotFound(id),
        _ => BookmarksError::Status(status.as_u16()),
    })
}

async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| BookmarksError::Request(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| BookmarksError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = BookmarksClient::new(&ApiConfig::default()).unwrap();
        assert_eq!(
            client.collection.as_str(),
            "http://localhost:8001/api/v1/bookmarks/"
        );
        assert_eq!(
            client.item_url(42).unwrap().as_str(),
            "http://localhost:8001/api/v1/bookmarks/42"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            local_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(
            BookmarksClient::new(&config),
            Err(BookmarksError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let client = BookmarksClient::new(&ApiConfig::default())
            .unwrap()
            .with_token("");
        assert!(!client.has_token());
    }
}
