//! HTTP client for the quotes collection

use std::time::Duration;

use log::{debug, warn};
use reqwest::{Response, Url};

use super::error::{ApiError, ApiResult};
use super::model::{Quote, QuoteDraft, QuoteId};

/// Client for a remote quotes collection rooted at a base URL
/// (e.g. `http://localhost:5000/quotes`)
#[derive(Debug, Clone)]
pub struct QuotesClient {
    http: reqwest::Client,
    base: Url,
}

impl QuotesClient {
    /// Creates a client for the collection at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Unreachable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base })
    }

    /// The collection URL this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends path segments to the collection URL; each segment is percent-encoded
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// GET the whole collection
    pub async fn list(&self) -> ApiResult<Vec<Quote>> {
        let url = self.endpoint(&[])?;
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        read_quotes(response).await
    }

    /// GET the quotes whose author matches `author`, by the server's rules
    pub async fn search(&self, author: &str) -> ApiResult<Vec<Quote>> {
        let url = self.endpoint(&["search"])?;
        debug!("GET {} author={:?}", url, author);
        let response = self
            .http
            .get(url)
            .query(&[("author", author)])
            .send()
            .await?;
        read_quotes(response).await
    }

    /// POST a single-element batch containing `draft`
    pub async fn create(&self, draft: &QuoteDraft) -> ApiResult<()> {
        let url = self.endpoint(&[])?;
        debug!("POST {}", url);
        let response = self.http.post(url).json(&[draft]).send().await?;
        ensure_success(response).map(|_| ())
    }

    /// PUT `draft` over the quote identified by `id`
    pub async fn update(&self, id: &QuoteId, draft: &QuoteDraft) -> ApiResult<()> {
        let url = self.endpoint(&[id.as_str()])?;
        debug!("PUT {}", url);
        let response = self.http.put(url).json(draft).send().await?;
        ensure_success(response).map(|_| ())
    }

    /// DELETE the quote identified by `id`
    pub async fn delete(&self, id: &QuoteId) -> ApiResult<()> {
        let url = self.endpoint(&[id.as_str()])?;
        debug!("DELETE {}", url);
        let response = self.http.delete(url).send().await?;
        ensure_success(response).map(|_| ())
    }
}

fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if !status.is_success() {
        warn!("{} answered {}", response.url(), status);
        return Err(ApiError::RemoteRejected {
            status: status.as_u16(),
        });
    }
    Ok(response)
}

async fn read_quotes(response: Response) -> ApiResult<Vec<Quote>> {
    let response = ensure_success(response)?;
    let body = response.bytes().await?;
    let quotes: Vec<Quote> = serde_json::from_slice(&body)?;
    Ok(quotes)
}
