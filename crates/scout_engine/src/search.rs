use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::StatusCode;
use scout_core::{FailureKind, Listing, SearchError, SearchParams};
use scout_logging::{scout_debug, scout_warn};
use url::Url;

use crate::wire::decode_listings;

pub const DEFAULT_API_HOST: &str = "jsearch.p.rapidapi.com";

#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Endpoint root; `/search` and `/job-details` are resolved against it.
    pub base_url: String,
    /// Value of the `x-rapidapi-host` header.
    pub api_host: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: format!("https://{DEFAULT_API_HOST}"),
            api_host: DEFAULT_API_HOST.to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Remote job search capability. Implementations never retry on their own.
#[async_trait::async_trait]
pub trait JobSearchProvider: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<Vec<Listing>, SearchError>;

    async fn fetch_details(&self, listing_id: &str, country: &str)
        -> Result<Listing, SearchError>;
}

#[async_trait::async_trait]
impl<T: JobSearchProvider + ?Sized> JobSearchProvider for Arc<T> {
    async fn search(&self, params: &SearchParams) -> Result<Vec<Listing>, SearchError> {
        (**self).search(params).await
    }

    async fn fetch_details(
        &self,
        listing_id: &str,
        country: &str,
    ) -> Result<Listing, SearchError> {
        (**self).fetch_details(listing_id, country).await
    }
}

/// `JobSearchProvider` backed by the JSearch HTTP API.
#[derive(Debug, Clone)]
pub struct JSearchClient {
    settings: SearchSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl JSearchClient {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let mut base_url = Url::parse(&settings.base_url)
            .map_err(|err| SearchError::new(FailureKind::Network, format!("invalid base url: {err}")))?;
        // Keep a trailing slash so `join` appends instead of replacing the last segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    fn endpoint(&self, path: &str, pairs: &[(&str, String)]) -> Result<Url, SearchError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))?;
        url.query_pairs_mut()
            .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    /// Sends a GET and returns the body, mapping transport and status failures.
    /// `missing` is the failure reported for HTTP 404.
    async fn get(&self, url: Url, missing: FailureKind) -> Result<Vec<u8>, SearchError> {
        scout_debug!("GET {}", url.path());
        let response = self
            .client
            .get(url)
            .header("x-rapidapi-host", &self.settings.api_host)
            .header("x-rapidapi-key", &self.settings.api_key)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let kind = match status {
                StatusCode::TOO_MANY_REQUESTS => FailureKind::RateLimited,
                StatusCode::NOT_FOUND => missing,
                other => FailureKind::HttpStatus(other.as_u16()),
            };
            scout_warn!("Remote search answered {}", status);
            return Err(SearchError::new(kind, status.to_string()));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl JobSearchProvider for JSearchClient {
    async fn search(&self, params: &SearchParams) -> Result<Vec<Listing>, SearchError> {
        let url = self.endpoint("search", &params.query_pairs())?;
        let body = self
            .get(url, FailureKind::HttpStatus(StatusCode::NOT_FOUND.as_u16()))
            .await?;
        decode_listings(&body)
    }

    async fn fetch_details(
        &self,
        listing_id: &str,
        country: &str,
    ) -> Result<Listing, SearchError> {
        let pairs = [
            ("job_id", listing_id.to_string()),
            ("country", country.to_string()),
        ];
        let url = self.endpoint("job-details", &pairs)?;
        let body = self.get(url, FailureKind::NotFound).await?;
        decode_listings(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::new(FailureKind::NotFound, format!("no listing {listing_id}")))
    }
}

fn too_large(max_bytes: u64, actual: u64) -> SearchError {
    SearchError::new(
        FailureKind::InvalidResponse,
        format!("response too large (max {max_bytes}, actual {actual})"),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::new(FailureKind::Network, format!("timeout: {err}"));
    }
    if err.is_decode() {
        return SearchError::new(FailureKind::InvalidResponse, err.to_string());
    }
    SearchError::new(FailureKind::Network, err.to_string())
}
