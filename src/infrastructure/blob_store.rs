// src/infrastructure/blob_store.rs
use crate::application::BlobStore;
use crate::constants::{DEFAULT_STORAGE_PREFIX, DEFAULT_URL_EXPIRY_SECS};
use crate::domain::{validate_storage_key, DomainError};
use crate::infrastructure::config::StorageConfig;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct PresignResponse {
    url: String,
}

/// Object store reached over HTTP.
///
/// Objects live at `{endpoint}/{prefix}{key}`; retrieval URLs are issued by
/// `{endpoint}/presign/{prefix}{key}`.
pub struct HttpBlobStore {
    endpoint: Url,
    prefix: String,
    url_expiry_secs: u64,
    client: reqwest::Client,
}

impl HttpBlobStore {
    pub fn new(endpoint: &str) -> Result<Self, DomainError> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            url_expiry_secs: DEFAULT_URL_EXPIRY_SECS,
            client: reqwest::Client::new(),
        })
    }

    pub fn from_config(
        config: &StorageConfig,
        connect_timeout_secs: u64,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: parse_endpoint(&config.endpoint)?,
            prefix: config.prefix.clone(),
            url_expiry_secs: config.url_expiry_secs,
            client,
        })
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_url_expiry_secs(mut self, secs: u64) -> Self {
        self.url_expiry_secs = secs;
        self
    }

    /// Endpoint URL, then `leading` segments, then the prefix, then the key
    /// as one percent-encoded segment
    fn object_url(&self, leading: &[&str], key: &str) -> Result<Url, DomainError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::Config(format!("Not a base URL: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(leading)
            .extend(self.prefix.split('/').filter(|segment| !segment.is_empty()))
            .push(key);
        Ok(url)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, DomainError> {
    Url::parse(endpoint)
        .map_err(|e| DomainError::Config(format!("Invalid storage endpoint '{endpoint}': {e}")))
}

fn store_error(key: &str, message: impl Into<String>) -> DomainError {
    DomainError::BlobStore {
        key: key.to_string(),
        message: message.into(),
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    #[instrument(level = "debug", skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), DomainError> {
        validate_storage_key(key)?;
        let url = self.object_url(&[], key)?;

        let response = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| store_error(key, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(store_error(key, format!("Status: {status}")));
        }
        debug!(%key, "Blob stored");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn get(&self, key: &str) -> Result<String, DomainError> {
        validate_storage_key(key)?;
        let url = self.object_url(&["presign"], key)?;

        let response = self
            .client
            .get(url)
            .query(&[("expires_in", self.url_expiry_secs)])
            .send()
            .await
            .map_err(|e| store_error(key, e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(DomainError::ImageNotFound(key.to_string())),
            status if !status.is_success() => Err(store_error(key, format!("Status: {status}"))),
            _ => {
                let body: PresignResponse = response
                    .json()
                    .await
                    .map_err(|e| store_error(key, format!("Invalid response: {e}")))?;
                Ok(body.url)
            }
        }
    }
}
