//! Remote inputs.
//!
//! Fetches the vocabulary archive, the Strong's companion source and USFM
//! books over HTTP. The USFM endpoint is content-addressed and returns
//! `{ "content": "<base64>" }`; the decoded body is the USFM text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;

use crate::config::EndpointConfig;
use crate::core::books::Book;

use super::cache::ArchiveCache;
use super::error::{ServiceError, ServiceResult};

const ARCHIVE_CACHE_KEY: &str = "vocabulary-archive";
const STRONGS_CACHE_KEY: &str = "strongs-list";

/// HTTP fetcher for the three remote inputs.
pub struct Fetcher {
    client: Client,
    endpoints: EndpointConfig,
}

impl Fetcher {
    pub fn new(endpoints: EndpointConfig) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    /// Fetch the vocabulary archive, consulting the cache first.
    pub async fn fetch_archive(&self, cache: &mut dyn ArchiveCache) -> ServiceResult<Vec<u8>> {
        if let Some(bytes) = cache.get(ARCHIVE_CACHE_KEY) {
            log::debug!("Vocabulary archive served from cache ({} bytes)", bytes.len());
            return Ok(bytes);
        }

        log::info!("Fetching vocabulary archive from {}", self.endpoints.archive_url);
        let response = self.client.get(&self.endpoints.archive_url).send().await?;
        if !response.status().is_success() {
            return Err(ServiceError::status(format!(
                "archive fetch returned {}",
                response.status()
            )));
        }
        let bytes = response.bytes().await?.to_vec();
        cache.put(ARCHIVE_CACHE_KEY, bytes.clone());
        Ok(bytes)
    }

    /// Fetch the Strong's companion source (`article -> {terms, strongs}`).
    pub async fn fetch_strongs_list(&self, cache: &mut dyn ArchiveCache) -> ServiceResult<Vec<u8>> {
        if let Some(bytes) = cache.get(STRONGS_CACHE_KEY) {
            return Ok(bytes);
        }

        log::info!(
            "Fetching Strong's list from {}",
            self.endpoints.strongs_list_url
        );
        let response = self
            .client
            .get(&self.endpoints.strongs_list_url)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ServiceError::status(format!(
                "Strong's list fetch returned {}",
                response.status()
            )));
        }
        let bytes = response.bytes().await?.to_vec();
        cache.put(STRONGS_CACHE_KEY, bytes.clone());
        Ok(bytes)
    }

    /// Fetch and decode the USFM text for a book.
    pub async fn fetch_usfm(&self, book: &Book) -> ServiceResult<String> {
        let url = self
            .endpoints
            .translation_url
            .replace("{book}", &book.usfm_stem());

        log::info!("Fetching {} from {url}", book.code);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ServiceError::status(format!(
                "{} fetch returned {}",
                book.code,
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let encoded = body
            .get("content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| ServiceError::decode(format!("{}: no content field", book.code)))?;

        // content endpoints line-wrap the base64 payload
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let decoded = STANDARD.decode(compact.as_bytes())?;
        String::from_utf8(decoded)
            .map_err(|e| ServiceError::decode(format!("{}: invalid UTF-8: {e}", book.code)))
    }
}
