//! Companion quote services.
//!
//! Two external services refine the generated TSV: "add-GL-quote" appends
//! `GLQuote`/`GLOccurrence` columns, and the GL-to-OL converter replaces
//! `OrigWords`/`Occurrence` with original-language quotations. Both take and
//! return TSV bodies.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::EndpointConfig;

use super::error::{ServiceError, ServiceResult};

/// The companion-service interface. Implemented over HTTP in production and
/// by stubs in tests.
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Append `GLQuote`/`GLOccurrence` columns to the TSV.
    async fn add_gl_quotes(&self, tsv: &str) -> ServiceResult<String>;

    /// Replace `OrigWords`/`Occurrence` with original-language quotations.
    async fn convert_to_ol(&self, tsv: &str) -> ServiceResult<String>;
}

/// HTTP client for the companion services.
pub struct HttpQuoteService {
    client: Client,
    gl_quote_url: String,
    ol_convert_url: String,
}

impl HttpQuoteService {
    pub fn new(endpoints: &EndpointConfig) -> Self {
        Self {
            client: Client::new(),
            gl_quote_url: endpoints.gl_quote_url.clone(),
            ol_convert_url: endpoints.ol_convert_url.clone(),
        }
    }

    async fn post_tsv(&self, url: &str, tsv: &str) -> ServiceResult<String> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "text/tab-separated-values")
            .body(tsv.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::status(format!(
                "{url} returned {}",
                response.status()
            )));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl QuoteService for HttpQuoteService {
    async fn add_gl_quotes(&self, tsv: &str) -> ServiceResult<String> {
        self.post_tsv(&self.gl_quote_url, tsv).await
    }

    async fn convert_to_ol(&self, tsv: &str) -> ServiceResult<String> {
        self.post_tsv(&self.ol_convert_url, tsv).await
    }
}
