//! HTTP client for the quotation API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    catalog::{CatalogItem, School, SchoolId},
    payload::QuotationSubmissionPayload,
    services::{
        CreatedQuotation, ItemCatalogService, QuotationArtifactService, QuotationId,
        QuotationSubmissionService, ServiceError,
    },
};

/// reqwest-backed implementation of every quotation service.
#[derive(Debug, Clone)]
pub struct HttpQuotationApi {
    base_url: String,
    http: Client,
}

impl HttpQuotationApi {
    /// Create a client for the API rooted at `base_url`, e.g.
    /// `"http://127.0.0.1:5001/api"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client that reuses an existing reqwest [`Client`].
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { base_url, http }
    }

    /// The API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get(&self, path: &str) -> Result<Response, ServiceError> {
        let url = self.url(path);

        debug!(%url, "GET");

        let response = self.http.get(&url).send().await?;

        ensure_success(response).await
    }
}

#[async_trait]
impl ItemCatalogService for HttpQuotationApi {
    async fn list_schools(&self) -> Result<Vec<School>, ServiceError> {
        Ok(self.get("schools").await?.json().await?)
    }

    async fn list_items(&self, school: SchoolId) -> Result<Vec<CatalogItem>, ServiceError> {
        Ok(self
            .get(&format!("schools/{school}/items"))
            .await?
            .json()
            .await?)
    }
}

#[async_trait]
impl QuotationSubmissionService for HttpQuotationApi {
    async fn submit(
        &self,
        payload: &QuotationSubmissionPayload,
    ) -> Result<CreatedQuotation, ServiceError> {
        let url = self.url("quotations");

        debug!(%url, school = %payload.school_id(), items = payload.items().len(), "POST");

        let response = self.http.post(&url).json(payload).send().await?;

        Ok(ensure_success(response).await?.json().await?)
    }
}

#[async_trait]
impl QuotationArtifactService for HttpQuotationApi {
    async fn image(&self, quotation: QuotationId) -> Result<Vec<u8>, ServiceError> {
        let response = self.get(&format!("quotations/{quotation}/image")).await?;

        Ok(response.bytes().await?.to_vec())
    }

    async fn excel(&self, quotation: QuotationId) -> Result<Vec<u8>, ServiceError> {
        let response = self.get(&format!("quotations/{quotation}/excel")).await?;

        Ok(response.bytes().await?.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

async fn ensure_success(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = match response.text().await {
        Ok(text) => text,
        Err(error) => {
            warn!(status = status.as_u16(), %error, "failed to read error body");

            String::new()
        }
    };
    let message = error_message(&text);

    warn!(status = status.as_u16(), %message, "request failed");

    Err(ServiceError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Extracts the API's `{"error": ...}` message, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(|_| body.trim().to_string(), |b| b.error)
}
