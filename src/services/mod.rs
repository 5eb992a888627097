//! Remote Services
//!
//! Contracts for the quotation API the cart is fed from and submits to.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{CatalogItem, School, SchoolId},
    payload::QuotationSubmissionPayload,
};

pub mod http;

pub use http::HttpQuotationApi;

/// Quotation identifier
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct QuotationId(pub u64);

impl fmt::Display for QuotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a quotation the API accepted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CreatedQuotation {
    /// Quotation identifier, used to fetch artifacts
    pub id: QuotationId,

    /// Human-readable quotation number, e.g. `Q20240101120000123`
    pub quotation_number: String,
}

/// Errors returned by the remote services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,

        /// Error message reported by the API
        message: String,
    },
}

/// Resolves schools and the items priced for them.
#[automock]
#[async_trait]
pub trait ItemCatalogService: Send + Sync {
    /// List every school.
    async fn list_schools(&self) -> Result<Vec<School>, ServiceError>;

    /// List the items currently priced for `school`.
    async fn list_items(&self, school: SchoolId) -> Result<Vec<CatalogItem>, ServiceError>;
}

/// Accepts finished quotations.
#[automock]
#[async_trait]
pub trait QuotationSubmissionService: Send + Sync {
    /// Submit a quotation.
    async fn submit(
        &self,
        payload: &QuotationSubmissionPayload,
    ) -> Result<CreatedQuotation, ServiceError>;
}

/// Fetches the documents generated for a submitted quotation.
#[automock]
#[async_trait]
pub trait QuotationArtifactService: Send + Sync {
    /// Rendered PNG image of the quotation.
    async fn image(&self, quotation: QuotationId) -> Result<Vec<u8>, ServiceError>;

    /// Excel (`.xlsx`) export of the quotation.
    async fn excel(&self, quotation: QuotationId) -> Result<Vec<u8>, ServiceError>;
}
