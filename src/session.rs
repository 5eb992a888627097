//! Quotation Session
//!
//! Drives one customer's quotation: pick a school, fill the cart from that
//! school's catalog, submit, then optionally fetch the generated documents.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::{CartError, CartLine, Quantity, QuotationCart},
    catalog::{ItemId, School, SchoolCatalog, SchoolId},
    services::{
        CreatedQuotation, HttpQuotationApi, ItemCatalogService, QuotationArtifactService,
        QuotationSubmissionService, ServiceError,
    },
};

/// Errors raised while building or submitting a quotation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A cart validation failure.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A remote service failure.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// An artifact could not be written to disk.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination path
        path: PathBuf,

        /// Underlying IO error
        source: std::io::Error,
    },
}

/// Who, where and when a quotation's repair happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairDetails {
    /// Person carrying out the repair
    pub repair_person: String,

    /// Location of the repair
    pub repair_location: String,

    /// Time of the repair, as entered
    pub repair_time: String,
}

/// The remote services a session talks to.
#[derive(Clone)]
pub struct QuotationServices {
    /// School and item catalog
    pub catalog: Arc<dyn ItemCatalogService>,

    /// Quotation submission
    pub submissions: Arc<dyn QuotationSubmissionService>,

    /// Generated quotation documents
    pub artifacts: Arc<dyn QuotationArtifactService>,
}

impl QuotationServices {
    /// Use a single HTTP client for every service.
    pub fn from_api(api: HttpQuotationApi) -> Self {
        let api = Arc::new(api);

        Self {
            catalog: api.clone(),
            submissions: api.clone(),
            artifacts: api,
        }
    }
}

impl fmt::Debug for QuotationServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuotationServices").finish_non_exhaustive()
    }
}

/// Quotation Session
#[derive(Debug)]
pub struct QuotationSession {
    services: QuotationServices,
    cart: QuotationCart,
    catalog: Option<SchoolCatalog>,
}

impl QuotationSession {
    /// Start a session with an empty cart and no school selected.
    pub fn new(services: QuotationServices) -> Self {
        Self::with_cart(services, QuotationCart::default())
    }

    /// Start a session around an existing cart.
    pub fn with_cart(services: QuotationServices, cart: QuotationCart) -> Self {
        Self {
            services,
            cart,
            catalog: None,
        }
    }

    /// List the schools a quotation can be made for.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Service`] when the catalog service fails.
    pub async fn schools(&self) -> Result<Vec<School>, SessionError> {
        Ok(self.services.catalog.list_schools().await?)
    }

    /// Select `school`, emptying the cart and loading the school's catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Service`] when the catalog cannot be loaded. The
    /// school stays selected, with an empty cart and no catalog.
    pub async fn select_school(&mut self, school: SchoolId) -> Result<&SchoolCatalog, SessionError> {
        self.cart.set_school(school);
        self.catalog = None;

        let items = self
            .services
            .catalog
            .list_items(school)
            .await
            .inspect_err(|error| warn!(%school, %error, "failed to load catalog"))?;

        info!(%school, items = items.len(), "school selected");

        Ok(self.catalog.insert(SchoolCatalog::new(school, items)))
    }

    /// Add the catalog item `item_id` with the quantity typed by the user,
    /// replacing the quantity if the item is already in the cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::NoItemSelected`]: no id, no catalog loaded, or the id is
    ///   not in the current catalog.
    /// - [`CartError::InvalidQuantity`]: `quantity` is not a positive integer.
    /// - any other error from [`QuotationCart::add_or_update_line`].
    pub fn add_item(
        &mut self,
        item_id: Option<ItemId>,
        quantity: &str,
    ) -> Result<&[CartLine], SessionError> {
        let item = item_id
            .and_then(|id| self.catalog.as_ref()?.get(id))
            .ok_or(CartError::NoItemSelected)?;

        let quantity: Quantity = quantity.parse()?;

        Ok(self.cart.add_or_update_line(Some(item), quantity.into())?)
    }

    /// Remove an item from the cart. Unknown ids are ignored.
    pub fn remove_item(&mut self, item_id: ItemId) -> Option<CartLine> {
        self.cart.remove_line(item_id)
    }

    /// Submit the cart as a quotation.
    ///
    /// The cart is only cleared once the submission service accepts it.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Cart`]: the cart or details failed validation; nothing
    ///   was sent.
    /// - [`SessionError::Service`]: the submission was rejected; the cart is
    ///   left as it was.
    pub async fn submit(&mut self, details: &RepairDetails) -> Result<CreatedQuotation, SessionError> {
        let payload = self.cart.to_submission_payload(
            self.cart.school(),
            &details.repair_person,
            &details.repair_location,
            &details.repair_time,
        )?;

        let created = self
            .services
            .submissions
            .submit(&payload)
            .await
            .inspect_err(|error| warn!(%error, "quotation submission failed"))?;

        info!(
            quotation = %created.quotation_number,
            school = %payload.school_id(),
            total = %payload.total_price(),
            "quotation submitted"
        );

        self.cart.clear();

        Ok(created)
    }

    /// Download the image and Excel documents for `quotation` into `dir`.
    ///
    /// Files are named after the quotation number. Returns the written paths
    /// (image first).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Service`] if either download fails and
    /// [`SessionError::Io`] if a file cannot be written.
    pub async fn download_artifacts(
        &self,
        quotation: &CreatedQuotation,
        dir: &Path,
    ) -> Result<[PathBuf; 2], SessionError> {
        let stem = file_stem(&quotation.quotation_number);

        let image = self.services.artifacts.image(quotation.id).await?;
        let image_path = write_artifact(dir.join(format!("{stem}.png")), &image).await?;

        let excel = self.services.artifacts.excel(quotation.id).await?;
        let excel_path = write_artifact(dir.join(format!("{stem}.xlsx")), &excel).await?;

        Ok([image_path, excel_path])
    }

    /// The cart being built.
    pub fn cart(&self) -> &QuotationCart {
        &self.cart
    }

    /// The loaded catalog for the selected school, if any.
    pub fn catalog(&self) -> Option<&SchoolCatalog> {
        self.catalog.as_ref()
    }
}

async fn write_artifact(path: PathBuf, bytes: &[u8]) -> Result<PathBuf, SessionError> {
    match tokio::fs::write(&path, bytes).await {
        Ok(()) => {
            info!(path = %path.display(), bytes = bytes.len(), "artifact saved");

            Ok(path)
        }
        Err(source) => Err(SessionError::Io { path, source }),
    }
}

fn file_stem(quotation_number: &str) -> String {
    quotation_number
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
