//! Repair Quote prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, CartLine, Quantity, QuotationCart},
    catalog::{CatalogItem, ItemId, School, SchoolCatalog, SchoolId},
    payload::{PayloadLine, QuotationSubmissionPayload},
    render::render_cart,
    services::{
        CreatedQuotation, HttpQuotationApi, ItemCatalogService, QuotationArtifactService,
        QuotationId, QuotationSubmissionService, ServiceError,
    },
    session::{QuotationServices, QuotationSession, RepairDetails, SessionError},
};
