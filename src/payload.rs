//! Submission Payload

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    cart::CartLine,
    catalog::{ItemId, SchoolId},
};

/// A submitted line item, flattened to plain values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadLine {
    item_id: ItemId,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    unit: String,
    quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    subtotal: Decimal,
}

impl PayloadLine {
    /// Returns the catalog item id
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Returns the item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the pricing unit
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the line subtotal
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }
}

impl From<&CartLine> for PayloadLine {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item_id(),
            name: line.name().to_string(),
            price: line.price(),
            unit: line.unit().to_string(),
            quantity: line.quantity().get(),
            subtotal: line.subtotal(),
        }
    }
}

/// Snapshot of a cart, ready to send to the quotation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationSubmissionPayload {
    school_id: SchoolId,
    repair_person: String,
    repair_location: String,
    repair_time: String,
    items: Vec<PayloadLine>,
    #[serde(with = "rust_decimal::serde::float")]
    total_price: Decimal,
}

impl QuotationSubmissionPayload {
    pub(crate) fn new(
        school_id: SchoolId,
        repair_person: String,
        repair_location: String,
        repair_time: String,
        items: Vec<PayloadLine>,
        total_price: Decimal,
    ) -> Self {
        Self {
            school_id,
            repair_person,
            repair_location,
            repair_time,
            items,
            total_price,
        }
    }

    /// Returns the school the quotation is for
    pub fn school_id(&self) -> SchoolId {
        self.school_id
    }

    /// Returns who carries out the repair
    pub fn repair_person(&self) -> &str {
        &self.repair_person
    }

    /// Returns where the repair takes place
    pub fn repair_location(&self) -> &str {
        &self.repair_location
    }

    /// Returns when the repair takes place
    pub fn repair_time(&self) -> &str {
        &self.repair_time
    }

    /// Returns the line items in cart order
    pub fn items(&self) -> &[PayloadLine] {
        &self.items
    }

    /// Returns the sum of all line subtotals
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }
}
