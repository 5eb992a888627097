//! Quotation Cart
//!
//! The working set of priced line items for a quotation that has not been
//! submitted yet. A cart is scoped to one school: prices only make sense under
//! the school they were quoted for, so changing school empties it.

use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{
    catalog::{CatalogItem, ItemId, SchoolId},
    payload::{PayloadLine, QuotationSubmissionPayload},
};

mod line;
mod quantity;

pub use line::CartLine;
pub use quantity::Quantity;

/// Errors raised by cart operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantity was zero, negative or not a whole number.
    #[error("quantity must be a positive whole number")]
    InvalidQuantity,

    /// No catalog item was selected.
    #[error("no repair item selected")]
    NoItemSelected,

    /// The cart has no lines to submit.
    #[error("at least one repair item is required")]
    EmptyCart,

    /// No school has been selected.
    #[error("no school selected")]
    MissingSchool,

    /// A required submission field was blank (field name).
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The item's price is negative (item id).
    #[error("item {0} has an invalid price")]
    InvalidPrice(ItemId),

    /// Price × quantity, or the cart total, is too large (item id).
    #[error("subtotal for item {0} is too large")]
    SubtotalOverflow(ItemId),
}

/// Quotation Cart
#[derive(Debug)]
pub struct QuotationCart {
    school: Option<SchoolId>,
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl QuotationCart {
    /// Create a new, empty cart with no school selected.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            school: None,
            lines: Vec::new(),
            currency,
        }
    }

    /// Switch to `school`, discarding every line priced under the previous one.
    pub fn set_school(&mut self, school: SchoolId) {
        self.school = Some(school);
        self.lines.clear();
    }

    /// Add `item` with `quantity`, or replace the quantity of its existing line.
    ///
    /// Re-adding an item overwrites its quantity; it does not accumulate.
    /// Returns the updated lines in insertion order.
    ///
    /// # Errors
    ///
    /// - [`CartError::NoItemSelected`]: `item` is `None`.
    /// - [`CartError::InvalidQuantity`]: `quantity` is not positive.
    /// - [`CartError::InvalidPrice`]: the item's price is negative.
    /// - [`CartError::SubtotalOverflow`]: the line or cart total would overflow.
    ///
    /// The cart is unchanged when an error is returned.
    pub fn add_or_update_line(
        &mut self,
        item: Option<&CatalogItem>,
        quantity: i64,
    ) -> Result<&[CartLine], CartError> {
        let item = item.ok_or(CartError::NoItemSelected)?;
        let quantity = Quantity::new(quantity)?;

        let mut line = match self.line(item.id()) {
            Some(existing) => existing.clone(),
            None => CartLine::new(item, quantity)?,
        };

        line.set_quantity(quantity)?;

        let total = self
            .lines
            .iter()
            .filter(|other| other.item_id() != item.id())
            .try_fold(line.subtotal(), |acc, other| acc.checked_add(other.subtotal()));

        if total.is_none() {
            return Err(CartError::SubtotalOverflow(item.id()));
        }

        match self.lines.iter_mut().find(|other| other.item_id() == item.id()) {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }

        Ok(&self.lines)
    }

    /// Remove the line for `item_id`, returning it. Absent ids are ignored.
    pub fn remove_line(&mut self, item_id: ItemId) -> Option<CartLine> {
        let position = self.lines.iter().position(|line| line.item_id() == item_id)?;

        Some(self.lines.remove(position))
    }

    /// Sum of every line's subtotal; zero for an empty cart.
    ///
    /// The sum is exact. Rounding to the currency's minor unit only happens
    /// when an amount is displayed.
    pub fn compute_total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Snapshot the cart as a submission payload.
    ///
    /// Text fields are trimmed. The cart is not modified; clearing it after a
    /// successful submission is up to the caller.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    ///
    /// - [`CartError::EmptyCart`]: there are no lines.
    /// - [`CartError::MissingSchool`]: `school` is `None`.
    /// - [`CartError::MissingField`]: the first blank of `repair_person`,
    ///   `repair_location` and `repair_time`.
    pub fn to_submission_payload(
        &self,
        school: Option<SchoolId>,
        repair_person: &str,
        repair_location: &str,
        repair_time: &str,
    ) -> Result<QuotationSubmissionPayload, CartError> {
        if self.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let school = school.ok_or(CartError::MissingSchool)?;

        let repair_person = required("repair_person", repair_person)?;
        let repair_location = required("repair_location", repair_location)?;
        let repair_time = required("repair_time", repair_time)?;

        Ok(QuotationSubmissionPayload::new(
            school,
            repair_person,
            repair_location,
            repair_time,
            self.lines.iter().map(PayloadLine::from).collect(),
            self.compute_total(),
        ))
    }

    /// Remove every line, keeping the selected school.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The currently selected school, if any.
    pub fn school(&self) -> Option<SchoolId> {
        self.school
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for `item_id`.
    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id() == item_id)
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl Default for QuotationCart {
    fn default() -> Self {
        Self::new(iso::CNY)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, CartError> {
    let value = value.trim();

    if value.is_empty() {
        Err(CartError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::CNY;
    use testresult::TestResult;

    use super::*;

    fn item(id: u64, name: &str, price: Decimal, unit: &str) -> CatalogItem {
        CatalogItem::new(ItemId(id), name, price, unit)
    }

    fn pipe() -> CatalogItem {
        item(7, "Pipe", Decimal::new(255, 1), "m")
    }

    fn valve() -> CatalogItem {
        item(9, "Valve", Decimal::new(120, 1), "pc")
    }

    fn cart_with_school() -> QuotationCart {
        let mut cart = QuotationCart::default();

        cart.set_school(SchoolId(1));

        cart
    }

    #[test]
    fn new_cart_is_empty_without_school() {
        let cart = QuotationCart::new(CNY);

        assert!(cart.is_empty());
        assert_eq!(cart.school(), None);
        assert_eq!(cart.currency(), CNY);
        assert_eq!(cart.compute_total(), Decimal::ZERO);
    }

    #[test]
    fn adding_new_item_appends_line() -> TestResult {
        let mut cart = cart_with_school();

        let lines = cart.add_or_update_line(Some(&pipe()), 3)?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(CartLine::item_id), Some(ItemId(7)));
        assert_eq!(
            lines.first().map(CartLine::subtotal),
            Some(Decimal::new(7650, 2))
        );

        Ok(())
    }

    #[test]
    fn re_adding_item_replaces_quantity() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&pipe()), 3)?;
        cart.add_or_update_line(Some(&pipe()), 2)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(ItemId(7)).map(|l| l.quantity().get()), Some(2));
        assert_eq!(
            cart.line(ItemId(7)).map(CartLine::subtotal),
            Some(Decimal::new(5100, 2))
        );

        Ok(())
    }

    #[test]
    fn re_adding_item_keeps_insertion_order() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&pipe()), 1)?;
        cart.add_or_update_line(Some(&valve()), 1)?;
        cart.add_or_update_line(Some(&pipe()), 4)?;

        let ids: Vec<_> = cart.lines().iter().map(CartLine::item_id).collect();

        assert_eq!(ids, vec![ItemId(7), ItemId(9)]);

        Ok(())
    }

    #[test]
    fn lines_stay_unique_per_item() -> TestResult {
        let mut cart = cart_with_school();

        let additions = [(pipe(), 1), (valve(), 2), (pipe(), 5), (valve(), 1), (pipe(), 2)];

        for (item, quantity) in additions {
            cart.add_or_update_line(Some(&item), quantity)?;
        }

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.line(ItemId(7)).map(|l| l.quantity().get()), Some(2));
        assert_eq!(cart.line(ItemId(9)).map(|l| l.quantity().get()), Some(1));

        Ok(())
    }

    #[test]
    fn missing_item_is_rejected() {
        let mut cart = cart_with_school();

        let result = cart.add_or_update_line(None, 1);

        assert_eq!(result, Err(CartError::NoItemSelected));
    }

    #[test]
    fn missing_item_is_reported_before_quantity() {
        let mut cart = cart_with_school();

        let result = cart.add_or_update_line(None, 0);

        assert_eq!(result, Err(CartError::NoItemSelected));
    }

    #[test]
    fn non_positive_quantity_is_rejected_without_storing() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&pipe()), 2)?;

        assert_eq!(
            cart.add_or_update_line(Some(&pipe()), 0),
            Err(CartError::InvalidQuantity)
        );
        assert_eq!(
            cart.add_or_update_line(Some(&valve()), -1),
            Err(CartError::InvalidQuantity)
        );

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(ItemId(7)).map(|l| l.quantity().get()), Some(2));

        Ok(())
    }

    #[test]
    fn overflowing_total_is_rejected() -> TestResult {
        let mut cart = cart_with_school();
        cart.add_or_update_line(Some(&item(1, "A", Decimal::MAX, "pc")), 1)?;

        let result = cart.add_or_update_line(Some(&item(2, "B", Decimal::MAX, "pc")), 1);

        assert_eq!(result, Err(CartError::SubtotalOverflow(ItemId(2))));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn total_sums_subtotals() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&item(1, "Tap", Decimal::new(5000, 2), "pc")), 2)?;
        cart.add_or_update_line(Some(&item(2, "Seal", Decimal::new(3000, 2), "pc")), 1)?;

        assert_eq!(cart.compute_total(), Decimal::new(13_000, 2));

        Ok(())
    }

    #[test]
    fn sub_fen_prices_are_not_rounded() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&item(3, "Washer", Decimal::new(125, 3), "pc")), 8)?;

        assert_eq!(cart.compute_total(), Decimal::ONE);

        let payload =
            cart.to_submission_payload(Some(SchoolId(1)), "Zhang", "RoomA", "2024-01-01")?;

        assert_eq!(payload.total_price(), Decimal::ONE);
        assert_eq!(
            payload.items().first().map(PayloadLine::price),
            Some(Decimal::new(125, 3))
        );
        assert_eq!(
            payload.items().first().map(PayloadLine::subtotal),
            Some(Decimal::ONE)
        );

        Ok(())
    }

    #[test]
    fn removing_line_drops_it_from_total() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&pipe()), 3)?;
        cart.add_or_update_line(Some(&valve()), 2)?;

        let removed = cart.remove_line(ItemId(7));

        assert_eq!(removed.as_ref().map(CartLine::item_id), Some(ItemId(7)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.compute_total(), Decimal::new(2400, 2));

        Ok(())
    }

    #[test]
    fn removing_unknown_line_is_noop() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&pipe()), 3)?;

        let before = cart.lines().to_vec();

        assert!(cart.remove_line(ItemId(404)).is_none());
        assert_eq!(cart.lines(), before.as_slice());
        assert_eq!(cart.compute_total(), Decimal::new(7650, 2));

        Ok(())
    }

    #[test]
    fn set_school_always_empties_cart() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&pipe()), 3)?;
        cart.set_school(SchoolId(2));

        assert!(cart.is_empty());
        assert_eq!(cart.school(), Some(SchoolId(2)));

        cart.add_or_update_line(Some(&valve()), 1)?;
        cart.set_school(SchoolId(2));

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn clear_keeps_school() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&pipe()), 1)?;
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.school(), Some(SchoolId(1)));

        Ok(())
    }

    #[test]
    fn payload_from_empty_cart_fails() {
        let cart = cart_with_school();

        let result =
            cart.to_submission_payload(Some(SchoolId(1)), "Zhang", "RoomA", "2024-01-01");

        assert_eq!(result, Err(CartError::EmptyCart));
    }

    #[test]
    fn empty_cart_is_reported_before_missing_school() {
        let cart = QuotationCart::default();

        let result = cart.to_submission_payload(None, "", "", "");

        assert_eq!(result, Err(CartError::EmptyCart));
    }

    #[test]
    fn payload_without_school_fails() -> TestResult {
        let mut cart = QuotationCart::default();

        cart.add_or_update_line(Some(&pipe()), 1)?;

        let result = cart.to_submission_payload(None, "Zhang", "RoomA", "2024-01-01");

        assert_eq!(result, Err(CartError::MissingSchool));

        Ok(())
    }

    #[test]
    fn payload_reports_first_blank_field() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&pipe()), 1)?;

        assert_eq!(
            cart.to_submission_payload(Some(SchoolId(1)), "  ", "", ""),
            Err(CartError::MissingField("repair_person"))
        );
        assert_eq!(
            cart.to_submission_payload(Some(SchoolId(1)), "Zhang", " ", ""),
            Err(CartError::MissingField("repair_location"))
        );
        assert_eq!(
            cart.to_submission_payload(Some(SchoolId(1)), "Zhang", "RoomA", "\t"),
            Err(CartError::MissingField("repair_time"))
        );

        Ok(())
    }

    #[test]
    fn payload_snapshots_lines_and_total() -> TestResult {
        let mut cart = cart_with_school();

        cart.add_or_update_line(Some(&pipe()), 3)?;
        cart.add_or_update_line(Some(&valve()), 2)?;

        let payload =
            cart.to_submission_payload(Some(SchoolId(1)), " Zhang ", "RoomA", "2024-01-01")?;

        assert_eq!(payload.school_id(), SchoolId(1));
        assert_eq!(payload.repair_person(), "Zhang");
        assert_eq!(payload.items().len(), 2);
        assert_eq!(payload.total_price(), Decimal::new(10_050, 2));
        assert_eq!(cart.len(), 2, "payload must not clear the cart");

        Ok(())
    }
}
