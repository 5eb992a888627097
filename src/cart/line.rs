//! Cart Lines

use rust_decimal::Decimal;

use crate::{
    cart::{CartError, Quantity},
    catalog::{CatalogItem, ItemId},
};

/// One catalog item in the cart, with its chosen quantity and subtotal.
///
/// Price and subtotal keep the catalog's exact decimal value.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    item_id: ItemId,
    name: String,
    unit: String,
    price: Decimal,
    quantity: Quantity,
    subtotal: Decimal,
}

impl CartLine {
    pub(crate) fn new(item: &CatalogItem, quantity: Quantity) -> Result<Self, CartError> {
        let price = item.price();

        if price < Decimal::ZERO {
            return Err(CartError::InvalidPrice(item.id()));
        }

        let subtotal = subtotal(item.id(), price, quantity)?;

        Ok(Self {
            item_id: item.id(),
            name: item.name().to_string(),
            unit: item.unit().to_string(),
            price,
            quantity,
            subtotal,
        })
    }

    /// Replaces the quantity and recomputes the subtotal.
    ///
    /// The line is left untouched on error.
    pub(crate) fn set_quantity(&mut self, quantity: Quantity) -> Result<(), CartError> {
        self.subtotal = subtotal(self.item_id, self.price, quantity)?;
        self.quantity = quantity;

        Ok(())
    }

    /// Returns the catalog item id
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Returns the item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the pricing unit
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the unit price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the quantity
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns price × quantity
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }
}

fn subtotal(item_id: ItemId, price: Decimal, quantity: Quantity) -> Result<Decimal, CartError> {
    price
        .checked_mul(Decimal::from(quantity.get()))
        .ok_or(CartError::SubtotalOverflow(item_id))
}
