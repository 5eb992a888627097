//! Cart rendering

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{cart::QuotationCart, money::round_for_display};

const EMPTY_CART_MESSAGE: &str = "No repair items selected";

/// Renders the cart as a table followed by its total.
///
/// Amounts are rounded to the cart currency's minor unit.
pub fn render_cart(cart: &QuotationCart) -> String {
    let currency = cart.currency();
    let total = round_for_display(cart.compute_total(), currency);

    if cart.is_empty() {
        return format!("{EMPTY_CART_MESSAGE}\nTotal: {total}\n");
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "Quantity", "Unit Price", "Subtotal"]);

    for line in cart.lines() {
        builder.push_record([
            line.name().to_string(),
            format!("{} {}", line.quantity(), line.unit()),
            round_for_display(line.price(), currency).to_string(),
            round_for_display(line.subtotal(), currency).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..4), Alignment::right());

    format!("{table}\nTotal: {total}\n")
}

/// Writes [`render_cart`] output to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cart(mut out: impl io::Write, cart: &QuotationCart) -> io::Result<()> {
    out.write_all(render_cart(cart).as_bytes())
}
