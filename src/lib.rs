//! Repair Quote
//!
//! Client library for building and submitting repair quotations: pick a
//! school, fill a cart from that school's priced repair items, submit it, and
//! fetch the generated documents.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod money;
pub mod payload;
pub mod prelude;
pub mod render;
pub mod services;
pub mod session;
