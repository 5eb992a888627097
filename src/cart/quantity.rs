//! Quantity

use std::{fmt, num::NonZeroU32, str::FromStr};

use super::CartError;

/// A strictly positive line quantity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// Creates a quantity from an integer.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] when `value` is zero, negative or
    /// larger than `u32::MAX`.
    pub fn new(value: i64) -> Result<Self, CartError> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(CartError::InvalidQuantity)
    }

    /// Returns the quantity as an integer
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl FromStr for Quantity {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .ok()
            .ok_or(CartError::InvalidQuantity)?;

        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(quantity: Quantity) -> Self {
        i64::from(quantity.get())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
