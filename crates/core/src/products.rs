//! Products

use std::{borrow::Borrow, fmt};

use serde::Serialize;

/// Catalog identifier of a product, as carried by the product element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One distinct product currently in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    product_id: ProductId,
    unit_price: u64,
    quantity: u32,
}

impl CartEntry {
    pub(crate) fn new(product_id: ProductId, unit_price: u64) -> Self {
        Self {
            product_id,
            unit_price,
            quantity: 1,
        }
    }

    /// Product identifier.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Unit price, as an integer amount.
    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Selected quantity; always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Line amount (`unit_price × quantity`), saturating at `u64::MAX`.
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }

    /// Human readable line, `"<quantity> x <product>"`.
    pub fn describe(&self) -> String {
        format!("{} x {}", self.quantity, self.product_id)
    }
}
