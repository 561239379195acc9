//! Reservations

use std::fmt;

use serde::Serialize;

use crate::{cart::Cart, products::CartEntry};

/// Contact fields read from the reservation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    /// `customerName` form field.
    pub customer_name: String,

    /// `customerPhone` form field.
    pub customer_phone: String,

    /// `comments` form field.
    pub comments: String,
}

/// Snapshot of a cart and its contact details, ready to be persisted.
///
/// The submission timestamp is not part of the record; the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    customer_name: String,
    customer_phone: String,
    comments: String,
    product_lines: Vec<String>,
    total_display: String,
}

impl ReservationRequest {
    /// Builds a request from the current cart contents.
    ///
    /// `total_display` is the total exactly as shown to the user, not a
    /// recomputation.
    pub fn from_cart(
        cart: &Cart,
        contact: ContactDetails,
        total_display: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: contact.customer_name,
            customer_phone: contact.customer_phone,
            comments: contact.comments,
            product_lines: cart.entries().map(CartEntry::describe).collect(),
            total_display: total_display.into(),
        }
    }

    /// Customer name.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Customer phone number.
    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    /// Free-form comments.
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// One `"<quantity> x <product>"` line per cart entry, in cart order.
    pub fn product_lines(&self) -> &[String] {
        &self.product_lines
    }

    /// Total as displayed at submission time.
    pub fn total_display(&self) -> &str {
        &self.total_display
    }
}

/// Identifier handed back by the store for a created reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReservationId(String);

impl ReservationId {
    /// Wraps a store-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
