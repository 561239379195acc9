//! Pricing
//!
//! Display formatting for cart totals. Amounts are integer major units of a
//! single currency.

use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Formats a cart total the way it is shown to the user.
pub trait TotalFormatter {
    /// Format an integer amount for display.
    fn format_total(&self, amount: u64) -> String;
}

impl<F> TotalFormatter for F
where
    F: Fn(u64) -> String,
{
    fn format_total(&self, amount: u64) -> String {
        self(amount)
    }
}

/// Locale-aware formatter backed by `rusty-money`.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyFormatter {
    currency: &'static Currency,
}

impl CurrencyFormatter {
    /// Creates a formatter for the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }

    /// Get the currency used for display.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(iso::ARS)
    }
}

impl TotalFormatter for CurrencyFormatter {
    fn format_total(&self, amount: u64) -> String {
        let amount = i64::try_from(amount).unwrap_or(i64::MAX);

        Money::from_major(amount, self.currency).to_string()
    }
}
