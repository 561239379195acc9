//! Cart

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{CartEntry, ProductId};

/// Largest quantity a single cart entry may hold.
pub const MAX_QUANTITY: u32 = 5;

new_key_type! {
    /// Cart Entry Key
    pub struct EntryKey;
}

/// Reasons a cart command left the cart unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product was already added; adding is idempotent per product.
    #[error("product {0} is already in the cart")]
    AlreadyInCart(ProductId),

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(String),

    /// The raw price is not a non-negative integer.
    #[error("invalid price {0:?}")]
    InvalidPrice(String),

    /// The raw quantity is not a positive integer.
    #[error("invalid quantity {0:?}")]
    InvalidQuantity(String),

    /// The quantity is a positive integer, but above [`MAX_QUANTITY`].
    #[error("quantity {0} is outside 1..={max}", max = MAX_QUANTITY)]
    QuantityOutOfRange(u32),
}

/// Parses a raw price attribute into an integer amount.
///
/// # Errors
///
/// Returns [`CartError::InvalidPrice`] unless the input is a non-negative integer.
pub fn parse_price(raw: &str) -> Result<u64, CartError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_err| CartError::InvalidPrice(raw.to_string()))
}

/// Parses a raw quantity selection.
///
/// # Errors
///
/// Returns [`CartError::InvalidQuantity`] unless the input is a positive integer.
pub fn parse_quantity(raw: &str) -> Result<u32, CartError> {
    match raw.trim().parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(CartError::InvalidQuantity(raw.to_string())),
    }
}

/// Cart
///
/// The authoritative record of selected products. Entries are keyed by product
/// and iterate in the order they were first added.
#[derive(Debug, Default)]
pub struct Cart {
    entries: SlotMap<EntryKey, CartEntry>,
    order: SmallVec<[EntryKey; 8]>,
    index: FxHashMap<ProductId, EntryKey>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product with quantity one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AlreadyInCart`] if the product is present; the
    /// existing entry is left untouched.
    pub fn add(
        &mut self,
        product_id: impl Into<ProductId>,
        unit_price: u64,
    ) -> Result<&CartEntry, CartError> {
        let product_id = product_id.into();

        if self.index.contains_key(&product_id) {
            return Err(CartError::AlreadyInCart(product_id));
        }

        let key = self
            .entries
            .insert(CartEntry::new(product_id.clone(), unit_price));

        self.order.push(key);
        self.index.insert(product_id.clone(), key);

        self.entries
            .get(key)
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))
    }

    /// Remove a product, returning its entry if it was present.
    pub fn remove(&mut self, product_id: &str) -> Option<CartEntry> {
        let key = self.index.remove(product_id)?;

        self.order.retain(|k| *k != key);

        self.entries.remove(key)
    }

    /// Update the quantity of a product already in the cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotInCart`]: the product has not been added.
    /// - [`CartError::InvalidQuantity`]: the quantity is zero.
    /// - [`CartError::QuantityOutOfRange`]: the quantity exceeds [`MAX_QUANTITY`].
    pub fn set_quantity(
        &mut self,
        product_id: &str,
        quantity: u32,
    ) -> Result<&CartEntry, CartError> {
        let entry = self
            .index
            .get(product_id)
            .and_then(|key| self.entries.get_mut(*key))
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;

        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity.to_string()));
        }

        if quantity > MAX_QUANTITY {
            return Err(CartError::QuantityOutOfRange(quantity));
        }

        entry.set_quantity(quantity);

        Ok(&*entry)
    }

    /// Get the entry for a product.
    pub fn get(&self, product_id: &str) -> Option<&CartEntry> {
        self.index
            .get(product_id)
            .and_then(|key| self.entries.get(*key))
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: &str) -> bool {
        self.index.contains_key(product_id)
    }

    /// Sum of `unit_price × quantity` over every entry; zero when empty.
    pub fn total(&self) -> u64 {
        self.entries()
            .map(CartEntry::line_total)
            .fold(0, u64::saturating_add)
    }

    /// Iterate over the entries in the order they were added.
    ///
    /// Each call starts a fresh iterator over the current state.
    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> + '_ {
        self.order.iter().filter_map(|key| self.entries.get(*key))
    }

    /// Get the number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_cart_is_empty_with_zero_total() {
        let cart = Cart::new();

        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.total(), 0);
        assert_eq!(cart.entries().count(), 0);
    }

    #[test]
    fn add_inserts_with_quantity_one() -> TestResult {
        let mut cart = Cart::new();

        let entry = cart.add("Empanada", 500)?;

        assert_eq!(entry.quantity(), 1);
        assert_eq!(entry.unit_price(), 500);
        assert_eq!(cart.total(), 500);

        Ok(())
    }

    #[test]
    fn add_is_idempotent_per_product() -> TestResult {
        let mut cart = Cart::new();

        cart.add("X", 100)?;
        let second = cart.add("X", 100);

        assert_eq!(second, Err(CartError::AlreadyInCart(ProductId::new("X"))));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("X").map(CartEntry::quantity), Some(1));

        Ok(())
    }

    #[test]
    fn add_again_keeps_existing_price_and_quantity() -> TestResult {
        let mut cart = Cart::new();

        cart.add("X", 100)?;
        cart.set_quantity("X", 4)?;
        assert!(cart.add("X", 999).is_err());

        assert_eq!(cart.get("X").map(CartEntry::unit_price), Some(100));
        assert_eq!(cart.get("X").map(CartEntry::quantity), Some(4));

        Ok(())
    }

    #[test]
    fn remove_absent_product_is_noop() -> TestResult {
        let mut cart = Cart::new();
        cart.add("Empanada", 500)?;

        assert!(cart.remove("Milanesa").is_none());
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn remove_then_add_appends_to_end() -> TestResult {
        let mut cart = Cart::new();

        cart.add("A", 1)?;
        cart.add("B", 2)?;
        cart.remove("A");
        cart.add("A", 1)?;

        let ids: Vec<&str> = cart.entries().map(|e| e.product_id().as_str()).collect();

        assert_eq!(ids, ["B", "A"]);

        Ok(())
    }

    #[test]
    fn entries_follow_insertion_order() -> TestResult {
        let mut cart = Cart::new();

        for id in ["Zapallo", "Alfajor", "Milanesa"] {
            cart.add(id, 10)?;
        }

        let ids: Vec<&str> = cart.entries().map(|e| e.product_id().as_str()).collect();

        assert_eq!(ids, ["Zapallo", "Alfajor", "Milanesa"]);

        Ok(())
    }

    #[test]
    fn entries_is_restartable() -> TestResult {
        let mut cart = Cart::new();
        cart.add("A", 1)?;
        cart.add("B", 2)?;

        assert_eq!(cart.entries().count(), 2);
        assert_eq!(cart.entries().count(), 2);

        cart.remove("A");

        assert_eq!(cart.entries().count(), 1);

        Ok(())
    }

    #[test]
    fn set_quantity_updates_total() -> TestResult {
        let mut cart = Cart::new();
        cart.add("Empanada", 500)?;
        cart.add("Milanesa", 1200)?;

        cart.set_quantity("Milanesa", 3)?;

        assert_eq!(cart.total(), 4100);

        Ok(())
    }

    #[test]
    fn set_quantity_on_absent_product_never_creates_entry() {
        let mut cart = Cart::new();

        let result = cart.set_quantity("Fantasma", 2);

        assert_eq!(result, Err(CartError::NotInCart("Fantasma".to_string())));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_rejects_zero() -> TestResult {
        let mut cart = Cart::new();
        cart.add("A", 100)?;

        assert!(matches!(
            cart.set_quantity("A", 0),
            Err(CartError::InvalidQuantity(_))
        ));
        assert_eq!(cart.get("A").map(CartEntry::quantity), Some(1));

        Ok(())
    }

    #[test]
    fn set_quantity_rejects_above_bound_without_clamping() -> TestResult {
        let mut cart = Cart::new();
        cart.add("A", 100)?;
        cart.set_quantity("A", 2)?;

        let result = cart.set_quantity("A", MAX_QUANTITY + 1);

        assert_eq!(result, Err(CartError::QuantityOutOfRange(MAX_QUANTITY + 1)));
        assert_eq!(cart.get("A").map(CartEntry::quantity), Some(2));

        Ok(())
    }

    #[test]
    fn set_quantity_accepts_bound() -> TestResult {
        let mut cart = Cart::new();
        cart.add("A", 100)?;

        cart.set_quantity("A", MAX_QUANTITY)?;

        assert_eq!(cart.total(), 500);

        Ok(())
    }

    #[test]
    fn parse_price_accepts_non_negative_integers() -> TestResult {
        assert_eq!(parse_price("0")?, 0);
        assert_eq!(parse_price(" 1200 ")?, 1200);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_garbage() {
        for raw in ["", "abc", "-5", "12.50"] {
            assert_eq!(
                parse_price(raw),
                Err(CartError::InvalidPrice(raw.to_string())),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn parse_quantity_rejects_non_positive() {
        for raw in ["0", "-1", "x", ""] {
            assert!(
                matches!(parse_quantity(raw), Err(CartError::InvalidQuantity(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn parse_quantity_accepts_positive() -> TestResult {
        assert_eq!(parse_quantity("3")?, 3);

        Ok(())
    }
}
