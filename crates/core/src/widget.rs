//! Reservation widget.
//!
//! Command handlers that tie the cart, the submission controller and a view
//! together. Each handler takes typed input from whatever UI layer is
//! driving it and re-renders the derived state after the cart changes.

use tracing::{debug, trace, warn};

use crate::{
    cart::{Cart, CartError, parse_price, parse_quantity},
    pricing::{CurrencyFormatter, TotalFormatter},
    products::ProductId,
    reservation::ContactDetails,
    store::ReservationStore,
    submission::{SubmissionController, SubmissionOutcome, SubmissionState},
    view::{CartLine, CartView, SubmissionView},
};

/// Reservation widget
#[derive(Debug)]
pub struct ReservationWidget<S, V, F = CurrencyFormatter> {
    cart: Cart,
    controller: SubmissionController<S>,
    formatter: F,
    view: V,
    total_display: String,
}

impl<S, V> ReservationWidget<S, V, CurrencyFormatter>
where
    S: ReservationStore,
    V: CartView + SubmissionView,
{
    /// Create a widget with an empty cart, formatting totals in pesos.
    pub fn new(store: S, view: V) -> Self {
        Self::with_parts(
            SubmissionController::new(store),
            CurrencyFormatter::default(),
            view,
        )
    }
}

impl<S, V, F> ReservationWidget<S, V, F>
where
    S: ReservationStore,
    V: CartView + SubmissionView,
    F: TotalFormatter,
{
    /// Create a widget from a configured controller and formatter.
    ///
    /// The view is brought to its initial state: empty list, zero total,
    /// empty-cart indicator visible, submit control enabled.
    pub fn with_parts(controller: SubmissionController<S>, formatter: F, view: V) -> Self {
        let mut widget = Self {
            cart: Cart::new(),
            controller,
            formatter,
            view,
            total_display: String::new(),
        };

        widget.controller.mount(&mut widget.view);
        widget.refresh();

        widget
    }

    /// A product element was clicked.
    ///
    /// Returns `true` if the product was added. Invalid prices and products
    /// already in the cart leave everything unchanged.
    pub fn on_add_product(&mut self, product_id: &str, raw_price: &str) -> bool {
        let added = parse_price(raw_price)
            .and_then(|price| self.cart.add(product_id, price).map(|_entry| ()));

        match added {
            Ok(()) => {
                trace!(product = product_id, "product added");

                self.view.set_product_added(&ProductId::from(product_id), true);
                self.refresh();

                true
            }
            Err(error @ CartError::InvalidPrice(_)) => {
                warn!(product = product_id, %error, "ignoring product with invalid price");

                false
            }
            Err(error) => {
                debug!(product = product_id, %error, "ignoring add");

                false
            }
        }
    }

    /// A cart line's remove control was clicked.
    ///
    /// Returns `true` if the product was in the cart.
    pub fn on_remove_product(&mut self, product_id: &str) -> bool {
        let Some(entry) = self.cart.remove(product_id) else {
            debug!(product = product_id, "ignoring remove of product not in cart");

            return false;
        };

        trace!(product = product_id, "product removed");

        self.view.set_product_added(entry.product_id(), false);
        self.refresh();

        true
    }

    /// A cart line's quantity selection changed.
    ///
    /// Returns `true` if the quantity was applied.
    pub fn on_quantity_change(&mut self, product_id: &str, raw_quantity: &str) -> bool {
        let updated = parse_quantity(raw_quantity)
            .and_then(|quantity| self.cart.set_quantity(product_id, quantity).map(|_entry| ()));

        if let Err(error) = updated {
            debug!(product = product_id, %error, "ignoring quantity change");

            return false;
        }

        trace!(product = product_id, quantity = raw_quantity, "quantity changed");

        self.refresh();

        true
    }

    /// The reservation form was submitted.
    pub async fn on_submit(&mut self, contact: ContactDetails) -> SubmissionOutcome {
        self.controller
            .submit(&self.cart, contact, &self.total_display, &mut self.view)
            .await
    }

    /// The cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The view being driven.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Current submission state.
    pub fn submission_state(&self) -> SubmissionState {
        self.controller.state()
    }

    /// Submission states entered during the most recent submit.
    pub fn submission_transitions(&self) -> &[SubmissionState] {
        self.controller.transitions()
    }

    /// The total as last rendered.
    pub fn total_display(&self) -> &str {
        &self.total_display
    }

    /// Consume the widget, returning its view.
    pub fn into_view(self) -> V {
        self.view
    }

    fn refresh(&mut self) {
        let lines: Vec<CartLine> = self.cart.entries().map(CartLine::from).collect();

        self.view.render_lines(&lines);

        self.total_display = self.formatter.format_total(self.cart.total());
        self.view.render_total(&self.total_display);
        self.view.set_empty_state(self.cart.is_empty());
    }
}
