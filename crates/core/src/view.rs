//! View bindings.
//!
//! The document tree is an external collaborator. The widget drives it
//! through [`CartView`] and [`SubmissionView`], so any UI layer (or
//! [`HeadlessView`] in tests) can sit behind them.

use std::collections::BTreeSet;

use crate::products::{CartEntry, ProductId};

/// Render model for a line in the cart list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Product shown on this line.
    pub product_id: ProductId,

    /// Currently selected quantity.
    pub quantity: u32,
}

impl From<&CartEntry> for CartLine {
    fn from(entry: &CartEntry) -> Self {
        Self {
            product_id: entry.product_id().clone(),
            quantity: entry.quantity(),
        }
    }
}

/// Cart list, total and product markers.
pub trait CartView {
    /// Replace the rendered cart list.
    fn render_lines(&mut self, lines: &[CartLine]);

    /// Show the formatted total.
    fn render_total(&mut self, total: &str);

    /// Show or hide the empty-cart indicator.
    fn set_empty_state(&mut self, visible: bool);

    /// Mark a catalog product as added to (or removed from) the cart.
    fn set_product_added(&mut self, product_id: &ProductId, added: bool);
}

/// Submit control, notices and the confirmation view.
pub trait SubmissionView {
    /// Enable or disable the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Change the submit control's label.
    fn set_submit_label(&mut self, label: &str);

    /// Surface a warning that needs user action.
    fn show_warning(&mut self, message: &str);

    /// Surface a failure.
    fn show_error(&mut self, message: &str);

    /// Hide the form and reveal the confirmation view.
    fn show_confirmation(&mut self);
}

/// A view that keeps the last rendered state in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessView {
    /// Rendered cart lines.
    pub lines: Vec<CartLine>,

    /// Rendered total.
    pub total: String,

    /// Whether the empty-cart indicator is visible.
    pub empty_state_visible: bool,

    /// Catalog products currently marked as added.
    pub added: BTreeSet<ProductId>,

    /// Whether the submit control accepts clicks.
    pub submit_enabled: bool,

    /// Submit control label; empty until the controller sets one.
    pub submit_label: String,

    /// Whether the form is visible.
    pub form_visible: bool,

    /// Whether the confirmation view is visible.
    pub confirmation_visible: bool,

    /// Warnings surfaced so far, oldest first.
    pub warnings: Vec<String>,

    /// Errors surfaced so far, oldest first.
    pub errors: Vec<String>,
}

impl HeadlessView {
    /// A view with the form showing and the submit control enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            total: String::new(),
            empty_state_visible: false,
            added: BTreeSet::new(),
            submit_enabled: true,
            submit_label: String::new(),
            form_visible: true,
            confirmation_visible: false,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl Default for HeadlessView {
    fn default() -> Self {
        Self::new()
    }
}

impl CartView for HeadlessView {
    fn render_lines(&mut self, lines: &[CartLine]) {
        self.lines = lines.to_vec();
    }

    fn render_total(&mut self, total: &str) {
        total.clone_into(&mut self.total);
    }

    fn set_empty_state(&mut self, visible: bool) {
        self.empty_state_visible = visible;
    }

    fn set_product_added(&mut self, product_id: &ProductId, added: bool) {
        if added {
            self.added.insert(product_id.clone());
        } else {
            self.added.remove(product_id);
        }
    }
}

impl SubmissionView for HeadlessView {
    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_submit_label(&mut self, label: &str) {
        label.clone_into(&mut self.submit_label);
    }

    fn show_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn show_confirmation(&mut self) {
        self.form_visible = false;
        self.confirmation_visible = true;
    }
}
