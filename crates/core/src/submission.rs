//! Submission
//!
//! Drives a single reservation submit through validation, the store call and
//! the view transitions around it.
//!
//! ```text
//! Idle ──submit──▶ Validating ──empty──▶ Idle (warning)
//!                       │
//!                       ▼
//!                  Submitting ──ok──▶ Succeeded
//!                       │
//!                       └──err/timeout──▶ Failed ──▶ Idle
//! ```

use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, error, info, warn};

use crate::{
    cart::Cart,
    reservation::{ContactDetails, ReservationId, ReservationRequest},
    store::{ReservationStore, ReservationStoreError},
    view::SubmissionView,
};

/// How long a store call may take before the submit is treated as failed.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Controller state for the current submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Waiting for a submit; the submit control is enabled.
    Idle,

    /// Checking the cart before calling the store.
    Validating,

    /// Waiting on the store; the submit control is disabled.
    Submitting,

    /// The reservation was stored. Terminal.
    Succeeded,

    /// The store call failed; immediately followed by [`SubmissionState::Idle`].
    Failed,
}

/// Result of a submit command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The reservation was stored under the given identifier.
    Submitted(ReservationId),

    /// The cart was empty; the store was not called.
    EmptyCart,

    /// The store call failed or timed out; the user may submit again.
    Failed,

    /// A submit is in flight or has already succeeded.
    Ignored,
}

/// User-facing text shown around a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionCopy {
    /// Default submit control label.
    pub submit_label: String,

    /// Submit control label while the store call is pending.
    pub submitting_label: String,

    /// Warning shown when submitting an empty cart.
    pub empty_cart_warning: String,

    /// Generic message shown when the store call fails.
    pub failure_message: String,
}

impl Default for SubmissionCopy {
    fn default() -> Self {
        Self {
            submit_label: "Enviar Reserva".to_string(),
            submitting_label: "Enviando...".to_string(),
            empty_cart_warning: "Por favor, agrega al menos un producto a tu reserva.".to_string(),
            failure_message: "Hubo un error al enviar tu reserva. Por favor, intenta de nuevo."
                .to_string(),
        }
    }
}

/// Submission controller.
#[derive(Debug)]
pub struct SubmissionController<S> {
    store: S,
    state: SubmissionState,
    transitions: SmallVec<[SubmissionState; 4]>,
    copy: SubmissionCopy,
    timeout: Duration,
}

impl<S: ReservationStore> SubmissionController<S> {
    /// Create an idle controller writing to `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SubmissionState::Idle,
            transitions: SmallVec::new(),
            copy: SubmissionCopy::default(),
            timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    /// Replace the user-facing text.
    #[must_use]
    pub fn with_copy(mut self, copy: SubmissionCopy) -> Self {
        self.copy = copy;
        self
    }

    /// Replace the store call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Current state.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// States entered during the most recent submit attempt, in order.
    pub fn transitions(&self) -> &[SubmissionState] {
        &self.transitions
    }

    /// User-facing text in use.
    pub fn copy(&self) -> &SubmissionCopy {
        &self.copy
    }

    /// Put the submit control in its idle presentation.
    pub fn mount<V: SubmissionView>(&self, view: &mut V) {
        view.set_submit_enabled(true);
        view.set_submit_label(&self.copy.submit_label);
    }

    /// Submit the cart with the given contact details.
    ///
    /// `total_display` is the total currently shown to the user; it is stored
    /// verbatim. The store is called at most once per invocation and never
    /// retried.
    #[tracing::instrument(name = "submission.submit", skip_all, fields(entries = cart.len()))]
    pub async fn submit<V: SubmissionView>(
        &mut self,
        cart: &Cart,
        contact: ContactDetails,
        total_display: &str,
        view: &mut V,
    ) -> SubmissionOutcome {
        if matches!(
            self.state,
            SubmissionState::Submitting | SubmissionState::Succeeded
        ) {
            debug!(state = ?self.state, "ignoring submit");

            return SubmissionOutcome::Ignored;
        }

        self.transitions.clear();
        self.enter(SubmissionState::Validating);

        if cart.is_empty() {
            warn!("submit rejected: cart is empty");

            view.show_warning(&self.copy.empty_cart_warning);
            self.enter(SubmissionState::Idle);

            return SubmissionOutcome::EmptyCart;
        }

        self.enter(SubmissionState::Submitting);
        view.set_submit_enabled(false);
        view.set_submit_label(&self.copy.submitting_label);

        let request = ReservationRequest::from_cart(cart, contact, total_display);

        let Self {
            store,
            state,
            transitions,
            copy,
            timeout,
        } = &mut *self;

        let pending = PendingSubmit {
            state,
            transitions,
            view: &mut *view,
            submit_label: &copy.submit_label,
            settled: false,
        };

        let result = tokio::time::timeout(*timeout, store.create_reservation(request))
            .await
            .unwrap_or_else(|_elapsed| Err(ReservationStoreError::TimedOut(*timeout)));

        pending.settle();

        match result {
            Ok(id) => {
                info!(reservation_id = %id, "reservation saved");

                self.enter(SubmissionState::Succeeded);
                view.show_confirmation();

                SubmissionOutcome::Submitted(id)
            }
            Err(source) => {
                error!(error = %source, cause = ?source, "failed to save reservation");

                self.enter(SubmissionState::Failed);
                view.show_error(&self.copy.failure_message);
                view.set_submit_enabled(true);
                view.set_submit_label(&self.copy.submit_label);
                self.enter(SubmissionState::Idle);

                SubmissionOutcome::Failed
            }
        }
    }

    fn enter(&mut self, state: SubmissionState) {
        record_transition(&mut self.state, &mut self.transitions, state);
    }
}

fn record_transition(
    current: &mut SubmissionState,
    transitions: &mut SmallVec<[SubmissionState; 4]>,
    next: SubmissionState,
) {
    debug!(from = ?current, to = ?next, "submission transition");

    *current = next;
    transitions.push(next);
}

/// A store call in flight.
///
/// Dropped without [`PendingSubmit::settle`], it puts the controller back to
/// [`SubmissionState::Idle`] and re-enables the submit control.
struct PendingSubmit<'a, V: SubmissionView> {
    state: &'a mut SubmissionState,
    transitions: &'a mut SmallVec<[SubmissionState; 4]>,
    view: &'a mut V,
    submit_label: &'a str,
    settled: bool,
}

impl<V: SubmissionView> PendingSubmit<'_, V> {
    /// The store call finished; the caller handles the outcome.
    fn settle(mut self) {
        self.settled = true;
    }
}

impl<V: SubmissionView> Drop for PendingSubmit<'_, V> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        warn!("submit cancelled while waiting on the store");

        record_transition(self.state, self.transitions, SubmissionState::Idle);
        self.view.set_submit_enabled(true);
        self.view.set_submit_label(self.submit_label);
    }
}
