//! Reserva prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, MAX_QUANTITY, parse_price, parse_quantity},
    pricing::{CurrencyFormatter, TotalFormatter},
    products::{CartEntry, ProductId},
    reservation::{ContactDetails, ReservationId, ReservationRequest},
    store::{ReservationStore, ReservationStoreError},
    submission::{
        DEFAULT_SUBMIT_TIMEOUT, SubmissionController, SubmissionCopy, SubmissionOutcome,
        SubmissionState,
    },
    view::{CartLine, CartView, HeadlessView, SubmissionView},
    widget::ReservationWidget,
};
