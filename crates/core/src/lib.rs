//! Reserva
//!
//! Cart and submission core for a product reservation form. The cart store and
//! submission controller are UI-agnostic: a document tree, a headless harness
//! or any other binding drives them through the command handlers on
//! [`widget::ReservationWidget`].

pub mod cart;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod reservation;
pub mod store;
pub mod submission;
pub mod view;
pub mod widget;
