//! Reservation application: Firestore persistence, configuration and logging
//! for the `reserva` widget core.

pub mod config;
pub mod firestore;
pub mod observability;
