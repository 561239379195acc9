//! Reservation store.
//!
//! The document store that reservations are written to is an external
//! collaborator; the core only knows this trait.

use std::{error::Error as StdError, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::reservation::{ReservationId, ReservationRequest};

/// Errors raised while persisting a reservation.
#[derive(Debug, Error)]
pub enum ReservationStoreError {
    /// The store could not be reached.
    #[error("reservation store unreachable")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The store answered but refused the write.
    #[error("reservation rejected by store: {0}")]
    Rejected(String),

    /// The store did not answer in time.
    #[error("reservation store did not respond within {0:?}")]
    TimedOut(Duration),
}

/// Persists reservations.
#[automock]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Create a reservation document; the store assigns its timestamp.
    async fn create_reservation(
        &self,
        request: ReservationRequest,
    ) -> Result<ReservationId, ReservationStoreError>;
}
