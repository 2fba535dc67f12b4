//! Dependency injection traits.
//!
//! The payment processor and the seat reservation system belong to the
//! outside world. They are abstracted behind traits and handed to the
//! runtime inside a [`PurchaseEnvironment`].

use crate::error::CollaboratorError;
use crate::types::{AccountId, Money};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Takes payment for a purchase.
pub trait TicketPaymentService: Send + Sync {
    /// Charge `amount` to the account.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Payment`] if the charge did not go through.
    fn make_payment(&self, account_id: AccountId, amount: Money) -> Result<(), CollaboratorError>;
}

/// Reserves seats in the auditorium.
pub trait SeatReservationService: Send + Sync {
    /// Reserve `seats` seats for the account.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Reservation`] if the seats could not be held.
    fn reserve_seat(&self, account_id: AccountId, seats: u32) -> Result<(), CollaboratorError>;
}

/// Clock trait - abstracts time operations for testability
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Collaborators a purchase runs against
#[derive(Clone)]
pub struct PurchaseEnvironment {
    /// Payment processor
    pub payments: Arc<dyn TicketPaymentService>,
    /// Seat reservation system
    pub reservations: Arc<dyn SeatReservationService>,
    /// Clock for receipt timestamps
    pub clock: Arc<dyn Clock>,
}

impl PurchaseEnvironment {
    /// Creates a new purchase environment
    #[must_use]
    pub fn new(
        payments: Arc<dyn TicketPaymentService>,
        reservations: Arc<dyn SeatReservationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            payments,
            reservations,
            clock,
        }
    }
}

impl std::fmt::Debug for PurchaseEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PurchaseEnvironment").finish_non_exhaustive()
    }
}
