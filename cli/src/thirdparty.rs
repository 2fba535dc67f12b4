//! Stand-in third-party collaborators for local use.
//!
//! The payment and seat reservation providers are external systems. These
//! implementations accept every request and log it, so the command line can
//! run end to end without them. Replace them with real integrations in
//! production.

use cinema_tickets_core::environment::{SeatReservationService, TicketPaymentService};
use cinema_tickets_core::error::CollaboratorError;
use cinema_tickets_core::types::{AccountId, Money};
use std::sync::Arc;

/// Payment service that always succeeds
#[derive(Clone, Debug, Default)]
pub struct LoggingPaymentService;

impl LoggingPaymentService {
    /// Creates a new logging payment service
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn TicketPaymentService> {
        Arc::new(Self::new())
    }
}

impl TicketPaymentService for LoggingPaymentService {
    fn make_payment(&self, account_id: AccountId, amount: Money) -> Result<(), CollaboratorError> {
        tracing::info!(
            account_id = account_id.value(),
            amount = amount.units(),
            "Payment taken"
        );
        Ok(())
    }
}

/// Seat reservation service that always succeeds
#[derive(Clone, Debug, Default)]
pub struct LoggingSeatReservationService;

impl LoggingSeatReservationService {
    /// Creates a new logging reservation service
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared() -> Arc<dyn SeatReservationService> {
        Arc::new(Self::new())
    }
}

impl SeatReservationService for LoggingSeatReservationService {
    fn reserve_seat(&self, account_id: AccountId, seats: u32) -> Result<(), CollaboratorError> {
        tracing::info!(account_id = account_id.value(), seats, "Seats reserved");
        Ok(())
    }
}
