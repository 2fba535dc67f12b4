//! # Cinema Tickets Runtime
//!
//! [`TicketService`] is the entry point for buying tickets. It runs the pure
//! [`PurchaseReducer`] and, only if the purchase is valid, performs the
//! resulting effects against the collaborators in the
//! [`PurchaseEnvironment`]: payment first, then seat reservation.
//!
//! ## Example
//!
//! ```ignore
//! use cinema_tickets_runtime::TicketService;
//!
//! let service = TicketService::new(PurchaseReducer::standard(), env);
//! let receipt = service.purchase_tickets(1, &[
//!     TicketTypeRequest::new(TicketType::Adult, 2)?,
//!     TicketTypeRequest::new(TicketType::Child, 1)?,
//! ])?;
//! assert_eq!(receipt.totals.total_amount, Money::from_units(65));
//! ```

use cinema_tickets_core::effect::Effect;
use cinema_tickets_core::environment::PurchaseEnvironment;
use cinema_tickets_core::error::{CollaboratorError, InvalidPurchase};
use cinema_tickets_core::reducer::{PurchasePlan, PurchaseReducer};
use cinema_tickets_core::types::{PurchaseReceipt, PurchaseRequest, TicketTypeRequest};
use std::time::Instant;

pub mod metrics;

use metrics::PurchaseMetrics;

/// Validates, prices and executes ticket purchases.
///
/// Stateless between calls; safe to share across threads.
#[derive(Clone, Debug)]
pub struct TicketService {
    reducer: PurchaseReducer,
    env: PurchaseEnvironment,
}

impl TicketService {
    /// Creates a service from a reducer and the collaborators to call
    #[must_use]
    pub const fn new(reducer: PurchaseReducer, env: PurchaseEnvironment) -> Self {
        Self { reducer, env }
    }

    /// The reducer used for validation and pricing
    #[must_use]
    pub const fn reducer(&self) -> &PurchaseReducer {
        &self.reducer
    }

    /// Validates and prices a purchase without calling any collaborator.
    ///
    /// # Errors
    ///
    /// Returns the same [`InvalidPurchase`] that
    /// [`purchase_tickets`](Self::purchase_tickets) would.
    pub fn quote(
        &self,
        account_id: i64,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchasePlan, InvalidPurchase> {
        self.reducer.reduce(account_id, requests)
    }

    /// Buys tickets.
    ///
    /// On success the payment service has been charged with the total
    /// amount and the reservation service asked for the total seats, each
    /// exactly once and in that order. A rejected purchase calls neither.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPurchase`] if validation fails, or wraps the
    /// message of a collaborator failure. A failed reservation does not
    /// undo the payment.
    pub fn purchase_tickets(
        &self,
        account_id: i64,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseReceipt, InvalidPurchase> {
        let span = tracing::info_span!("purchase_tickets", account_id, line_items = requests.len());
        let _enter = span.enter();
        let started = Instant::now();

        let plan = match self.reducer.reduce(account_id, requests) {
            Ok(plan) => plan,
            Err(error) => {
                tracing::warn!(reason = %error, "Ticket purchase rejected");
                PurchaseMetrics::record_rejected(&error, started.elapsed());
                return Err(error);
            }
        };

        if let Err(error) = self.execute(&plan) {
            tracing::error!(reason = %error, "Collaborator call failed");
            let error = InvalidPurchase::from(error);
            PurchaseMetrics::record_rejected(&error, started.elapsed());
            return Err(error);
        }

        tracing::info!(
            total_amount = plan.totals().total_amount.units(),
            total_seats = plan.totals().total_seats,
            "Ticket purchase completed"
        );
        PurchaseMetrics::record_accepted(&plan, started.elapsed());

        Ok(PurchaseReceipt {
            account_id: plan.account_id(),
            counts: *plan.counts(),
            totals: *plan.totals(),
            purchased_at: self.env.clock.now(),
        })
    }

    /// [`purchase_tickets`](Self::purchase_tickets) for a [`PurchaseRequest`].
    ///
    /// # Errors
    ///
    /// Same as [`purchase_tickets`](Self::purchase_tickets).
    pub fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseReceipt, InvalidPurchase> {
        self.purchase_tickets(request.account_id, &request.ticket_type_requests)
    }

    /// Performs the plan's effects in order, stopping at the first failure.
    fn execute(&self, plan: &PurchasePlan) -> Result<(), CollaboratorError> {
        for effect in plan.effects() {
            tracing::debug!(effect = effect.name(), "Executing effect");
            match effect {
                Effect::MakePayment { account_id, amount } => {
                    self.env.payments.make_payment(account_id, amount)?;
                }
                Effect::ReserveSeats { account_id, seats } => {
                    self.env.reservations.reserve_seat(account_id, seats)?;
                }
            }
        }
        Ok(())
    }
}
