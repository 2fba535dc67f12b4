//! Purchase reducer: validation and pricing.
//!
//! The reducer is a pure function from a purchase request to either an
//! [`InvalidPurchase`] or a [`PurchasePlan`]. It never talks to the outside
//! world, so every rule can be tested without collaborators.

use crate::effect::Effect;
use crate::error::{InvalidPurchase, Result};
use crate::pricing::PriceTable;
use crate::rules::PurchaseRules;
use crate::types::{AccountId, Money, PurchaseRequest, PurchaseTotals, TicketCounts, TicketTypeRequest};
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

/// A validated, priced purchase waiting to be executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchasePlan {
    account_id: AccountId,
    counts: TicketCounts,
    totals: PurchaseTotals,
}

impl PurchasePlan {
    /// Account making the purchase
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Tickets per type
    #[must_use]
    pub const fn counts(&self) -> &TicketCounts {
        &self.counts
    }

    /// Amount to charge and seats to reserve
    #[must_use]
    pub const fn totals(&self) -> &PurchaseTotals {
        &self.totals
    }

    /// Collaborator calls to perform, in order: payment, then reservation.
    #[must_use]
    pub fn effects(&self) -> SmallVec<[Effect; 2]> {
        smallvec![
            Effect::MakePayment {
                account_id: self.account_id,
                amount: self.totals.total_amount,
            },
            Effect::ReserveSeats {
                account_id: self.account_id,
                seats: self.totals.total_seats,
            },
        ]
    }
}

/// Validates and prices ticket purchases.
///
/// Holds the shared price table and the purchase rules. Cheap to clone.
#[derive(Clone, Debug)]
pub struct PurchaseReducer {
    prices: Arc<PriceTable>,
    rules: PurchaseRules,
}

impl PurchaseReducer {
    /// Creates a reducer over the given prices and rules
    #[must_use]
    pub const fn new(prices: Arc<PriceTable>, rules: PurchaseRules) -> Self {
        Self { prices, rules }
    }

    /// Standard prices, default rules
    #[must_use]
    pub fn standard() -> Self {
        Self::new(PriceTable::shared(), PurchaseRules::default())
    }

    /// Price table in use
    #[must_use]
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Rules in use
    #[must_use]
    pub const fn rules(&self) -> &PurchaseRules {
        &self.rules
    }

    /// Validates a purchase and computes its totals.
    ///
    /// Checks, first failure wins:
    /// 1. account id is positive
    /// 2. at least one line item
    /// 3. ticket cap, adult presence, one adult lap per infant
    ///
    /// # Errors
    ///
    /// Returns the [`InvalidPurchase`] for the first check that fails.
    pub fn reduce(&self, account_id: i64, requests: &[TicketTypeRequest]) -> Result<PurchasePlan> {
        let account_id = AccountId::new(account_id)?;

        if requests.is_empty() {
            return Err(InvalidPurchase::NoTicketsRequested);
        }

        let counts = TicketCounts::from_requests(requests);
        self.rules.check(&counts)?;

        let totals = self.calculate_totals(requests)?;

        Ok(PurchasePlan {
            account_id,
            counts,
            totals,
        })
    }

    /// [`reduce`](Self::reduce) for a [`PurchaseRequest`].
    ///
    /// # Errors
    ///
    /// Same as [`reduce`](Self::reduce).
    pub fn reduce_request(&self, request: &PurchaseRequest) -> Result<PurchasePlan> {
        self.reduce(request.account_id, &request.ticket_type_requests)
    }

    /// Sums price and seats over the line items.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPurchase::Unexpected`] on arithmetic overflow.
    pub fn calculate_totals(&self, requests: &[TicketTypeRequest]) -> Result<PurchaseTotals> {
        let overflow = || InvalidPurchase::Unexpected("purchase total overflow".to_string());

        let mut total_amount = Money::ZERO;
        let mut total_seats: u32 = 0;

        for request in requests {
            let ticket_type = request.ticket_type();
            let quantity = request.no_of_tickets();

            let line_amount = self
                .prices
                .price_of(ticket_type)
                .checked_times(quantity)
                .ok_or_else(overflow)?;
            total_amount = total_amount.checked_add(line_amount).ok_or_else(overflow)?;

            if ticket_type.occupies_seat() {
                total_seats = total_seats.checked_add(quantity).ok_or_else(overflow)?;
            }
        }

        Ok(PurchaseTotals {
            total_amount,
            total_seats,
        })
    }
}

impl Default for PurchaseReducer {
    fn default() -> Self {
        Self::standard()
    }
}
