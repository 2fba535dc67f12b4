//! Ergonomic testing utilities for ticket purchases
//!
//! This module provides a fluent API for testing purchases with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // PurchaseTest is the natural name
#![allow(clippy::panic)] // Test code can panic
#![allow(clippy::expect_used)] // Test code can use expect

use crate::mocks::{CallLog, CollaboratorCall, recording_environment};
use cinema_tickets_core::environment::PurchaseEnvironment;
use cinema_tickets_core::error::InvalidPurchase;
use cinema_tickets_core::reducer::PurchaseReducer;
use cinema_tickets_core::types::{Money, PurchaseReceipt, TicketTypeRequest};
use cinema_tickets_runtime::TicketService;

type PurchaseOutcome = Result<PurchaseReceipt, InvalidPurchase>;

/// Type alias for outcome assertion functions
type OutcomeAssertion = Box<dyn FnOnce(i64, &PurchaseOutcome, &[CollaboratorCall])>;

/// Fluent API for testing purchases with Given-When-Then syntax
///
/// Runs the purchase through a real [`TicketService`] wired to recording
/// collaborators, then checks the outcome and the calls made.
///
/// # Example
///
/// ```ignore
/// use cinema_tickets_testing::{PurchaseTest, adult, child};
///
/// PurchaseTest::new()
///     .given_account(1)
///     .when_purchasing(vec![child(2)])
///     .then_rejected_with(InvalidPurchase::AdultRequired)
///     .run();
/// ```
pub struct PurchaseTest {
    reducer: PurchaseReducer,
    environment: PurchaseEnvironment,
    calls: CallLog,
    account_id: Option<i64>,
    requests: Option<Vec<TicketTypeRequest>>,
    assertions: Vec<OutcomeAssertion>,
}

impl PurchaseTest {
    /// Standard prices and rules, recording collaborators
    #[must_use]
    pub fn new() -> Self {
        let (environment, calls) = recording_environment();
        Self {
            reducer: PurchaseReducer::standard(),
            environment,
            calls,
            account_id: None,
            requests: None,
            assertions: Vec::new(),
        }
    }

    /// Use a different reducer (custom rules)
    #[must_use]
    pub fn with_reducer(mut self, reducer: PurchaseReducer) -> Self {
        self.reducer = reducer;
        self
    }

    /// Use a different environment; `calls` is the log its collaborators write to
    #[must_use]
    pub fn with_env(mut self, environment: PurchaseEnvironment, calls: CallLog) -> Self {
        self.environment = environment;
        self.calls = calls;
        self
    }

    /// Set the purchasing account (Given)
    #[must_use]
    pub const fn given_account(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Set the line items to buy (When)
    #[must_use]
    pub fn when_purchasing(mut self, requests: Vec<TicketTypeRequest>) -> Self {
        self.requests = Some(requests);
        self
    }

    /// Expect exactly one payment, for the given account and amount (Then)
    #[must_use]
    pub fn then_payment(mut self, amount: u64) -> Self {
        self.assertions.push(Box::new(move |account_id: i64, _: &PurchaseOutcome, calls: &[CollaboratorCall]| {
            let payments: Vec<_> = calls
                .iter()
                .filter_map(|call| match call {
                    CollaboratorCall::Payment {
                        account_id: charged,
                        amount: charged_amount,
                    } => Some((*charged, *charged_amount)),
                    CollaboratorCall::Reservation { .. } => None,
                })
                .collect();
            assert_eq!(payments.len(), 1, "Expected exactly one payment, found {calls:?}");
            assert_eq!(payments[0].0.value(), account_id);
            assert_eq!(payments[0].1, Money::from_units(amount));
        }));
        self
    }

    /// Expect exactly one reservation, after any payment (Then)
    #[must_use]
    pub fn then_reservation(mut self, seats: u32) -> Self {
        self.assertions.push(Box::new(move |account_id: i64, _: &PurchaseOutcome, calls: &[CollaboratorCall]| {
            let position = calls
                .iter()
                .position(|call| matches!(call, CollaboratorCall::Reservation { .. }))
                .unwrap_or_else(|| panic!("Expected a reservation, found {calls:?}"));
            let reservations = calls
                .iter()
                .filter(|call| matches!(call, CollaboratorCall::Reservation { .. }))
                .count();
            assert_eq!(reservations, 1, "Expected exactly one reservation, found {calls:?}");

            if let CollaboratorCall::Reservation {
                account_id: reserved_for,
                seats: reserved,
            } = &calls[position]
            {
                assert_eq!(reserved_for.value(), account_id);
                assert_eq!(*reserved, seats);
            }

            if let Some(payment) = calls
                .iter()
                .position(|call| matches!(call, CollaboratorCall::Payment { .. }))
            {
                assert!(payment < position, "Payment must happen before reservation: {calls:?}");
            }
        }));
        self
    }

    /// Inspect the receipt of a successful purchase (Then)
    #[must_use]
    pub fn then_receipt<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&PurchaseReceipt) + 'static,
    {
        self.assertions.push(Box::new(move |_: i64, outcome: &PurchaseOutcome, _: &[CollaboratorCall]| match outcome {
            Ok(receipt) => assertion(receipt),
            Err(error) => panic!("Expected a successful purchase, got: {error}"),
        }));
        self
    }

    /// Expect this exact rejection and no collaborator calls (Then)
    #[must_use]
    pub fn then_rejected_with(mut self, expected: InvalidPurchase) -> Self {
        self.assertions.push(Box::new(move |_: i64, outcome: &PurchaseOutcome, calls: &[CollaboratorCall]| {
            assert_eq!(outcome.as_ref().err(), Some(&expected));
            assert!(calls.is_empty(), "Rejected purchase must not call collaborators: {calls:?}");
        }));
        self
    }

    /// Expect this error without checking collaborator calls (Then)
    ///
    /// For collaborator failures, where earlier calls may already have run.
    #[must_use]
    pub fn then_failed_with(mut self, expected: InvalidPurchase) -> Self {
        self.assertions.push(Box::new(move |_: i64, outcome: &PurchaseOutcome, _: &[CollaboratorCall]| {
            assert_eq!(outcome.as_ref().err(), Some(&expected));
        }));
        self
    }

    /// Expect any rejection and no collaborator calls (Then)
    #[must_use]
    pub fn then_rejected(mut self) -> Self {
        self.assertions.push(Box::new(|_: i64, outcome: &PurchaseOutcome, calls: &[CollaboratorCall]| {
            assert!(outcome.is_err(), "Expected a rejection, got: {outcome:?}");
            assert!(calls.is_empty(), "Rejected purchase must not call collaborators: {calls:?}");
        }));
        self
    }

    /// Run the purchase and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the account or line items are not set, or if any
    /// assertion fails.
    pub fn run(self) {
        let account_id = self
            .account_id
            .expect("Account must be set with given_account()");
        let requests = self
            .requests
            .expect("Line items must be set with when_purchasing()");

        let service = TicketService::new(self.reducer, self.environment);
        let outcome = service.purchase_tickets(account_id, &requests);
        let calls = self.calls.calls();

        for assertion in self.assertions {
            assertion(account_id, &outcome, &calls);
        }
    }
}

impl Default for PurchaseTest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adult, child, infant};
    use cinema_tickets_core::rules::PurchaseRules;
    use cinema_tickets_core::types::TicketType;

    #[test]
    fn test_family_purchase() {
        PurchaseTest::new()
            .given_account(1)
            .when_purchasing(vec![adult(1), child(1), infant(1)])
            .then_payment(40)
            .then_reservation(2)
            .then_receipt(|receipt| {
                assert_eq!(receipt.counts.get(TicketType::Infant), 1);
                assert_eq!(receipt.totals.total_seats, 2);
            })
            .run();
    }

    #[test]
    fn test_rejection_makes_no_calls() {
        PurchaseTest::new()
            .given_account(1)
            .when_purchasing(vec![infant(2), adult(1)])
            .then_rejected_with(InvalidPurchase::InfantWithoutAdultLap)
            .run();
    }

    #[test]
    fn test_custom_reducer() {
        let reducer = PurchaseReducer::new(
            cinema_tickets_core::pricing::PriceTable::shared(),
            PurchaseRules::with_max_tickets(2),
        );

        PurchaseTest::new()
            .with_reducer(reducer)
            .given_account(1)
            .when_purchasing(vec![adult(3)])
            .then_rejected_with(InvalidPurchase::TooManyTickets { max: 2 })
            .run();
    }

    #[test]
    #[should_panic(expected = "Expected a rejection")]
    fn test_then_rejected_fails_on_success() {
        PurchaseTest::new()
            .given_account(1)
            .when_purchasing(vec![adult(1)])
            .then_rejected()
            .run();
    }
}
