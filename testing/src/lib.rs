//! # Cinema Tickets Testing
//!
//! Testing utilities and helpers for ticket purchases.
//!
//! This crate provides:
//! - Recording and failing collaborator mocks
//! - A fixed clock for deterministic receipts
//! - [`PurchaseTest`], a Given-When-Then harness around `TicketService`
//! - proptest strategies for domain types
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_testing::{PurchaseTest, adult, child, infant};
//!
//! PurchaseTest::new()
//!     .given_account(1)
//!     .when_purchasing(vec![adult(1), child(1), infant(1)])
//!     .then_payment(40)
//!     .then_reservation(2)
//!     .run();
//! ```

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use cinema_tickets_core::types::{TicketType, TicketTypeRequest};

mod purchase_test;

pub mod properties;

pub use purchase_test::PurchaseTest;

/// Mock implementations of Environment traits
pub mod mocks {
    use chrono::{DateTime, Utc};
    use cinema_tickets_core::environment::{
        Clock, PurchaseEnvironment, SeatReservationService, TicketPaymentService,
    };
    use cinema_tickets_core::error::CollaboratorError;
    use cinema_tickets_core::types::{AccountId, Money};
    use std::sync::{Arc, RwLock};

    /// One call made to a collaborator.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum CollaboratorCall {
        /// `make_payment(account_id, amount)`
        Payment {
            /// Account charged
            account_id: AccountId,
            /// Amount charged
            amount: Money,
        },
        /// `reserve_seat(account_id, seats)`
        Reservation {
            /// Account the seats are for
            account_id: AccountId,
            /// Seats reserved
            seats: u32,
        },
    }

    /// Shared, ordered log of collaborator calls.
    ///
    /// Clones share the same log, so one log can be handed to both
    /// recording collaborators and the call order checked afterwards.
    #[derive(Clone, Debug, Default)]
    pub struct CallLog {
        calls: Arc<RwLock<Vec<CollaboratorCall>>>,
    }

    impl CallLog {
        /// Create an empty log
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Append a call
        pub fn record(&self, call: CollaboratorCall) {
            self.calls.write().unwrap().push(call);
        }

        /// All calls so far, oldest first
        #[must_use]
        pub fn calls(&self) -> Vec<CollaboratorCall> {
            self.calls.read().unwrap().clone()
        }

        /// Payment calls only
        #[must_use]
        pub fn payments(&self) -> Vec<(AccountId, Money)> {
            self.calls
                .read()
                .unwrap()
                .iter()
                .filter_map(|call| match call {
                    CollaboratorCall::Payment { account_id, amount } => Some((*account_id, *amount)),
                    CollaboratorCall::Reservation { .. } => None,
                })
                .collect()
        }

        /// Reservation calls only
        #[must_use]
        pub fn reservations(&self) -> Vec<(AccountId, u32)> {
            self.calls
                .read()
                .unwrap()
                .iter()
                .filter_map(|call| match call {
                    CollaboratorCall::Reservation { account_id, seats } => Some((*account_id, *seats)),
                    CollaboratorCall::Payment { .. } => None,
                })
                .collect()
        }

        /// Check if no collaborator was called
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.calls.read().unwrap().is_empty()
        }
    }

    /// Payment service that always succeeds and records each charge
    #[derive(Clone, Debug)]
    pub struct RecordingPaymentService {
        log: CallLog,
    }

    impl RecordingPaymentService {
        /// Record into `log`
        #[must_use]
        pub const fn new(log: CallLog) -> Self {
            Self { log }
        }
    }

    impl TicketPaymentService for RecordingPaymentService {
        fn make_payment(&self, account_id: AccountId, amount: Money) -> Result<(), CollaboratorError> {
            self.log.record(CollaboratorCall::Payment { account_id, amount });
            Ok(())
        }
    }

    /// Reservation service that always succeeds and records each request
    #[derive(Clone, Debug)]
    pub struct RecordingReservationService {
        log: CallLog,
    }

    impl RecordingReservationService {
        /// Record into `log`
        #[must_use]
        pub const fn new(log: CallLog) -> Self {
            Self { log }
        }
    }

    impl SeatReservationService for RecordingReservationService {
        fn reserve_seat(&self, account_id: AccountId, seats: u32) -> Result<(), CollaboratorError> {
            self.log.record(CollaboratorCall::Reservation { account_id, seats });
            Ok(())
        }
    }

    /// Payment service that always fails with the given message
    #[derive(Clone, Debug)]
    pub struct FailingPaymentService {
        message: String,
    }

    impl FailingPaymentService {
        /// Fail every charge with `message`
        #[must_use]
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
            }
        }
    }

    impl TicketPaymentService for FailingPaymentService {
        fn make_payment(&self, _account_id: AccountId, _amount: Money) -> Result<(), CollaboratorError> {
            Err(CollaboratorError::Payment(self.message.clone()))
        }
    }

    /// Reservation service that always fails with the given message
    #[derive(Clone, Debug)]
    pub struct FailingReservationService {
        message: String,
    }

    impl FailingReservationService {
        /// Fail every reservation with `message`
        #[must_use]
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
            }
        }
    }

    impl SeatReservationService for FailingReservationService {
        fn reserve_seat(&self, _account_id: AccountId, _seats: u32) -> Result<(), CollaboratorError> {
            Err(CollaboratorError::Reservation(self.message.clone()))
        }
    }

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making receipts reproducible.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    /// Environment whose collaborators record into the returned log
    #[must_use]
    pub fn recording_environment() -> (PurchaseEnvironment, CallLog) {
        let log = CallLog::new();
        let env = PurchaseEnvironment::new(
            Arc::new(RecordingPaymentService::new(log.clone())),
            Arc::new(RecordingReservationService::new(log.clone())),
            Arc::new(test_clock()),
        );
        (env, log)
    }
}

/// `ADULT` line item of `count` tickets
#[must_use]
pub fn adult(count: u32) -> TicketTypeRequest {
    TicketTypeRequest::new(TicketType::Adult, count).unwrap()
}

/// `CHILD` line item of `count` tickets
#[must_use]
pub fn child(count: u32) -> TicketTypeRequest {
    TicketTypeRequest::new(TicketType::Child, count).unwrap()
}

/// `INFANT` line item of `count` tickets
#[must_use]
pub fn infant(count: u32) -> TicketTypeRequest {
    TicketTypeRequest::new(TicketType::Infant, count).unwrap()
}

// Re-export commonly used items
pub use mocks::{CallLog, CollaboratorCall, FixedClock, recording_environment, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_tickets_core::environment::{Clock, SeatReservationService, TicketPaymentService};
    use cinema_tickets_core::types::{AccountId, Money};
    use mocks::{FailingPaymentService, RecordingPaymentService, RecordingReservationService};

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn recording_services_share_one_log() {
        let log = CallLog::new();
        let account_id = AccountId::new(3).unwrap();

        RecordingPaymentService::new(log.clone())
            .make_payment(account_id, Money::from_units(25))
            .unwrap();
        RecordingReservationService::new(log.clone())
            .reserve_seat(account_id, 1)
            .unwrap();

        assert_eq!(
            log.calls(),
            vec![
                CollaboratorCall::Payment {
                    account_id,
                    amount: Money::from_units(25),
                },
                CollaboratorCall::Reservation {
                    account_id,
                    seats: 1,
                },
            ]
        );
        assert_eq!(log.payments(), vec![(account_id, Money::from_units(25))]);
        assert_eq!(log.reservations(), vec![(account_id, 1)]);
    }

    #[test]
    fn failing_payment_reports_message() {
        let result = FailingPaymentService::new("declined")
            .make_payment(AccountId::new(1).unwrap(), Money::from_units(25));
        assert_eq!(result.unwrap_err().to_string(), "Payment failed: declined");
    }

    #[test]
    fn line_item_helpers() {
        assert_eq!(adult(2).no_of_tickets(), 2);
        assert_eq!(child(1).ticket_type(), TicketType::Child);
        assert_eq!(infant(1).ticket_type(), TicketType::Infant);
    }
}
