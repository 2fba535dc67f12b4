//! Side effect descriptions.
//!
//! Effects are values, not execution. The reducer returns them and the
//! runtime performs them against the environment, in order.

use crate::types::{AccountId, Money};
use serde::Serialize;

/// A call to an external collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Charge the account
    MakePayment {
        /// Account to charge
        account_id: AccountId,
        /// Amount to charge
        amount: Money,
    },

    /// Reserve seats for the account
    ReserveSeats {
        /// Account the seats are for
        account_id: AccountId,
        /// Number of seats
        seats: u32,
    },
}

impl Effect {
    /// Short name, for logs and metrics
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MakePayment { .. } => "make_payment",
            Self::ReserveSeats { .. } => "reserve_seats",
        }
    }
}
