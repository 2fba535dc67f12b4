//! # Cinema Tickets Core
//!
//! Domain types, the fixed price table and the purchase rules for cinema
//! ticket purchases.
//!
//! Everything in this crate is pure. A purchase request goes through the
//! [`reducer::PurchaseReducer`], which either rejects it with an
//! [`error::InvalidPurchase`] or returns a [`reducer::PurchasePlan`]: the
//! computed totals plus the [`effect::Effect`] values describing the
//! payment and seat reservation calls. Executing those effects against the
//! collaborators in [`environment`] is the runtime crate's job.
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_core::prelude::*;
//!
//! let reducer = PurchaseReducer::standard();
//! let requests = [
//!     TicketTypeRequest::new(TicketType::Adult, 1)?,
//!     TicketTypeRequest::new(TicketType::Child, 1)?,
//!     TicketTypeRequest::new(TicketType::Infant, 1)?,
//! ];
//!
//! let plan = reducer.reduce(1, &requests)?;
//! assert_eq!(plan.totals().total_amount, Money::from_units(40));
//! assert_eq!(plan.totals().total_seats, 2);
//! # Ok::<(), InvalidPurchase>(())
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

pub mod effect;
pub mod environment;
pub mod error;
pub mod pricing;
pub mod reducer;
pub mod rules;
pub mod types;

/// Commonly used items, for glob import.
pub mod prelude {
    pub use crate::effect::Effect;
    pub use crate::environment::{
        Clock, PurchaseEnvironment, SeatReservationService, SystemClock, TicketPaymentService,
    };
    pub use crate::error::{CollaboratorError, InvalidPurchase};
    pub use crate::pricing::PriceTable;
    pub use crate::reducer::{PurchasePlan, PurchaseReducer};
    pub use crate::rules::PurchaseRules;
    pub use crate::types::{
        AccountId, Money, PurchaseReceipt, PurchaseRequest, PurchaseTotals, TicketCounts,
        TicketType, TicketTypeRequest,
    };
}
