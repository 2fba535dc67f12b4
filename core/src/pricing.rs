//! The fixed ticket price table.

use crate::types::{Money, TicketType};
use serde::Serialize;
use std::sync::Arc;

/// Unit price per ticket type.
///
/// Built once at startup and shared by `Arc`; there is no way to change a
/// price after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PriceTable {
    infant: Money,
    child: Money,
    adult: Money,
}

impl PriceTable {
    /// The box-office prices: infants free, children 15, adults 25.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            infant: Money::from_units(0),
            child: Money::from_units(15),
            adult: Money::from_units(25),
        }
    }

    /// Arc-wrapped standard table for sharing
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::standard())
    }

    /// Unit price of one ticket
    #[must_use]
    pub const fn price_of(&self, ticket_type: TicketType) -> Money {
        match ticket_type {
            TicketType::Infant => self.infant,
            TicketType::Child => self.child,
            TicketType::Adult => self.adult,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::standard()
    }
}
