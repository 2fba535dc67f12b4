//! Core domain types for cinema ticket purchases.
//!
//! A purchase is an account id plus a list of [`TicketTypeRequest`] line
//! items. Line items are aggregated into [`TicketCounts`], priced into
//! [`PurchaseTotals`] and reported back as a [`PurchaseReceipt`].

use crate::error::{InvalidPurchase, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the purchasing account.
///
/// Only positive ids exist; the constructor rejects anything else.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(i64);

impl AccountId {
    /// Creates an account id, rejecting zero and negative values.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPurchase::InvalidAccountId`] if `id <= 0`.
    pub const fn new(id: i64) -> Result<Self> {
        if id <= 0 {
            return Err(InvalidPurchase::InvalidAccountId);
        }
        Ok(Self(id))
    }

    /// Returns the raw id
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = InvalidPurchase;

    fn from_str(s: &str) -> Result<Self> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| InvalidPurchase::InvalidAccountId)?;
        Self::new(id)
    }
}

/// Ticket category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketType {
    /// Under 2, sits on an adult's lap
    Infant,
    /// Child ticket
    Child,
    /// Adult ticket
    Adult,
}

impl TicketType {
    /// Every ticket type, cheapest first
    pub const ALL: [Self; 3] = [Self::Infant, Self::Child, Self::Adult];

    /// Whether a ticket of this type needs its own seat
    #[must_use]
    pub const fn occupies_seat(self) -> bool {
        match self {
            Self::Infant => false,
            Self::Child | Self::Adult => true,
        }
    }

    /// Upper-case name, as used on the wire and in metrics labels
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Infant => "INFANT",
            Self::Child => "CHILD",
            Self::Adult => "ADULT",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = InvalidPurchase;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|ticket_type| ticket_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InvalidPurchase::InvalidTicketRequest(format!("unknown ticket type '{s}'")))
    }
}

/// A single line item: some number of tickets of one type.
///
/// Immutable once built. The quantity is always at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TicketTypeRequest {
    ticket_type: TicketType,
    no_of_tickets: u32,
}

impl TicketTypeRequest {
    /// Creates a line item.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPurchase::InvalidTicketRequest`] if `no_of_tickets` is zero.
    pub fn new(ticket_type: TicketType, no_of_tickets: u32) -> Result<Self> {
        if no_of_tickets == 0 {
            return Err(InvalidPurchase::InvalidTicketRequest(format!(
                "{ticket_type} ticket count must be at least 1"
            )));
        }
        Ok(Self {
            ticket_type,
            no_of_tickets,
        })
    }

    /// Ticket type of this line item
    #[must_use]
    pub const fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    /// Number of tickets in this line item
    #[must_use]
    pub const fn no_of_tickets(&self) -> u32 {
        self.no_of_tickets
    }
}

impl fmt::Display for TicketTypeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ticket_type, self.no_of_tickets)
    }
}

/// Parses `TYPE:COUNT` (or `TYPE=COUNT`), e.g. `ADULT:2`.
impl FromStr for TicketTypeRequest {
    type Err = InvalidPurchase;

    fn from_str(s: &str) -> Result<Self> {
        let (ticket_type, count) = s
            .split_once([':', '='])
            .ok_or_else(|| InvalidPurchase::InvalidTicketRequest(format!("'{s}'")))?;
        let ticket_type = ticket_type.parse::<TicketType>()?;
        let count = count
            .trim()
            .parse::<u32>()
            .map_err(|_| InvalidPurchase::InvalidTicketRequest(format!("'{s}'")))?;
        Self::new(ticket_type, count)
    }
}

/// Amount of money in whole currency units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Nothing to pay
    pub const ZERO: Self = Self(0);

    /// Creates an amount from whole units
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Returns the amount in whole units
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Price of `quantity` items at this unit price, `None` on overflow
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(u64::from(quantity)).map(Self)
    }

    /// Sum of two amounts, `None` on overflow
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}", self.0)
    }
}

/// Tickets requested per type, summed over all line items of one purchase.
///
/// Counts are `u64` so that no sum of `u32` line items overflows before the
/// ticket cap gets to see it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCounts {
    /// Infant tickets
    pub infant: u64,
    /// Child tickets
    pub child: u64,
    /// Adult tickets
    pub adult: u64,
}

impl TicketCounts {
    /// Aggregates line items by ticket type.
    #[must_use]
    pub fn from_requests(requests: &[TicketTypeRequest]) -> Self {
        let mut counts = Self::default();
        for request in requests {
            let slot = counts.slot_mut(request.ticket_type());
            *slot = slot.saturating_add(u64::from(request.no_of_tickets()));
        }
        counts
    }

    /// Count for one ticket type
    #[must_use]
    pub const fn get(&self, ticket_type: TicketType) -> u64 {
        match ticket_type {
            TicketType::Infant => self.infant,
            TicketType::Child => self.child,
            TicketType::Adult => self.adult,
        }
    }

    /// Tickets of every type
    #[must_use]
    pub fn total(&self) -> u64 {
        TicketType::ALL
            .into_iter()
            .fold(0, |total: u64, ticket_type| total.saturating_add(self.get(ticket_type)))
    }

    /// Non-empty `(type, count)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (TicketType, u64)> + '_ {
        TicketType::ALL
            .into_iter()
            .map(|ticket_type| (ticket_type, self.get(ticket_type)))
            .filter(|(_, count)| *count > 0)
    }

    const fn slot_mut(&mut self, ticket_type: TicketType) -> &mut u64 {
        match ticket_type {
            TicketType::Infant => &mut self.infant,
            TicketType::Child => &mut self.child,
            TicketType::Adult => &mut self.adult,
        }
    }
}

/// What a purchase costs and how many seats it takes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseTotals {
    /// Amount to charge the account
    pub total_amount: Money,
    /// Seats to reserve (infants excluded)
    pub total_seats: u32,
}

/// A purchase as submitted: raw account id plus line items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PurchaseRequest {
    /// Account id as given, not yet validated
    pub account_id: i64,
    /// Line items, in submission order
    pub ticket_type_requests: Vec<TicketTypeRequest>,
}

impl PurchaseRequest {
    /// Creates a request from already-typed line items
    #[must_use]
    pub const fn new(account_id: i64, ticket_type_requests: Vec<TicketTypeRequest>) -> Self {
        Self {
            account_id,
            ticket_type_requests,
        }
    }

    /// Parses a request from text, e.g. `"1"` and `["ADULT:2", "CHILD:1"]`.
    ///
    /// Checks run in order: account id, non-empty, then each line item.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidPurchase`] found.
    pub fn parse<S: AsRef<str>>(account_id: &str, line_items: &[S]) -> Result<Self> {
        let account_id = account_id.parse::<AccountId>()?;

        if line_items.is_empty() {
            return Err(InvalidPurchase::NoTicketsRequested);
        }

        let ticket_type_requests = line_items
            .iter()
            .map(|item| item.as_ref().parse::<TicketTypeRequest>())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(account_id.value(), ticket_type_requests))
    }
}

/// Outcome of a completed purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Account charged
    pub account_id: AccountId,
    /// Tickets bought per type
    pub counts: TicketCounts,
    /// Amount charged and seats reserved
    pub totals: PurchaseTotals,
    /// When the purchase completed
    pub purchased_at: DateTime<Utc>,
}
