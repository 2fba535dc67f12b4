//! Error types for ticket purchases.
//!
//! [`InvalidPurchase`] is the only error that leaves a purchase. Its
//! `Display` output is the reason shown to the customer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for purchase operations.
pub type Result<T> = std::result::Result<T, InvalidPurchase>;

/// Why a purchase was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvalidPurchase {
    /// Account id is not a positive integer
    #[error("Invalid account ID")]
    InvalidAccountId,

    /// The request contained no line items
    #[error("No tickets requested")]
    NoTicketsRequested,

    /// A line item could not be understood
    #[error("Invalid ticket request type: {0}")]
    InvalidTicketRequest(String),

    /// More tickets than a single purchase may contain
    #[error("Maximum {max} tickets per purchase")]
    TooManyTickets {
        /// Configured cap
        max: u32,
    },

    /// Child or infant tickets without any adult ticket
    #[error("Child and Infant tickets require an Adult ticket")]
    AdultRequired,

    /// More infants than adults to hold them
    #[error("Each infant requires an adult lap")]
    InfantWithoutAdultLap,

    /// Any other failure, message preserved
    #[error("{0}")]
    Unexpected(String),
}

impl InvalidPurchase {
    /// Human-readable reason for the refusal.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Stable label, used for metrics.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidAccountId => "invalid_account_id",
            Self::NoTicketsRequested => "no_tickets_requested",
            Self::InvalidTicketRequest(_) => "invalid_ticket_request",
            Self::TooManyTickets { .. } => "too_many_tickets",
            Self::AdultRequired => "adult_required",
            Self::InfantWithoutAdultLap => "infant_without_adult_lap",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The payment service refused or failed the charge
    #[error("Payment failed: {0}")]
    Payment(String),

    /// The seat reservation service failed
    #[error("Seat reservation failed: {0}")]
    Reservation(String),
}

impl From<CollaboratorError> for InvalidPurchase {
    fn from(error: CollaboratorError) -> Self {
        Self::Unexpected(error.to_string())
    }
}
