//! Business rules a purchase must satisfy once its line items are counted.

use crate::error::{InvalidPurchase, Result};
use crate::types::TicketCounts;
use serde::{Deserialize, Serialize};

/// Default cap on tickets in one purchase
pub const MAX_TICKETS_PER_PURCHASE: u32 = 25;

/// Limits applied to every purchase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRules {
    /// Most tickets, of any type, allowed in one purchase
    pub max_tickets_per_purchase: u32,
}

impl PurchaseRules {
    /// Rules with a custom ticket cap
    #[must_use]
    pub const fn with_max_tickets(max_tickets_per_purchase: u32) -> Self {
        Self {
            max_tickets_per_purchase,
        }
    }

    /// Checks aggregated counts against the rules.
    ///
    /// Rules run in a fixed order and the first violation is returned:
    /// ticket cap, then adult presence, then one adult lap per infant.
    ///
    /// # Errors
    ///
    /// Returns the [`InvalidPurchase`] for the first rule broken.
    pub fn check(&self, counts: &TicketCounts) -> Result<()> {
        if counts.total() > u64::from(self.max_tickets_per_purchase) {
            return Err(InvalidPurchase::TooManyTickets {
                max: self.max_tickets_per_purchase,
            });
        }

        if counts.adult == 0 && (counts.infant > 0 || counts.child > 0) {
            return Err(InvalidPurchase::AdultRequired);
        }

        if counts.infant > counts.adult {
            return Err(InvalidPurchase::InfantWithoutAdultLap);
        }

        Ok(())
    }
}

impl Default for PurchaseRules {
    fn default() -> Self {
        Self::with_max_tickets(MAX_TICKETS_PER_PURCHASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn counts(infant: u64, child: u64, adult: u64) -> TicketCounts {
        TicketCounts {
            infant,
            child,
            adult,
        }
    }

    #[test]
    fn accepts_family_purchase() {
        assert_eq!(PurchaseRules::default().check(&counts(1, 2, 2)), Ok(()));
    }

    #[test]
    fn cap_is_inclusive() {
        let rules = PurchaseRules::default();
        assert_eq!(rules.check(&counts(0, 0, 25)), Ok(()));
        assert_eq!(
            rules.check(&counts(0, 0, 26)),
            Err(InvalidPurchase::TooManyTickets { max: 25 })
        );
    }

    #[test]
    fn children_need_an_adult() {
        assert_eq!(
            PurchaseRules::default().check(&counts(0, 3, 0)),
            Err(InvalidPurchase::AdultRequired)
        );
    }

    #[test]
    fn each_infant_needs_a_lap() {
        let rules = PurchaseRules::default();
        assert_eq!(
            rules.check(&counts(2, 0, 1)),
            Err(InvalidPurchase::InfantWithoutAdultLap)
        );
        assert_eq!(rules.check(&counts(1, 0, 1)), Ok(()));
    }

    #[test]
    fn cap_wins_over_missing_adult() {
        assert_eq!(
            PurchaseRules::default().check(&counts(0, 100, 0)),
            Err(InvalidPurchase::TooManyTickets { max: 25 })
        );
    }

    #[test]
    fn missing_adult_wins_over_infant_lap() {
        assert_eq!(
            PurchaseRules::default().check(&counts(2, 0, 0)),
            Err(InvalidPurchase::AdultRequired)
        );
    }

    #[test]
    fn custom_cap() {
        let rules = PurchaseRules::with_max_tickets(4);
        assert_eq!(
            rules.check(&counts(0, 3, 2)),
            Err(InvalidPurchase::TooManyTickets { max: 4 })
        );
    }
}
