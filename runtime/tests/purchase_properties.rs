//! Property tests: pricing, seat counting and rule enforcement hold for any
//! mix of line items.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use cinema_tickets_core::error::InvalidPurchase;
use cinema_tickets_core::reducer::PurchaseReducer;
use cinema_tickets_core::types::{AccountId, Money, TicketType};
use cinema_tickets_runtime::TicketService;
use cinema_tickets_testing::properties::{
    account_id, invalid_account_id, line_item, oversized_purchase, unaccompanied_purchase,
    valid_purchase,
};
use cinema_tickets_testing::{CollaboratorCall, recording_environment};
use proptest::prelude::*;

fn service() -> (TicketService, cinema_tickets_testing::CallLog) {
    let (env, calls) = recording_environment();
    (TicketService::new(PurchaseReducer::standard(), env), calls)
}

proptest! {
    #[test]
    fn valid_purchase_charges_price_and_reserves_non_infant_seats(
        account in account_id(),
        lines in valid_purchase(),
    ) {
        let (service, calls) = service();

        let expected_amount: u64 = lines
            .iter()
            .map(|line| {
                let unit = match line.ticket_type() {
                    TicketType::Infant => 0,
                    TicketType::Child => 15,
                    TicketType::Adult => 25,
                };
                unit * u64::from(line.no_of_tickets())
            })
            .sum();
        let expected_seats: u32 = lines
            .iter()
            .filter(|line| line.ticket_type() != TicketType::Infant)
            .map(|line| line.no_of_tickets())
            .sum();

        service.purchase_tickets(account, &lines).unwrap();

        let account_id = AccountId::new(account).unwrap();
        prop_assert_eq!(
            calls.calls(),
            vec![
                CollaboratorCall::Payment { account_id, amount: Money::from_units(expected_amount) },
                CollaboratorCall::Reservation { account_id, seats: expected_seats },
            ]
        );
    }

    #[test]
    fn line_item_order_does_not_change_totals(lines in valid_purchase()) {
        let reducer = PurchaseReducer::standard();
        let mut reversed = lines.clone();
        reversed.reverse();

        let forward = reducer.reduce(1, &lines).unwrap();
        let backward = reducer.reduce(1, &reversed).unwrap();
        prop_assert_eq!(forward.totals(), backward.totals());
        prop_assert_eq!(forward.counts(), backward.counts());
    }

    #[test]
    fn oversized_purchase_is_always_rejected(lines in oversized_purchase()) {
        let (service, calls) = service();
        let result = service.purchase_tickets(1, &lines);
        prop_assert_eq!(result, Err(InvalidPurchase::TooManyTickets { max: 25 }));
        prop_assert!(calls.is_empty());
    }

    #[test]
    fn unaccompanied_minors_are_always_rejected(lines in unaccompanied_purchase()) {
        let (service, calls) = service();
        let result = service.purchase_tickets(1, &lines);
        prop_assert_eq!(result, Err(InvalidPurchase::AdultRequired));
        prop_assert!(calls.is_empty());
    }

    #[test]
    fn invalid_account_is_rejected_before_anything_else(
        account in invalid_account_id(),
        lines in proptest::collection::vec(line_item(50), 0..5),
    ) {
        let (service, calls) = service();
        let result = service.purchase_tickets(account, &lines);
        prop_assert_eq!(result, Err(InvalidPurchase::InvalidAccountId));
        prop_assert!(calls.is_empty());
    }
}
