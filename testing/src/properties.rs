//! Property-based testing utilities using proptest.
//!
//! Strategies for account ids, ticket types and whole purchases, split
//! into purchases the rules accept and ones they must refuse.

use cinema_tickets_core::rules::MAX_TICKETS_PER_PURCHASE;
use cinema_tickets_core::types::{TicketType, TicketTypeRequest};
use proptest::collection::vec;
use proptest::prelude::*;

/// Any valid account id
pub fn account_id() -> impl Strategy<Value = i64> {
    1..=i64::MAX
}

/// Zero or negative account ids
pub fn invalid_account_id() -> impl Strategy<Value = i64> {
    i64::MIN..=0
}

/// Any ticket type
pub fn ticket_type() -> impl Strategy<Value = TicketType> {
    prop_oneof![
        Just(TicketType::Infant),
        Just(TicketType::Child),
        Just(TicketType::Adult),
    ]
}

/// A line item of 1 to `max` tickets
pub fn line_item(max: u32) -> impl Strategy<Value = TicketTypeRequest> {
    (ticket_type(), 1..=max).prop_map(|(ticket_type, count)| {
        TicketTypeRequest::new(ticket_type, count).unwrap()
    })
}

/// Splits `count` tickets of one type into line items of random size.
fn split_into_lines(ticket_type: TicketType, count: u32) -> BoxedStrategy<Vec<TicketTypeRequest>> {
    if count == 0 {
        return Just(Vec::new()).boxed();
    }
    (1..=count)
        .prop_flat_map(move |first| {
            split_into_lines(ticket_type, count - first).prop_map(move |mut rest| {
                rest.push(TicketTypeRequest::new(ticket_type, first).unwrap());
                rest
            })
        })
        .boxed()
}

/// Counts `(infant, child, adult)` that satisfy every purchase rule
pub fn valid_counts() -> impl Strategy<Value = (u32, u32, u32)> {
    (1..=MAX_TICKETS_PER_PURCHASE)
        .prop_flat_map(|adult| {
            let infant_max = adult.min(MAX_TICKETS_PER_PURCHASE - adult);
            (Just(adult), 0..=infant_max)
        })
        .prop_flat_map(|(adult, infant)| {
            let child_max = MAX_TICKETS_PER_PURCHASE - adult - infant;
            (Just(infant), 0..=child_max, Just(adult))
        })
}

/// Line items, shuffled, whose totals satisfy every purchase rule
pub fn valid_purchase() -> impl Strategy<Value = Vec<TicketTypeRequest>> {
    valid_counts()
        .prop_flat_map(|(infant, child, adult)| {
            (
                split_into_lines(TicketType::Infant, infant),
                split_into_lines(TicketType::Child, child),
                split_into_lines(TicketType::Adult, adult),
            )
        })
        .prop_map(|(infants, children, adults)| {
            let mut lines = infants;
            lines.extend(children);
            lines.extend(adults);
            lines
        })
        .prop_shuffle()
}

/// Line items totalling more than the ticket cap, any mix of types
pub fn oversized_purchase() -> impl Strategy<Value = Vec<TicketTypeRequest>> {
    vec(line_item(MAX_TICKETS_PER_PURCHASE), 1..=10).prop_filter(
        "total must exceed the ticket cap",
        |lines| {
            lines
                .iter()
                .map(|line| u64::from(line.no_of_tickets()))
                .sum::<u64>()
                > u64::from(MAX_TICKETS_PER_PURCHASE)
        },
    )
}

/// Child and infant line items with no adult, within the cap
pub fn unaccompanied_purchase() -> impl Strategy<Value = Vec<TicketTypeRequest>> {
    let minor = prop_oneof![Just(TicketType::Infant), Just(TicketType::Child)];
    vec(
        (minor, 1..=5_u32)
            .prop_map(|(ticket_type, count)| TicketTypeRequest::new(ticket_type, count).unwrap()),
        1..=5,
    )
}
