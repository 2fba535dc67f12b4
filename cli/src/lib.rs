//! # Cinema Tickets CLI
//!
//! Box-office command line around [`TicketService`]: configuration from the
//! environment, stand-in third-party collaborators and receipt rendering.

use cinema_tickets_core::environment::{PurchaseEnvironment, SystemClock};
use cinema_tickets_core::pricing::PriceTable;
use cinema_tickets_core::reducer::PurchaseReducer;
use cinema_tickets_core::types::PurchaseRequest;
use cinema_tickets_runtime::TicketService;
use std::sync::Arc;

pub mod config;
pub mod output;
pub mod thirdparty;

use config::{Config, OutputFormat};
use output::{render_quote, render_receipt, render_rejection};
use thirdparty::{LoggingPaymentService, LoggingSeatReservationService};

/// Builds a service with standard prices, the configured rules and the
/// logging collaborators.
#[must_use]
pub fn ticket_service(config: &Config) -> TicketService {
    let reducer = PurchaseReducer::new(PriceTable::shared(), config.purchase_rules());
    let env = PurchaseEnvironment::new(
        LoggingPaymentService::shared(),
        LoggingSeatReservationService::shared(),
        Arc::new(SystemClock),
    );
    TicketService::new(reducer, env)
}

/// Rendered result of one command-line run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Text for stdout
    pub output: String,
    /// `false` when the purchase was refused
    pub accepted: bool,
}

impl Completion {
    /// Process exit status: 0 when accepted, 1 when refused
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.accepted { 0 } else { 1 }
    }
}

/// Parses the raw account and line items, then quotes (`dry_run`) or buys.
///
/// A refused purchase is a normal outcome and renders as a rejection.
///
/// # Errors
///
/// Returns an error only if rendering fails.
pub fn run_purchase<S: AsRef<str>>(
    service: &TicketService,
    account: &str,
    tickets: &[S],
    dry_run: bool,
    format: OutputFormat,
) -> serde_json::Result<Completion> {
    let outcome = PurchaseRequest::parse(account, tickets).and_then(|request| {
        if dry_run {
            service
                .quote(request.account_id, &request.ticket_type_requests)
                .map(|plan| render_quote(&plan, format))
        } else {
            service
                .purchase(&request)
                .map(|receipt| render_receipt(&receipt, format))
        }
    });

    match outcome {
        Ok(rendered) => Ok(Completion {
            output: rendered?,
            accepted: true,
        }),
        Err(error) => {
            tracing::warn!(code = error.code(), "Purchase not completed");
            Ok(Completion {
                output: render_rejection(&error, format)?,
                accepted: false,
            })
        }
    }
}
