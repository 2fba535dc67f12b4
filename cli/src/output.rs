//! Rendering purchase outcomes for the terminal.

use crate::config::OutputFormat;
use cinema_tickets_core::error::InvalidPurchase;
use cinema_tickets_core::reducer::PurchasePlan;
use cinema_tickets_core::types::{PurchaseReceipt, TicketCounts};
use serde_json::json;

/// Renders a completed purchase.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_receipt(receipt: &PurchaseReceipt, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "status": "purchased",
            "receipt": receipt,
        })),
        OutputFormat::Text => {
            let mut lines = vec![format!("Purchase complete for account {}", receipt.account_id)];
            lines.extend(count_lines(&receipt.counts));
            lines.push(format!("  Total:  {}", receipt.totals.total_amount));
            lines.push(format!("  Seats:  {}", receipt.totals.total_seats));
            lines.push(format!("  At:     {}", receipt.purchased_at.to_rfc3339()));
            Ok(lines.join("\n"))
        }
    }
}

/// Renders a validated purchase that was not carried out.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_quote(plan: &PurchasePlan, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "status": "quoted",
            "account_id": plan.account_id(),
            "counts": plan.counts(),
            "totals": plan.totals(),
        })),
        OutputFormat::Text => {
            let mut lines = vec![format!("Quote for account {} (nothing charged)", plan.account_id())];
            lines.extend(count_lines(plan.counts()));
            lines.push(format!("  Total:  {}", plan.totals().total_amount));
            lines.push(format!("  Seats:  {}", plan.totals().total_seats));
            Ok(lines.join("\n"))
        }
    }
}

/// Renders a refused purchase.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_rejection(error: &InvalidPurchase, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "status": "rejected",
            "code": error.code(),
            "reason": error.reason(),
        })),
        OutputFormat::Text => Ok(format!("Purchase rejected: {error}")),
    }
}

fn count_lines(counts: &TicketCounts) -> impl Iterator<Item = String> + '_ {
    counts
        .iter()
        .map(|(ticket_type, count)| format!("  {ticket_type:<6}  x{count}"))
}
