//! Prometheus metrics for ticket purchases.
//!
//! [`PurchaseMetrics`] records through the `metrics` facade, so nothing is
//! kept unless a recorder is installed. [`MetricsRecorder`] installs the
//! Prometheus recorder and renders the text exposition format.
//!
//! # Example
//!
//! ```rust,no_run
//! use cinema_tickets_runtime::metrics::MetricsRecorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut recorder = MetricsRecorder::new();
//! recorder.install()?;
//!
//! // ... purchase tickets ...
//!
//! if let Some(rendered) = recorder.render() {
//!     println!("{rendered}");
//! }
//! # Ok(())
//! # }
//! ```

use cinema_tickets_core::error::InvalidPurchase;
use cinema_tickets_core::reducer::PurchasePlan;
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Installs and renders the Prometheus recorder.
#[derive(Default)]
pub struct MetricsRecorder {
    handle: Option<PrometheusHandle>,
}

impl MetricsRecorder {
    /// Create a recorder that has not been installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Install the global recorder and register metric descriptions.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a metrics recorder is already installed (e.g., in tests), the call
    /// succeeds without a handle and [`render`](Self::render) returns `None`.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        let builder = Self::builder()?;

        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                register_metrics();
                tracing::debug!("Prometheus metrics recorder installed");
                Ok(())
            }
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            }
        }
    }

    /// Exporter configuration shared by [`install`](Self::install) and tests.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Build`] if the histogram buckets are rejected.
    pub fn builder() -> Result<PrometheusBuilder, MetricsError> {
        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if the recorder hasn't been installed.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "ticket_purchases_total",
        "Total number of purchase attempts, by outcome"
    );
    describe_counter!(
        "ticket_purchase_rejections_total",
        "Total number of rejected purchases, by reason"
    );
    describe_counter!("tickets_sold_total", "Total number of tickets sold, by type");
    describe_counter!(
        "ticket_revenue_total",
        "Total amount charged, in whole currency units"
    );
    describe_counter!("seats_reserved_total", "Total number of seats reserved");
    describe_histogram!(
        "ticket_purchase_duration_seconds",
        "Time taken to validate and execute a purchase"
    );
}

/// Purchase metrics recorder.
pub struct PurchaseMetrics;

impl PurchaseMetrics {
    /// Record a completed purchase.
    pub fn record_accepted(plan: &PurchasePlan, duration: Duration) {
        counter!("ticket_purchases_total", "outcome" => "accepted").increment(1);
        for (ticket_type, count) in plan.counts().iter() {
            counter!("tickets_sold_total", "ticket_type" => ticket_type.as_str())
                .increment(count);
        }
        counter!("ticket_revenue_total").increment(plan.totals().total_amount.units());
        counter!("seats_reserved_total").increment(u64::from(plan.totals().total_seats));
        histogram!("ticket_purchase_duration_seconds").record(duration.as_secs_f64());
    }

    /// Record a refused purchase.
    pub fn record_rejected(error: &InvalidPurchase, duration: Duration) {
        counter!("ticket_purchases_total", "outcome" => "rejected").increment(1);
        counter!("ticket_purchase_rejections_total", "reason" => error.code()).increment(1);
        histogram!("ticket_purchase_duration_seconds").record(duration.as_secs_f64());
    }
}
