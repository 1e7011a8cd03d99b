//! Writing computed priorities back to storage.
//!
//! Each invoice is updated on its own: a failure is recorded against that
//! invoice and the remaining updates still run. Running it again with the same
//! entries is safe; the last write wins.

use crate::{core::schedule::ScheduleEntry, errors::Error, store::InvoiceStore};
use tracing::{info, warn};

/// Outcome of [`persist_priorities`].
#[derive(Debug, Default)]
pub struct PersistReport {
    /// Invoices whose priority was written
    pub persisted: Vec<i64>,
    /// Invoices whose write failed, with the reason
    pub failed: Vec<(i64, Error)>,
}

impl PersistReport {
    /// True when every write succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Stores each entry's computed priority on its invoice.
pub async fn persist_priorities<S>(store: &S, entries: &[ScheduleEntry]) -> PersistReport
where
    S: InvoiceStore + ?Sized,
{
    let mut report = PersistReport::default();

    for entry in entries {
        let invoice_id = entry.invoice.id;
        match store.update_invoice_priority(invoice_id, entry.priority).await {
            Ok(()) => report.persisted.push(invoice_id),
            Err(e) => {
                warn!("Failed to persist priority for invoice {invoice_id}: {e}");
                report.failed.push((invoice_id, e));
            }
        }
    }

    info!(
        "Persisted {} priorities, {} failed",
        report.persisted.len(),
        report.failed.len()
    );
    report
}
