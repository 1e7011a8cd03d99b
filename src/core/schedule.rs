//! Payment schedule construction.
//!
//! Combines priority scoring, month risk, payday assignment and weekend
//! correction into a flat chronological schedule plus a per-payday view.
//! [`build_schedule`] is pure: it never touches storage and returns the same
//! value for the same snapshot. [`compute_schedule`] reads the snapshot from a
//! store first.

use crate::{
    core::{
        assignment::{PaydayAssigner, Placement},
        month_risk::{InvalidMonthSetting, MonthRiskIndex},
        priority, weekend,
    },
    entities::{InvoiceStatus, invoice, month_setting},
    errors::Result,
    store::InvoiceStore,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Invoices a payday takes before rebalancing kicks in
pub const DEFAULT_SOFT_CAPACITY: usize = 5;

/// Tunables for one scheduling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Soft per-payday invoice limit
    pub soft_capacity: usize,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            soft_capacity: DEFAULT_SOFT_CAPACITY,
        }
    }
}

/// Immutable input of one scheduling run.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Candidate invoices; anything not pending is ignored
    pub invoices: Vec<invoice::Model>,
    /// Income days, any order, duplicates allowed
    pub paydays: Vec<NaiveDate>,
    /// Month risk annotations
    pub month_settings: Vec<month_setting::Model>,
}

/// One invoice placed on a payment date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    /// The scheduled invoice as read from the store
    pub invoice: invoice::Model,
    /// Computed priority
    pub priority: i32,
    /// Assigned payday before weekend correction
    pub payday: NaiveDate,
    /// Date to pay on, never a weekend
    pub payment_date: NaiveDate,
    /// Whether `payment_date` differs from `payday`
    pub was_weekend_adjusted: bool,
    /// How the payday was chosen
    pub placement: Placement,
}

/// All entries sharing one payday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaydayBucket {
    /// The payday
    pub payday: NaiveDate,
    /// The payday after weekend correction
    pub payment_date: NaiveDate,
    /// Entries, highest priority first
    pub entries: Vec<ScheduleEntry>,
    /// Sum of the entries' amounts
    pub total: Decimal,
}

/// Result of a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    /// Reference date the run was computed for
    pub as_of: NaiveDate,
    /// Entries by payment date, then priority descending
    pub entries: Vec<ScheduleEntry>,
    /// Entries grouped by payday, ascending
    pub buckets: Vec<PaydayBucket>,
    /// Pending invoices that could not be given a payday
    pub unassignable: Vec<i64>,
    /// Month settings ignored because their month is invalid
    pub invalid_month_settings: Vec<InvalidMonthSetting>,
}

impl Schedule {
    /// True when nothing was scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every scheduled amount.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.buckets.iter().map(|b| b.total).sum()
    }
}

/// Computes the schedule for `snapshot` as of `today`.
#[must_use]
pub fn build_schedule(
    snapshot: &Snapshot,
    today: NaiveDate,
    options: &SchedulerOptions,
) -> Schedule {
    let risk_index = MonthRiskIndex::build(&snapshot.month_settings);

    let mut pending: Vec<&invoice::Model> = snapshot
        .invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Pending)
        .collect();
    pending.sort_by_key(|i| (i.due_date, i.id));

    let mut assigner = PaydayAssigner::new(&snapshot.paydays, today, options.soft_capacity);
    let mut entries = Vec::with_capacity(pending.len());
    let mut unassignable = Vec::new();

    for invoice in pending {
        let priority = priority::score(invoice, risk_index.risk_for(invoice.due_date), today);

        let Some(assignment) = assigner.assign(invoice.due_date) else {
            warn!("Invoice {} ({}) has no payday to go to", invoice.id, invoice.title);
            unassignable.push(invoice.id);
            continue;
        };

        let (payment_date, was_weekend_adjusted) = weekend::adjust(assignment.payday);
        debug!(
            "Invoice {} due {} -> payday {} ({:?}), pay on {payment_date}, priority {priority}",
            invoice.id, invoice.due_date, assignment.payday, assignment.placement
        );

        entries.push(ScheduleEntry {
            invoice: invoice.clone(),
            priority,
            payday: assignment.payday,
            payment_date,
            was_weekend_adjusted,
            placement: assignment.placement,
        });
    }

    // Entries are still in due-date order here, which both sorts keep for ties.
    let buckets = group_by_payday(&entries);
    entries.sort_by(|a, b| {
        a.payment_date
            .cmp(&b.payment_date)
            .then_with(|| b.priority.cmp(&a.priority))
    });

    Schedule {
        as_of: today,
        entries,
        buckets,
        unassignable,
        invalid_month_settings: risk_index.invalid_settings().to_vec(),
    }
}

fn group_by_payday(entries: &[ScheduleEntry]) -> Vec<PaydayBucket> {
    let mut grouped: BTreeMap<NaiveDate, Vec<ScheduleEntry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.payday).or_default().push(entry.clone());
    }

    grouped
        .into_iter()
        .map(|(payday, mut entries)| {
            entries.sort_by(|a, b| b.priority.cmp(&a.priority));
            let total = entries.iter().map(|e| e.invoice.amount).sum();
            PaydayBucket {
                payday,
                payment_date: weekend::adjust(payday).0,
                entries,
                total,
            }
        })
        .collect()
}

/// Reads a snapshot from `store` and schedules it as of `today`.
///
/// Storage is only read; use [`crate::core::persist::persist_priorities`] to
/// write priorities back.
pub async fn compute_schedule<S>(
    store: &S,
    today: NaiveDate,
    options: &SchedulerOptions,
) -> Result<Schedule>
where
    S: InvoiceStore + ?Sized,
{
    let snapshot = Snapshot {
        invoices: store.list_pending_invoices().await?,
        paydays: store.list_paydays().await?,
        month_settings: store.list_month_settings().await?,
    };

    let schedule = build_schedule(&snapshot, today, options);
    info!(
        "Scheduled {} invoice(s) across {} payday(s); {} unassignable",
        schedule.entries.len(),
        schedule.buckets.len(),
        schedule.unassignable.len()
    );
    Ok(schedule)
}

/// Formats a schedule into a human-readable summary string.
#[must_use]
pub fn format_schedule_summary(schedule: &Schedule) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Payment Schedule - {} - {} invoices across {} paydays\n",
        schedule.as_of.format("%d %B %Y"),
        schedule.entries.len(),
        schedule.buckets.len()
    );

    if !schedule.unassignable.is_empty() {
        let ids: Vec<String> = schedule.unassignable.iter().map(i64::to_string).collect();
        let _ = writeln!(summary, "  Needs a payday: invoices {}", ids.join(", "));
    }
    for invalid in &schedule.invalid_month_settings {
        let _ = writeln!(
            summary,
            "  Ignored month setting {}: {}-{} is not a valid month",
            invalid.id, invalid.year, invalid.month
        );
    }

    for bucket in &schedule.buckets {
        let _ = write!(summary, "\n  {}", bucket.payment_date.format("%a %d %b %Y"));
        if bucket.payment_date != bucket.payday {
            let _ = write!(summary, " (payday {})", bucket.payday.format("%a %d %b %Y"));
        }
        let _ = writeln!(summary, " | ${:.2}", bucket.total);

        for entry in &bucket.entries {
            let _ = writeln!(
                summary,
                "    [{}] {} ${:.2} due {}",
                entry.priority, entry.invoice.title, entry.invoice.amount, entry.invoice.due_date
            );
        }
    }

    summary
}
