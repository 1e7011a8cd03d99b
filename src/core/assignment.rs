//! Payday assignment.
//!
//! Each invoice goes to the latest eligible payday on or before its due date.
//! Invoices due before every eligible payday are pulled forward to the first
//! one. A payday that already holds `soft_capacity` invoices hands the next one
//! to an earlier, less loaded payday when there is one; otherwise it takes the
//! invoice anyway.
//!
//! The assigner is stateful: call [`PaydayAssigner::assign`] in ascending
//! due-date order and the result is reproducible.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Why an invoice ended up on its payday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Due date falls within the payday's interval
    Bucketed,
    /// Due before every eligible payday; moved to the first one
    PulledForward,
    /// Moved to an earlier payday because the natural one was full
    Rebalanced,
    /// No upcoming payday exists; the most recent past payday was used
    Fallback,
}

/// A payday chosen for one invoice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// The payday, before weekend correction
    pub payday: NaiveDate,
    /// How it was chosen
    pub placement: Placement,
}

/// Number of invoices committed to each payday during one run.
#[derive(Debug, Default, Clone)]
pub struct PaydayLoadTracker {
    loads: HashMap<NaiveDate, usize>,
}

impl PaydayLoadTracker {
    /// An empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoices committed to `payday` so far.
    #[must_use]
    pub fn load(&self, payday: NaiveDate) -> usize {
        self.loads.get(&payday).copied().unwrap_or(0)
    }

    /// Records one more invoice on `payday` and returns the new load.
    pub fn commit(&mut self, payday: NaiveDate) -> usize {
        let load = self.loads.entry(payday).or_insert(0);
        *load += 1;
        *load
    }
}

/// Assigns invoices to paydays one at a time.
#[derive(Debug, Clone)]
pub struct PaydayAssigner {
    eligible: Vec<NaiveDate>,
    fallback: bool,
    soft_capacity: usize,
    tracker: PaydayLoadTracker,
}

impl PaydayAssigner {
    /// Prepares the eligible paydays: those on or after `today`, or the most
    /// recent past payday when none are upcoming. `paydays` may be unsorted
    /// and contain duplicates.
    #[must_use]
    pub fn new(paydays: &[NaiveDate], today: NaiveDate, soft_capacity: usize) -> Self {
        let mut sorted = paydays.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut eligible: Vec<NaiveDate> = sorted.iter().copied().filter(|p| *p >= today).collect();
        let fallback = eligible.is_empty() && !sorted.is_empty();
        if fallback {
            eligible.extend(sorted.last().copied());
            debug!("No upcoming paydays; falling back to {:?}", sorted.last());
        }

        Self {
            eligible,
            fallback,
            soft_capacity,
            tracker: PaydayLoadTracker::new(),
        }
    }

    /// Paydays invoices can be assigned to, ascending.
    #[must_use]
    pub fn eligible(&self) -> &[NaiveDate] {
        &self.eligible
    }

    /// Loads committed so far.
    #[must_use]
    pub const fn tracker(&self) -> &PaydayLoadTracker {
        &self.tracker
    }

    /// Picks a payday for an invoice due on `due_date` and commits it.
    ///
    /// Returns `None` only when there are no paydays at all.
    pub fn assign(&mut self, due_date: NaiveDate) -> Option<Assignment> {
        if self.eligible.is_empty() {
            return None;
        }

        let on_or_before = self.eligible.partition_point(|p| *p <= due_date);
        let (mut index, mut placement) = match on_or_before.checked_sub(1) {
            Some(index) => (index, Placement::Bucketed),
            None => (0, Placement::PulledForward),
        };
        if self.fallback {
            placement = Placement::Fallback;
        }

        let candidate_load = self.tracker.load(self.eligible[index]);
        if candidate_load >= self.soft_capacity {
            let earlier = (0..index)
                .rev()
                .find(|&i| self.tracker.load(self.eligible[i]) < candidate_load);
            if let Some(earlier) = earlier {
                debug!(
                    "Payday {} is full ({candidate_load}); moving invoice due {due_date} to {}",
                    self.eligible[index], self.eligible[earlier]
                );
                index = earlier;
                placement = Placement::Rebalanced;
            } else {
                warn!(
                    "Payday {} exceeds soft capacity of {} with no earlier alternative",
                    self.eligible[index], self.soft_capacity
                );
            }
        }

        let payday = self.eligible[index];
        self.tracker.commit(payday);
        Some(Assignment { payday, placement })
    }
}
