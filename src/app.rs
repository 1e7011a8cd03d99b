//! Daily scheduling run.
//!
//! Glues the configuration, the card seeds and the scheduling engine together
//! the way the binary uses them. Kept in the library so a whole run can be
//! exercised against an in-memory database.

use crate::{
    config::settings::Config,
    core::{
        card, persist,
        schedule::{self, Schedule},
    },
    errors::Result,
    store::SeaOrmStore,
};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Runs one scheduling pass as of `today` and returns the computed schedule.
///
/// This function is commonly used by the binary right after the database is
/// ready. It seeds the configured cards, schedules every pending invoice, logs
/// the summary and, when `persist_priorities` is enabled, writes the computed
/// priorities back. A failed priority write is logged and does not fail the run.
///
/// # Errors
/// Returns an error if seeding cards or reading the scheduling snapshot fails.
pub async fn run_daily(
    store: &SeaOrmStore,
    settings: &Config,
    today: NaiveDate,
) -> Result<Schedule> {
    card::seed_cards(store.connection(), &settings.cards).await?;

    let schedule = schedule::compute_schedule(store, today, &settings.scheduler.options()).await?;
    info!("\n{}", schedule::format_schedule_summary(&schedule));

    if settings.scheduler.persist_priorities {
        let report = persist::persist_priorities(store, &schedule.entries).await;
        for (invoice_id, e) in &report.failed {
            warn!("Priority for invoice {} was not saved: {}", invoice_id, e);
        }
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::settings::parse_config,
        core::{card::list_cards, invoice, payday},
        test_utils::*,
    };
    use rust_decimal_macros::dec;

    const SETTINGS: &str = r#"
        [scheduler]
        soft_capacity = 5
        persist_priorities = true

        [[cards]]
        name = "Visa"
        closing_day = 3
        due_day = 10
    "#;

    #[tokio::test]
    async fn test_run_daily_seeds_schedules_and_persists() -> Result<()> {
        let db = setup_test_db().await?;
        let today = date(2024, 3, 4);
        let rent = create_test_invoice(&db, "Rent", dec!(1200), date(2024, 3, 5)).await?;
        payday::add_payday(&db, today).await?;
        let store = SeaOrmStore::new(db);
        let settings = parse_config(SETTINGS)?;

        let schedule = run_daily(&store, &settings, today).await?;

        assert_eq!(schedule.as_of, today);
        assert_eq!(schedule.entries.len(), 1);
        assert_eq!(schedule.entries[0].payment_date, today);
        let cards = list_cards(store.connection()).await?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Visa");
        // 5 urgency + 3 amount, written back
        let stored = invoice::get_invoice_by_id(store.connection(), rent.id).await?;
        assert_eq!(stored.map(|i| i.priority), Some(8));

        // A second run is safe: no duplicate cards, same schedule
        let again = run_daily(&store, &settings, today).await?;
        assert_eq!(list_cards(store.connection()).await?.len(), 1);
        assert_eq!(again.entries[0].invoice.id, rent.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_run_daily_without_persist_leaves_priorities() -> Result<()> {
        let db = setup_test_db().await?;
        let today = date(2024, 3, 4);
        let rent = create_test_invoice(&db, "Rent", dec!(1200), date(2024, 3, 5)).await?;
        payday::add_payday(&db, today).await?;
        let store = SeaOrmStore::new(db);

        let schedule = run_daily(&store, &Config::default(), today).await?;

        assert_eq!(schedule.entries[0].priority, 8);
        let stored = invoice::get_invoice_by_id(store.connection(), rent.id).await?;
        assert_eq!(stored.map(|i| i.priority), Some(0));
        assert!(list_cards(store.connection()).await?.is_empty());

        Ok(())
    }
}
