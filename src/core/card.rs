//! Card business logic - payment instruments invoices can be charged to.

use crate::{
    config::settings::CardConfig,
    entities::{Card, card},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

fn validate_day(day: i32, field: &str) -> Result<()> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(Error::Config {
            message: format!("Card {field} must be between 1 and 31, got {day}"),
        })
    }
}

/// Creates a card after validating the name and statement days.
///
/// This function is commonly used to register a payment instrument before any
/// invoice is charged to it. The name is trimmed and must not be empty; both
/// the closing day and the due day must fall between 1 and 31.
///
/// # Errors
/// Returns `Error::Config` for an invalid name or day, or a database error if
/// the insert fails (for example, when the name is already taken).
pub async fn create_card<C>(
    db: &C,
    name: &str,
    closing_day: i32,
    due_day: i32,
) -> Result<card::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Card name cannot be empty".to_string(),
        });
    }
    validate_day(closing_day, "closing_day")?;
    validate_day(due_day, "due_day")?;

    let card = card::ActiveModel {
        name: Set(name.trim().to_string()),
        closing_day: Set(closing_day),
        due_day: Set(due_day),
        ..Default::default()
    };

    card.insert(db).await.map_err(Into::into)
}

/// Finds a card by its exact name.
pub async fn get_card_by_name<C>(db: &C, name: &str) -> Result<Option<card::Model>>
where
    C: ConnectionTrait,
{
    Card::find()
        .filter(card::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all cards alphabetically.
pub async fn list_cards<C>(db: &C) -> Result<Vec<card::Model>>
where
    C: ConnectionTrait,
{
    Card::find()
        .order_by_asc(card::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates every configured card that does not exist yet.
///
/// This function is commonly used at startup to mirror the `[[cards]]` entries
/// of the configuration file into the database. Cards are matched by name, so
/// running it again creates nothing. Returns how many cards were created.
pub async fn seed_cards<C>(db: &C, cards: &[CardConfig]) -> Result<usize>
where
    C: ConnectionTrait,
{
    let mut created = 0;
    for config in cards {
        if get_card_by_name(db, config.name.trim()).await?.is_some() {
            continue;
        }
        create_card(db, &config.name, config.closing_day, config.due_day).await?;
        created += 1;
    }

    if created > 0 {
        info!("Seeded {created} card(s) from configuration");
    }
    Ok(created)
}
