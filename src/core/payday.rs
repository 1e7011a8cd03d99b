//! Payday business logic - expected income days.
//!
//! Paydays are de-duplicated by calendar day: adding a day that already exists
//! returns the stored row instead of inserting a second one.

use crate::{
    entities::{Payday, payday},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Adds a payday, or returns the existing one for the same day.
///
/// This function is commonly used when the user records an upcoming income day.
/// Calling it twice for the same date is harmless: the second call hands back
/// the row stored by the first.
///
/// # Errors
/// Returns an error if the database query or insert fails.
pub async fn add_payday<C>(db: &C, date: NaiveDate) -> Result<payday::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = Payday::find()
        .filter(payday::Column::Date.eq(date))
        .one(db)
        .await?
    {
        debug!("Payday {date} already recorded");
        return Ok(existing);
    }

    let payday = payday::ActiveModel {
        date: Set(date),
        ..Default::default()
    };
    payday.insert(db).await.map_err(Into::into)
}

/// Lists all payday dates in ascending order.
///
/// This function is commonly used to feed the scheduler, which decides on its
/// own which of these dates are still eligible.
pub async fn list_paydays<C>(db: &C) -> Result<Vec<NaiveDate>>
where
    C: ConnectionTrait,
{
    let paydays = Payday::find()
        .order_by_asc(payday::Column::Date)
        .all(db)
        .await?;
    Ok(paydays.into_iter().map(|p| p.date).collect())
}

/// Removes the payday on `date`. Returns whether a row was deleted.
pub async fn delete_payday<C>(db: &C, date: NaiveDate) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Payday::delete_many()
        .filter(payday::Column::Date.eq(date))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
