//! Month setting business logic.
//!
//! Month settings flag calendar months as critical or low-income and record
//! the recurring annual expenses that fall in them. The scheduler only reads
//! the two flags; see [`crate::core::month_risk`].

use crate::{
    entities::{AnnualExpense, MonthSetting, annual_expense, month_setting},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Values written by [`upsert_month_setting`].
#[derive(Debug, Clone, Default)]
pub struct MonthSettingInput {
    /// Calendar year
    pub year: i32,
    /// Calendar month (1-12)
    pub month: i32,
    /// Critical month flag
    pub critical: bool,
    /// Low income flag
    pub low_income: bool,
    /// Free-text note
    pub note: String,
}

/// Resolves a (year, month) pair to the first day of that month.
///
/// # Errors
/// Returns [`Error::InvalidMonth`] when the pair does not name a calendar month.
pub fn validate_month(year: i32, month: i32) -> Result<NaiveDate> {
    u32::try_from(month)
        .ok()
        .and_then(|m| NaiveDate::from_ymd_opt(year, m, 1))
        .ok_or(Error::InvalidMonth { year, month })
}

/// Creates the setting for (year, month) or overwrites the existing one.
///
/// This function is commonly used to flag a month as critical or low-income
/// ahead of time, so invoices due in that month gain priority. The flags and
/// note of an existing setting are replaced; its id is kept.
///
/// # Errors
/// Returns [`Error::InvalidMonth`] when the month is outside 1-12, or a database
/// error if the write fails.
pub async fn upsert_month_setting<C>(
    db: &C,
    input: MonthSettingInput,
) -> Result<month_setting::Model>
where
    C: ConnectionTrait,
{
    validate_month(input.year, input.month)?;

    match get_month_setting(db, input.year, input.month).await? {
        Some(existing) => {
            let mut active_model: month_setting::ActiveModel = existing.into();
            active_model.critical = Set(input.critical);
            active_model.low_income = Set(input.low_income);
            active_model.note = Set(input.note);
            active_model.update(db).await.map_err(Into::into)
        }
        None => {
            let setting = month_setting::ActiveModel {
                year: Set(input.year),
                month: Set(input.month),
                critical: Set(input.critical),
                low_income: Set(input.low_income),
                note: Set(input.note),
                ..Default::default()
            };
            setting.insert(db).await.map_err(Into::into)
        }
    }
}

/// Finds the setting for (year, month); the lowest id wins if duplicates exist.
pub async fn get_month_setting<C>(
    db: &C,
    year: i32,
    month: i32,
) -> Result<Option<month_setting::Model>>
where
    C: ConnectionTrait,
{
    MonthSetting::find()
        .filter(month_setting::Column::Year.eq(year))
        .filter(month_setting::Column::Month.eq(month))
        .order_by_asc(month_setting::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every month setting in insertion order.
pub async fn list_month_settings<C>(db: &C) -> Result<Vec<month_setting::Model>>
where
    C: ConnectionTrait,
{
    MonthSetting::find()
        .order_by_asc(month_setting::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Attaches a recurring annual expense to a month setting.
pub async fn add_annual_expense<C>(
    db: &C,
    month_setting_id: i64,
    name: &str,
    amount: Decimal,
) -> Result<annual_expense::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Annual expense name cannot be empty".to_string(),
        });
    }
    if amount < Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }

    MonthSetting::find_by_id(month_setting_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::Config {
            message: format!("Month setting {month_setting_id} does not exist"),
        })?;

    let expense = annual_expense::ActiveModel {
        month_setting_id: Set(month_setting_id),
        name: Set(name.trim().to_string()),
        amount: Set(amount),
        ..Default::default()
    };
    expense.insert(db).await.map_err(Into::into)
}

/// Lists the annual expenses attached to a month setting.
pub async fn list_annual_expenses<C>(
    db: &C,
    month_setting_id: i64,
) -> Result<Vec<annual_expense::Model>>
where
    C: ConnectionTrait,
{
    AnnualExpense::find()
        .filter(annual_expense::Column::MonthSettingId.eq(month_setting_id))
        .order_by_asc(annual_expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
