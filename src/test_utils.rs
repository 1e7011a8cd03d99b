//! Shared test utilities for `InvoiceBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        card,
        invoice::{self, NewInvoice},
    },
    entities::{self, InvoiceStatus},
    errors::Result,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Invoice input with baseline priority 0 and no card.
pub fn new_invoice(title: &str, amount: Decimal, due_date: NaiveDate) -> NewInvoice {
    NewInvoice {
        title: title.to_string(),
        amount,
        due_date,
        priority: 0,
        card_id: None,
    }
}

/// Stores a pending invoice with sensible defaults.
pub async fn create_test_invoice(
    db: &DatabaseConnection,
    title: &str,
    amount: Decimal,
    due_date: NaiveDate,
) -> Result<entities::invoice::Model> {
    invoice::create_invoice(db, new_invoice(title, amount, due_date)).await
}

/// Stores a card closing on the 1st and due on the 10th.
pub async fn create_test_card(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::card::Model> {
    card::create_card(db, name, 1, 10).await
}

/// A pending invoice model that never touches the database.
pub fn invoice_model(id: i64, amount: Decimal, due_date: NaiveDate) -> entities::invoice::Model {
    let stamp = due_date.and_time(NaiveTime::MIN);
    entities::invoice::Model {
        id,
        title: format!("Invoice {id}"),
        amount,
        due_date,
        status: InvoiceStatus::Pending,
        priority: 0,
        card_id: None,
        created_at: stamp,
        updated_at: stamp,
    }
}

/// A month setting model that never touches the database.
pub fn month_setting_model(
    id: i64,
    year: i32,
    month: i32,
    critical: bool,
    low_income: bool,
) -> entities::month_setting::Model {
    entities::month_setting::Model {
        id,
        year,
        month,
        critical,
        low_income,
        note: String::new(),
    }
}
