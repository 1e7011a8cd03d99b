//! Invoice business logic - Handles all invoice-related operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting invoices.
//! All functions are async and return Result types for error handling.

use crate::{
    entities::{Card, Invoice, InvoiceStatus, invoice},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Fields needed to create an invoice.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    /// Display title
    pub title: String,
    /// Amount due
    pub amount: Decimal,
    /// Day the payment is due
    pub due_date: NaiveDate,
    /// Baseline priority
    pub priority: i32,
    /// Card to charge, if any
    pub card_id: Option<i64>,
}

/// Creates a new pending invoice after validating its fields.
///
/// This function is commonly used to record a bill as soon as it arrives, so the
/// next scheduling run can place it on a payday. The title is trimmed and must
/// not be empty, the amount must be non-negative and a referenced card must
/// exist. A negative baseline priority is clamped to zero.
///
/// # Errors
/// Returns `Error::Config` for an empty title, `Error::InvalidAmount` for a
/// negative amount, `Error::CardNotFound` for an unknown card, or a database
/// error if the insert fails.
pub async fn create_invoice<C>(db: &C, new: NewInvoice) -> Result<invoice::Model>
where
    C: ConnectionTrait,
{
    if new.title.trim().is_empty() {
        return Err(Error::Config {
            message: "Invoice title cannot be empty".to_string(),
        });
    }

    if new.amount < Decimal::ZERO {
        return Err(Error::InvalidAmount { amount: new.amount });
    }

    if let Some(card_id) = new.card_id {
        Card::find_by_id(card_id)
            .one(db)
            .await?
            .ok_or(Error::CardNotFound { id: card_id })?;
    }

    let now = Utc::now().naive_utc();
    let invoice = invoice::ActiveModel {
        title: Set(new.title.trim().to_string()),
        amount: Set(new.amount),
        due_date: Set(new.due_date),
        status: Set(InvoiceStatus::Pending),
        priority: Set(new.priority.max(0)),
        card_id: Set(new.card_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = invoice.insert(db).await?;
    debug!("Created invoice {} due {}", result.id, result.due_date);
    Ok(result)
}

/// Finds an invoice by its unique ID.
pub async fn get_invoice_by_id<C>(db: &C, invoice_id: i64) -> Result<Option<invoice::Model>>
where
    C: ConnectionTrait,
{
    Invoice::find_by_id(invoice_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every pending invoice, earliest due date first (ties by id).
///
/// This function is commonly used to gather the candidates for a scheduling run.
/// Paid and overdue invoices are left out.
pub async fn list_pending_invoices<C>(db: &C) -> Result<Vec<invoice::Model>>
where
    C: ConnectionTrait,
{
    Invoice::find()
        .filter(invoice::Column::Status.eq(InvoiceStatus::Pending))
        .order_by_asc(invoice::Column::DueDate)
        .order_by_asc(invoice::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists every invoice regardless of status, earliest due date first.
///
/// This function is commonly used to show the full invoice history, including
/// invoices that no longer take part in scheduling.
pub async fn list_invoices<C>(db: &C) -> Result<Vec<invoice::Model>>
where
    C: ConnectionTrait,
{
    Invoice::find()
        .order_by_asc(invoice::Column::DueDate)
        .order_by_asc(invoice::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_existing<C>(db: &C, invoice_id: i64) -> Result<invoice::Model>
where
    C: ConnectionTrait,
{
    Invoice::find_by_id(invoice_id)
        .one(db)
        .await?
        .ok_or(Error::InvoiceNotFound { id: invoice_id })
}

/// Sets the lifecycle status of an invoice.
pub async fn update_invoice_status<C>(
    db: &C,
    invoice_id: i64,
    status: InvoiceStatus,
) -> Result<invoice::Model>
where
    C: ConnectionTrait,
{
    let existing = find_existing(db, invoice_id).await?;

    let mut active_model: invoice::ActiveModel = existing.into();
    active_model.status = Set(status);
    active_model.updated_at = Set(Utc::now().naive_utc());
    active_model.update(db).await.map_err(Into::into)
}

/// Marks an invoice as paid, removing it from future schedules.
///
/// # Errors
/// Returns `Error::InvoiceNotFound` if no invoice has this ID.
pub async fn mark_invoice_paid<C>(db: &C, invoice_id: i64) -> Result<invoice::Model>
where
    C: ConnectionTrait,
{
    update_invoice_status(db, invoice_id, InvoiceStatus::Paid).await
}

/// Overwrites the stored priority of an invoice. Negative values are clamped to zero.
pub async fn update_invoice_priority<C>(
    db: &C,
    invoice_id: i64,
    priority: i32,
) -> Result<invoice::Model>
where
    C: ConnectionTrait,
{
    let existing = find_existing(db, invoice_id).await?;

    let mut active_model: invoice::ActiveModel = existing.into();
    active_model.priority = Set(priority.max(0));
    active_model.updated_at = Set(Utc::now().naive_utc());
    active_model.update(db).await.map_err(Into::into)
}

/// Permanently deletes an invoice.
pub async fn delete_invoice<C>(db: &C, invoice_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let existing = find_existing(db, invoice_id).await?;
    existing.delete(db).await?;
    Ok(())
}
