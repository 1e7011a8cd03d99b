//! Invoice entity - A bill the user has to pay by its due date.
//!
//! Each invoice carries an amount, a due date, a lifecycle status and a
//! baseline priority. Only `pending` invoices take part in payment scheduling.
//! An invoice may optionally be charged to a card.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an invoice, stored as lowercase text
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Not yet paid; eligible for scheduling
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Paid; never scheduled again
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Due date passed while still unpaid
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

/// Invoice database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    /// Unique identifier for the invoice
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable title (e.g., "Electricity", "Rent")
    pub title: String,
    /// Amount due, never negative
    pub amount: Decimal,
    /// Calendar day the payment is due
    pub due_date: Date,
    /// Current lifecycle status
    pub status: InvoiceStatus,
    /// Baseline user-assigned weight, also the target of persisted scores
    pub priority: i32,
    /// Card this invoice is charged to, if any
    pub card_id: Option<i64>,
    /// When the invoice was created
    pub created_at: DateTime,
    /// When the invoice was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Invoice and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each invoice may belong to one card
    #[sea_orm(
        belongs_to = "super::card::Entity",
        from = "Column::CardId",
        to = "super::card::Column::Id"
    )]
    Card,
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
