//! Month setting entity - Per-month risk annotations.
//!
//! A month can be flagged `critical` and/or `low_income`; both flags raise the
//! priority of invoices due in that month. Recurring annual expenses that
//! explain why a month is tight live in the `annual_expenses` table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Month setting database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "month_settings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12 when valid
    pub month: i32,
    /// Month flagged as financially critical
    pub critical: bool,
    /// Month flagged as having reduced income
    pub low_income: bool,
    /// Free-text note
    pub note: String,
}

/// Defines relationships between `MonthSetting` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One month setting lists many annual expenses
    #[sea_orm(has_many = "super::annual_expense::Entity")]
    AnnualExpenses,
}

impl Related<super::annual_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnnualExpenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
