//! Annual expense entity - A recurring yearly cost attached to a month setting
//! (e.g., car insurance every March).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Annual expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annual_expenses")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Month setting this expense belongs to
    pub month_setting_id: i64,
    /// What the expense is for
    pub name: String,
    /// Expected amount
    pub amount: Decimal,
}

/// Defines relationships between `AnnualExpense` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each annual expense belongs to one month setting
    #[sea_orm(
        belongs_to = "super::month_setting::Entity",
        from = "Column::MonthSettingId",
        to = "super::month_setting::Column::Id"
    )]
    MonthSetting,
}

impl Related<super::month_setting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthSetting.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
