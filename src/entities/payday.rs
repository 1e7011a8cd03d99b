//! Payday entity - A calendar day on which income is expected.
//! At most one row exists per day.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payday database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "paydays")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The income day
    #[sea_orm(unique)]
    pub date: Date,
}

/// `Payday` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
