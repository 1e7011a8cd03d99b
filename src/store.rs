//! Storage interface consumed by the scheduler.
//!
//! The scheduler only needs three reads and one write. They are expressed as
//! a trait so callers can pass in whatever store they own; [`SeaOrmStore`]
//! is the database-backed implementation.

use crate::{
    core::{invoice, month_setting, payday},
    entities::{invoice as invoice_entity, month_setting as month_setting_entity},
    errors::Result,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Reads and writes the scheduler performs against persistent storage.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Every invoice with status `pending`.
    async fn list_pending_invoices(&self) -> Result<Vec<invoice_entity::Model>>;
    /// Every recorded payday.
    async fn list_paydays(&self) -> Result<Vec<NaiveDate>>;
    /// Every month setting.
    async fn list_month_settings(&self) -> Result<Vec<month_setting_entity::Model>>;
    /// Overwrites one invoice's stored priority.
    async fn update_invoice_priority(&self, invoice_id: i64, priority: i32) -> Result<()>;
}

/// [`InvoiceStore`] backed by a `SeaORM` connection.
#[derive(Debug)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Wraps an open connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl InvoiceStore for SeaOrmStore {
    async fn list_pending_invoices(&self) -> Result<Vec<invoice_entity::Model>> {
        invoice::list_pending_invoices(&self.db).await
    }

    async fn list_paydays(&self) -> Result<Vec<NaiveDate>> {
        payday::list_paydays(&self.db).await
    }

    async fn list_month_settings(&self) -> Result<Vec<month_setting_entity::Model>> {
        month_setting::list_month_settings(&self.db).await
    }

    async fn update_invoice_priority(&self, invoice_id: i64, priority: i32) -> Result<()> {
        invoice::update_invoice_priority(&self.db, invoice_id, priority).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::month_setting::MonthSettingInput;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_sea_orm_store_reads() -> Result<()> {
        let db = setup_test_db().await?;
        let pending = create_test_invoice(&db, "Rent", dec!(900), date(2024, 3, 10)).await?;
        let paid = create_test_invoice(&db, "Gym", dec!(30), date(2024, 3, 11)).await?;
        invoice::mark_invoice_paid(&db, paid.id).await?;
        payday::add_payday(&db, date(2024, 3, 15)).await?;
        month_setting::upsert_month_setting(
            &db,
            MonthSettingInput {
                year: 2024,
                month: 3,
                critical: true,
                ..Default::default()
            },
        )
        .await?;

        let store = SeaOrmStore::new(db);
        let invoices = store.list_pending_invoices().await?;
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].id, pending.id);
        assert_eq!(store.list_paydays().await?, vec![date(2024, 3, 15)]);
        assert_eq!(store.list_month_settings().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_sea_orm_store_updates_priority() -> Result<()> {
        let db = setup_test_db().await?;
        let rent = create_test_invoice(&db, "Rent", dec!(900), date(2024, 3, 10)).await?;
        let store = SeaOrmStore::new(db);

        store.update_invoice_priority(rent.id, 11).await?;
        let stored = invoice::get_invoice_by_id(store.connection(), rent.id).await?;
        assert_eq!(stored.map(|i| i.priority), Some(11));

        assert!(store.update_invoice_priority(rent.id + 100, 1).await.is_err());

        Ok(())
    }
}
