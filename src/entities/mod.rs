//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod annual_expense;
pub mod card;
pub mod invoice;
pub mod month_setting;
pub mod payday;

// Re-export specific types to avoid conflicts
pub use annual_expense::{
    Column as AnnualExpenseColumn, Entity as AnnualExpense, Model as AnnualExpenseModel,
};
pub use card::{Column as CardColumn, Entity as Card, Model as CardModel};
pub use invoice::{
    Column as InvoiceColumn, Entity as Invoice, InvoiceStatus, Model as InvoiceModel,
};
pub use month_setting::{
    Column as MonthSettingColumn, Entity as MonthSetting, Model as MonthSettingModel,
};
pub use payday::{Column as PaydayColumn, Entity as Payday, Model as PaydayModel};
