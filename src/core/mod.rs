//! Core business logic - framework-agnostic invoice bookkeeping and the
//! payment scheduling engine.

/// Payday assignment with soft per-payday capacity
pub mod assignment;
/// Card CRUD and seeding
pub mod card;
/// Invoice CRUD and status transitions
pub mod invoice;
/// Month risk lookup for scoring
pub mod month_risk;
/// Month settings and annual expenses
pub mod month_setting;
/// Payday CRUD
pub mod payday;
/// Writing computed priorities back to storage
pub mod persist;
/// Invoice priority scoring
pub mod priority;
/// Schedule construction and formatting
pub mod schedule;
/// Weekend correction of payment dates
pub mod weekend;
