//! Transport adapter for the upstream recipe database.
//!
//! Pure HTTP plumbing: each logical query endpoint gets one GET, the JSON
//! envelope is parsed, and a null result list is already normalized to an
//! empty vec. Reshaping records into the application's own types happens a
//! layer up, in `crate::recipes`.

mod client;
mod error;
mod record;

pub use client::{MealDb, MealDbClient};
pub use error::MealDbError;
pub use record::{
    CategoryRecord, ListEntry, MealRecord, MealSummary, INGREDIENT_SLOTS,
};
