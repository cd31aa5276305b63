//! SQLite user store.
//!
//! Users and their blacklists live in five tables managed with Diesel and
//! created by embedded migrations.

pub mod database;
pub mod store;

pub use store::SqliteUserStore;
