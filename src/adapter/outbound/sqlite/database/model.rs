//! Database row types for Diesel ORM.
//!
//! Decimal amounts are stored as text so they round-trip exactly.

use diesel::prelude::*;

use super::schema::users;

/// Database row for a user.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub tg_id: i64,
    pub active: bool,
    pub volume_min: String,
    pub volume_max: Option<String>,
    pub total_fee_max: Option<String>,
    pub spread_min: String,
    pub spread_max: Option<String>,
    pub profit_min: String,
    pub profit_max: Option<String>,
    pub daily_turnover_min: String,
    pub check_contract: bool,
}

/// One blacklist entry, as loaded from any of the four blacklist tables.
#[derive(Queryable, Debug, Clone)]
pub struct BlacklistRow {
    pub user_id: i64,
    pub name: String,
}
