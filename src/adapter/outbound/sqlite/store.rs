//! SQLite-backed user store.
//!
//! Loads every active user with their four blacklists. Blacklist names are
//! normalized on load, whatever casing the rows were written with. A NULL or
//! zero upper bound on spread or profit leaves that range open.

use std::collections::HashMap;
use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::info;

use super::database::connection::{self, DbPool};
use super::database::model::{BlacklistRow, UserRow};
use super::database::schema::{
    blacklisted_coins, blacklisted_nets, deposit_exchanges, users, withdraw_exchanges,
};
use crate::domain::id::{ChatId, UserId};
use crate::domain::money::Volume;
use crate::domain::user::{Blacklist, BlacklistCategory, User};
use crate::error::{Error, Result};
use crate::port::outbound::store::UserStore;

// Each blacklist table has the same (user_id, name) shape.
macro_rules! load_blacklist {
    ($conn:expr, $table:ident, $ids:expr) => {
        $table::table
            .filter($table::user_id.eq_any($ids))
            .select(($table::user_id, $table::name))
            .load::<BlacklistRow>($conn)
    };
}

macro_rules! replace_blacklist {
    ($conn:expr, $table:ident, $id:expr, $names:expr) => {{
        diesel::delete($table::table.filter($table::user_id.eq($id))).execute($conn)?;
        for name in $names {
            diesel::insert_into($table::table)
                .values(($table::user_id.eq($id), $table::name.eq(name)))
                .execute($conn)?;
        }
    }};
}

/// User store over a Diesel SQLite pool.
pub struct SqliteUserStore {
    pool: DbPool,
}

impl SqliteUserStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (and migrate) the database at `database_url`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(database_url: &str) -> Result<Self> {
        Ok(Self::new(connection::open(database_url)?))
    }

    /// Load active users on the calling thread.
    ///
    /// # Errors
    /// Returns an error on query failure or an unparseable amount column.
    pub fn load_active_blocking(&self) -> Result<Vec<User>> {
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<UserRow> = users::table
            .filter(users::active.eq(true))
            .select(UserRow::as_select())
            .load(&mut conn)
            .map_err(db_error)?;
        let ids: Vec<i64> = rows.iter().map(|row| row.tg_id).collect();

        let mut blacklists: HashMap<i64, Blacklist> = HashMap::new();
        let categories = [
            (
                BlacklistCategory::DepositExchange,
                load_blacklist!(&mut conn, deposit_exchanges, &ids),
            ),
            (
                BlacklistCategory::WithdrawExchange,
                load_blacklist!(&mut conn, withdraw_exchanges, &ids),
            ),
            (
                BlacklistCategory::Coin,
                load_blacklist!(&mut conn, blacklisted_coins, &ids),
            ),
            (
                BlacklistCategory::Network,
                load_blacklist!(&mut conn, blacklisted_nets, &ids),
            ),
        ];
        for (category, entries) in categories {
            for entry in entries.map_err(db_error)? {
                blacklists
                    .entry(entry.user_id)
                    .or_default()
                    .insert(category, &entry.name);
            }
        }

        let users = rows
            .into_iter()
            .map(|row| {
                let blacklist = blacklists.remove(&row.tg_id).unwrap_or_default();
                to_user(row, blacklist)
            })
            .collect::<Result<Vec<_>>>()?;

        info!(users = users.len(), "Loaded active users");
        Ok(users)
    }

    /// Insert or replace a user and all of their blacklist entries.
    ///
    /// # Errors
    /// Returns an error if the write fails; nothing is written in that case.
    pub fn save_user(&self, user: &User, active: bool) -> Result<()> {
        let mut conn = self.pool.get().map_err(|e| Error::Connection(e.to_string()))?;
        let row = to_row(user, active);
        let id = row.tg_id;
        let blacklist = user.blacklist();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::replace_into(users::table).values(&row).execute(conn)?;
            replace_blacklist!(
                conn,
                deposit_exchanges,
                id,
                blacklist.names(BlacklistCategory::DepositExchange)
            );
            replace_blacklist!(
                conn,
                withdraw_exchanges,
                id,
                blacklist.names(BlacklistCategory::WithdrawExchange)
            );
            replace_blacklist!(
                conn,
                blacklisted_coins,
                id,
                blacklist.names(BlacklistCategory::Coin)
            );
            replace_blacklist!(
                conn,
                blacklisted_nets,
                id,
                blacklist.names(BlacklistCategory::Network)
            );
            Ok(())
        })
        .map_err(db_error)
    }
}

impl UserStore for SqliteUserStore {
    async fn load_active_users(&self) -> Result<Vec<User>> {
        let store = Self::new(self.pool.clone());
        tokio::task::spawn_blocking(move || store.load_active_blocking())
            .await
            .map_err(|e| Error::Database(e.to_string()))?
    }
}

fn db_error(e: diesel::result::Error) -> Error {
    Error::Database(e.to_string())
}

fn parse_amount(field: &'static str, value: &str) -> Result<Volume> {
    Decimal::from_str(value.trim())
        .map_err(|e| Error::Parse(format!("users.{field} '{value}': {e}")))
}

fn to_user(row: UserRow, blacklist: Blacklist) -> Result<User> {
    let volume_min = parse_amount("volume_min", &row.volume_min)?;
    let volume_max = match row.volume_max.as_deref() {
        Some(value) => parse_amount("volume_max", value)?,
        None => Volume::MAX,
    };
    let total_fee_max = row
        .total_fee_max
        .as_deref()
        .map(|value| parse_amount("total_fee_max", value))
        .transpose()?;
    let spread_min = parse_amount("spread_min", &row.spread_min)?;
    let spread_max = parse_upper_bound("spread_max", row.spread_max.as_deref())?;
    let profit_min = parse_amount("profit_min", &row.profit_min)?;
    let profit_max = parse_upper_bound("profit_max", row.profit_max.as_deref())?;
    let daily_turnover_min = parse_amount("daily_turnover_min", &row.daily_turnover_min)?;

    Ok(User::new(UserId::new(row.tg_id), ChatId::new(row.tg_id))
        .with_volume_bounds(volume_min, volume_max)
        .with_total_fee_max(total_fee_max)
        .with_spread_bounds(spread_min, spread_max)
        .with_profit_bounds(profit_min, profit_max)
        .with_daily_turnover_min(daily_turnover_min)
        .with_contract_check(row.check_contract)
        .with_blacklist(blacklist))
}

fn parse_upper_bound(field: &'static str, value: Option<&str>) -> Result<Option<Decimal>> {
    let bound = value.map(|v| parse_amount(field, v)).transpose()?;
    Ok(bound.filter(|max| !max.is_zero()))
}

fn to_row(user: &User, active: bool) -> UserRow {
    UserRow {
        tg_id: user.id().get(),
        active,
        volume_min: user.volume_min().to_string(),
        volume_max: (user.volume_max() != Volume::MAX).then(|| user.volume_max().to_string()),
        total_fee_max: user.total_fee_max().map(|fee| fee.to_string()),
        spread_min: user.spread_min().to_string(),
        spread_max: user.spread_max().map(|max| max.to_string()),
        profit_min: user.profit_min().to_string(),
        profit_max: user.profit_max().map(|max| max.to_string()),
        daily_turnover_min: user.daily_turnover_min().to_string(),
        check_contract: user.check_contract(),
    }
}
