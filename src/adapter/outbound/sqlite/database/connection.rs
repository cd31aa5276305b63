//! Database connection management using Diesel ORM.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Applies the connection pragmas every pooled connection needs.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        for pragma in ["PRAGMA foreign_keys = ON", "PRAGMA busy_timeout = 5000"] {
            diesel::sql_query(pragma)
                .execute(conn)
                .map_err(diesel::r2d2::Error::QueryError)?;
        }
        Ok(())
    }
}

/// Strip an optional `sqlite://` scheme from a database URL.
#[must_use]
pub fn database_path(url: &str) -> &str {
    url.strip_prefix("sqlite://").unwrap_or(url)
}

/// Create a connection pool for the given database URL.
///
/// An in-memory database gets a single connection so every caller sees the
/// same data. Foreign keys are enforced on every connection.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let path = database_path(database_url);
    let max_size = if path == ":memory:" { 1 } else { 4 };
    let manager = ConnectionManager::<SqliteConnection>::new(path);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .map_err(|e| Error::Connection(format!("sqlite {path}: {e}")))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    debug!(applied = applied.len(), "Migrations applied");
    Ok(())
}

/// Open a pool and bring the schema up to date.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn open(database_url: &str) -> Result<DbPool> {
    let pool = create_pool(database_url)?;
    run_migrations(&pool)?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[derive(diesel::QueryableByName)]
    struct ForeignKeys {
        #[diesel(sql_type = diesel::sql_types::Integer)]
        foreign_keys: i32,
    }

    fn foreign_keys(conn: &mut SqliteConnection) -> i32 {
        diesel::sql_query("PRAGMA foreign_keys")
            .get_result::<ForeignKeys>(conn)
            .unwrap()
            .foreign_keys
    }

    fn tables(pool: &DbPool) -> Vec<String> {
        let mut conn = pool.get().unwrap();
        diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' \
             AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect()
    }

    #[test]
    fn test_database_path_strips_scheme() {
        assert_eq!(database_path("sqlite://users.db"), "users.db");
        assert_eq!(database_path("users.db"), "users.db");
    }

    #[test]
    fn test_migrations_create_tables() {
        let pool = open(":memory:").unwrap();
        assert_eq!(
            tables(&pool),
            vec![
                "blacklisted_coins",
                "blacklisted_nets",
                "deposit_exchanges",
                "users",
                "withdraw_exchanges",
            ]
        );
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let pool = open(":memory:").unwrap();
        run_migrations(&pool).unwrap();
        assert_eq!(tables(&pool).len(), 5);
    }

    #[test]
    fn test_every_pooled_connection_enforces_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("users.db");
        let pool = open(url.to_str().unwrap()).unwrap();

        let mut first = pool.get().unwrap();
        let mut second = pool.get().unwrap();

        assert_eq!(foreign_keys(&mut first), 1);
        assert_eq!(foreign_keys(&mut second), 1);
    }

    #[test]
    fn test_orphan_blacklist_rows_are_rejected() {
        let pool = create_pool(":memory:").unwrap();
        run_migrations(&pool).unwrap();
        let mut conn = pool.get().unwrap();

        let orphan = diesel::sql_query(
            "INSERT INTO blacklisted_coins (user_id, name) VALUES (42, 'PEPE')",
        )
        .execute(&mut conn);

        assert!(orphan.is_err());
    }
}
