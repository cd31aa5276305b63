use std::path::Path;

use spreadcast::adapter::outbound::sqlite::SqliteUserStore;
use tempfile::TempDir;

/// Migrated SQLite database in a temporary directory, removed on drop.
pub struct TempDb {
    dir: TempDir,
    url: String,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!("sqlite://{}", dir.path().join("users.db").display());
        // Opening once creates the file and runs migrations.
        SqliteUserStore::open(&url).expect("open temp database");
        Self { dir, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self) -> SqliteUserStore {
        SqliteUserStore::open(&self.url).expect("open temp database")
    }
}
