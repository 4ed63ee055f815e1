//! Throwaway SQLite stores for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use argon2::Params;
use contact_book::domain::ports::PasswordHasher;
use contact_book::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use contact_book::outbound::security::Argon2PasswordHasher;
use tempfile::TempDir;

/// Migrated database file inside a temporary directory.
pub struct TempStore {
    pub pool: DbPool,
    pub database_url: String,
    _dir: TempDir,
}

impl TempStore {
    /// Create a fresh store with the schema applied.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path: PathBuf = dir.path().join("nested").join("contacts.sqlite");
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
        let database_url = path.to_str().expect("utf8 path").to_owned();

        run_pending_migrations(&database_url)
            .await
            .expect("migrations apply");
        let pool = DbPool::new(PoolConfig::new(database_url.clone()).with_max_size(2))
            .await
            .expect("pool builds");

        Self {
            pool,
            database_url,
            _dir: dir,
        }
    }
}

/// Argon2 hasher with minimal cost so tests stay fast.
pub fn cheap_hasher() -> Arc<dyn PasswordHasher> {
    let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
    Arc::new(Argon2PasswordHasher::new(params))
}
