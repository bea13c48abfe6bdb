use sqlx::{PgPool, migrate::Migrator};

use crate::error::StoreError;
use crate::store::{MemoryPlayerStore, PgPlayerStore};

/// Compile-time discovered SQLx migrations for the `hearth-database` crate.
pub static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Clone, Debug)]
pub(crate) enum PlayerBackend {
    Postgres(PgPlayerStore),
    Memory(MemoryPlayerStore),
}

/// Shared database handle passed across crates.
#[derive(Clone, Debug)]
pub struct Database {
    backend: PlayerBackend,
}

impl Database {
    /// Create a database handle from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            backend: PlayerBackend::Postgres(PgPlayerStore::new(pool)),
        }
    }

    /// Create a database handle backed by an in-process store.
    pub fn from_memory(store: MemoryPlayerStore) -> Self {
        Self {
            backend: PlayerBackend::Memory(store),
        }
    }

    /// Expose the underlying pool, if this handle is Postgres-backed.
    pub fn pool(&self) -> Option<&PgPool> {
        match &self.backend {
            PlayerBackend::Postgres(store) => Some(store.pool()),
            PlayerBackend::Memory(_) => None,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            PlayerBackend::Postgres(_) => "postgres",
            PlayerBackend::Memory(_) => "memory",
        }
    }

    /// Apply pending migrations. The in-memory backend has no schema.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        if let Some(pool) = self.pool() {
            MIGRATOR.run(pool).await?;
        }
        Ok(())
    }

    /// Close pooled connections; pending checkouts are allowed to finish.
    pub async fn close(&self) {
        if let Some(pool) = self.pool() {
            pool.close().await;
        }
    }

    pub(crate) fn backend(&self) -> &PlayerBackend {
        &self.backend
    }
}
