// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relational backend on top of SQLite.
use std::sync::Arc;

use sqlx::migrate::{MigrateDatabase, Migrator};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, migrate};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::Backend;
use crate::config::StoreConfig;

/// Create SQLite database if it doesn't already exist.
pub async fn create_database(url: &str) -> Result<(), SqliteError> {
    if !Sqlite::database_exists(url).await? {
        Sqlite::create_database(url).await?
    }
    Ok(())
}

/// Drop SQLite database if it exists.
pub async fn drop_database(url: &str) -> Result<(), SqliteError> {
    if Sqlite::database_exists(url).await? {
        Sqlite::drop_database(url).await?
    }
    Ok(())
}

/// Get migrations from folder without running them.
pub fn migrations() -> Migrator {
    migrate!()
}

/// Run any pending database migrations from inside the application.
pub async fn run_pending_migrations(pool: &sqlx::SqlitePool) -> Result<(), SqliteError> {
    migrations().run(pool).await?;
    Ok(())
}

#[derive(Clone, Debug)]
pub struct SqliteStoreBuilder {
    url: String,
    max_connections: u32,
    run_migrations: bool,
    create_database: bool,
}

impl Default for SqliteStoreBuilder {
    fn default() -> Self {
        Self {
            // In-memory databases are private to a single connection.
            url: "sqlite::memory:".into(),
            max_connections: 1,
            create_database: true,
            run_migrations: true,
        }
    }
}

impl SqliteStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with all settings taken from the `sqlite` variant of a store configuration.
    ///
    /// Returns `None` if the configuration selects another backend.
    pub fn from_config(config: &StoreConfig) -> Option<Self> {
        match config {
            StoreConfig::Sqlite {
                url,
                max_connections,
                create_database,
                run_migrations,
            } => Some(Self {
                url: url.clone(),
                // Every connection to an in-memory database opens a fresh, empty database of its
                // own, only one of them would carry the migrated schema.
                max_connections: if is_memory_url(url) {
                    1
                } else {
                    *max_connections
                },
                create_database: *create_database,
                run_migrations: *run_migrations,
            }),
            _ => None,
        }
    }

    #[cfg(any(test, feature = "test_utils"))]
    pub fn random_memory_url(mut self) -> Self {
        // Combining Rust tests with in-memory databases can lead to unsound behaviour, this
        // "workaround" assigns every temporary database a different, random name and keeps them
        // isolated from other tests.
        //
        // See related issue: https://github.com/launchbadge/sqlx/issues/2510
        self.url = format!(
            "sqlite://dbmem{}?mode=memory&cache=private",
            rand::random::<u32>()
        );
        self
    }

    pub fn database_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn create_database(mut self, create_database: bool) -> Self {
        self.create_database = create_database;
        self
    }

    pub fn run_default_migrations(mut self, run_migrations: bool) -> Self {
        self.run_migrations = run_migrations;
        self
    }

    pub async fn build(self) -> Result<SqliteStore, SqliteError> {
        if self.create_database {
            create_database(&self.url).await?;
        }

        // Foreign keys are enabled by sqlx for every new connection, all cascades declared in
        // the schema depend on it.
        let pool: sqlx::SqlitePool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.url)
            .await?;

        if self.run_migrations {
            run_pending_migrations(&pool).await?;
        }

        debug!(url = %self.url, max_connections = self.max_connections, "opened sqlite store");

        Ok(SqliteStore::new(pool))
    }
}

/// Returns `true` if the connection string points at a private in-memory database.
fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

pub type Transaction = sqlx::Transaction<'static, Sqlite>;

/// SQLite database with connection pool.
///
/// This struct can be cloned and used in multiple places in the application, every cloned
/// instance re-uses the same connection pool.
///
/// Reads go directly to the pool and only ever see committed state. Every write runs in its own
/// transaction which is committed when the write succeeded and rolled back otherwise, so
/// multi-statement writes like patching a prospect never become partially visible.
///
/// SQLite strictly serializes transactions with _writes_. We make this explicit with a semaphore
/// holding a single permit: a process entering `write` waits until the previous writer has
/// committed or rolled back.
///
/// Authorization checks and the protected write are _not_ wrapped into one transaction. A caller
/// whose access gets revoked concurrently can therefore squeeze in one last write, but never a
/// write without any grant at the time of the check.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: sqlx::SqlitePool,
    semaphore: Arc<Semaphore>,
}

impl SqliteStore {
    pub(crate) fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            pool,
            semaphore: Arc::new(Semaphore::new(1)),
        }
    }

    /// Shortcut building an in-memory SQLite database with a randomised name for testing purposes.
    #[cfg(any(test, feature = "test_utils"))]
    pub async fn temporary() -> Self {
        SqliteStoreBuilder::new()
            .random_memory_url()
            .max_connections(1)
            .build()
            .await
            .expect("migrations succeeded")
    }

    /// Execute SQL statements within a new transaction.
    ///
    /// The transaction gets committed if the closure returns `Ok` and rolled back otherwise.
    /// Never call `execute` from within the closure, the pool might not have a second connection
    /// to hand out.
    pub async fn write<F, R>(&self, f: F) -> Result<R, SqliteError>
    where
        F: AsyncFnOnce(&mut Transaction) -> Result<R, SqliteError>,
    {
        // Acquire the permit first, it will await if currently another process is writing.
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("if semaphore is closed then the whole struct is gone as well");

        let mut tx = self.pool.begin().await?;

        match f(&mut tx).await {
            Ok(result) => {
                tx.commit().await?;
                Ok(result)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("failed rolling back transaction: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Execute SQL query directly.
    pub async fn execute<F, R>(&self, f: F) -> Result<R, SqliteError>
    where
        F: AsyncFnOnce(&sqlx::SqlitePool) -> Result<R, SqliteError>,
    {
        f(&self.pool).await
    }
}

/// SQLite stores integers as signed 64-bit values.
pub(crate) fn to_sql_timestamp(timestamp: u64) -> Result<i64, SqliteError> {
    i64::try_from(timestamp)
        .map_err(|err| SqliteError::Encode("timestamp".into(), err.to_string()))
}

pub(crate) fn from_sql_timestamp(field: &str, value: i64) -> Result<u64, SqliteError> {
    u64::try_from(value).map_err(|err| SqliteError::Decode(field.into(), err.to_string()))
}

impl Backend for SqliteStore {
    type Error = SqliteError;
}

#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite database and connection error.
    #[error(transparent)]
    Sqlite(#[from] sqlx::Error),

    /// SQL table schema migration error.
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A value could not be represented in the database. This is a critical error.
    #[error("failed encoding '{0}' value before storing to database: {1}")]
    Encode(String, String),

    /// Invalid, corrupted data was found in the database. This is a critical error.
    #[error("could not decode corrupted '{0}' value from database: {1}")]
    Decode(String, String),
}

#[cfg(test)]
mod tests {
    use sqlx::{Executor, query, query_as};

    use crate::config::StoreConfig;
    use crate::sqlite::{SqliteError, SqliteStoreBuilder};

    #[test]
    fn memory_databases_get_a_single_connection() {
        let config = |url: &str| StoreConfig::Sqlite {
            url: url.into(),
            max_connections: 16,
            create_database: true,
            run_migrations: true,
        };

        for url in ["sqlite::memory:", "sqlite://dbmem1?mode=memory&cache=private"] {
            let builder = SqliteStoreBuilder::from_config(&config(url)).unwrap();
            assert_eq!(builder.max_connections, 1);
        }

        let builder = SqliteStoreBuilder::from_config(&config("sqlite://prospector.db")).unwrap();
        assert_eq!(builder.max_connections, 16);
    }

    #[tokio::test]
    async fn failed_writes_roll_back() {
        let store = SqliteStoreBuilder::new()
            .run_default_migrations(false)
            .random_memory_url()
            .build()
            .await
            .unwrap();

        store
            .execute(async |pool| {
                pool.execute("CREATE TABLE test(x INTEGER)").await?;
                Ok(())
            })
            .await
            .unwrap();

        let result: Result<(), SqliteError> = store
            .write(async |tx| {
                query("INSERT INTO test (x) VALUES (5)")
                    .execute(&mut **tx)
                    .await?;
                Err(SqliteError::Decode("x".into(), "made up".into()))
            })
            .await;
        assert!(matches!(result, Err(SqliteError::Decode(_, _))));

        let count: (i64,) = store
            .execute(async |pool| {
                Ok(query_as::<_, (i64,)>("SELECT COUNT(*) FROM test")
                    .fetch_one(pool)
                    .await?)
            })
            .await
            .unwrap();
        assert_eq!(count.0, 0);

        store
            .write(async |tx| {
                query("INSERT INTO test (x) VALUES (7)")
                    .execute(&mut **tx)
                    .await?;
                Ok(())
            })
            .await
            .unwrap();

        let row: (i64,) = store
            .execute(async |pool| {
                Ok(query_as::<_, (i64,)>("SELECT x FROM test")
                    .fetch_one(pool)
                    .await?)
            })
            .await
            .unwrap();
        assert_eq!(row.0, 7);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let store = SqliteStoreBuilder::new()
            .random_memory_url()
            .build()
            .await
            .unwrap();

        let enabled: (i64,) = store
            .execute(async |pool| {
                Ok(query_as::<_, (i64,)>("PRAGMA foreign_keys")
                    .fetch_one(pool)
                    .await?)
            })
            .await
            .unwrap();
        assert_eq!(enabled.0, 1);
    }
}
