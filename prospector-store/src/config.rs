// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Selects and configures a store backend.
///
/// ```json
/// { "backend": "sqlite", "url": "sqlite://prospector.db" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process-local store, persisted to `path` when given.
    Memory {
        #[serde(default)]
        path: Option<PathBuf>,
    },

    /// Relational store on top of SQLite.
    ///
    /// In-memory databases (`sqlite::memory:`) are always opened with a single connection, as
    /// each further connection would see a separate, unmigrated database.
    Sqlite {
        url: String,

        #[serde(default = "default_max_connections")]
        max_connections: u32,

        #[serde(default = "default_true")]
        create_database: bool,

        #[serde(default = "default_true")]
        run_migrations: bool,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Memory { path: None }
    }
}

fn default_max_connections() -> u32 {
    16
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use assert_matches::assert_matches;
    use prospector_core::{UserId, Workspace, WorkspaceId};

    use crate::config::StoreConfig;
    use crate::memory::MemoryStoreBuilder;
    use crate::sqlite::SqliteStoreBuilder;
    use crate::workspaces::WorkspaceStore;

    #[test]
    fn sqlite_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{ "backend": "sqlite", "url": "sqlite://prospector.db" }"#)
                .unwrap();

        assert_eq!(
            config,
            StoreConfig::Sqlite {
                url: "sqlite://prospector.db".into(),
                max_connections: 16,
                create_database: true,
                run_migrations: true,
            }
        );
        assert!(SqliteStoreBuilder::from_config(&config).is_some());
        assert!(MemoryStoreBuilder::from_config(&config).is_none());
    }

    #[test]
    fn memory_with_path() {
        let config: StoreConfig =
            serde_json::from_str(r#"{ "backend": "memory", "path": "/var/lib/prospector.cbor" }"#)
                .unwrap();

        assert_eq!(
            config,
            StoreConfig::Memory {
                path: Some(PathBuf::from("/var/lib/prospector.cbor")),
            }
        );
        assert!(MemoryStoreBuilder::from_config(&config).is_some());
    }

    #[test]
    fn unknown_backend() {
        assert!(serde_json::from_str::<StoreConfig>(r#"{ "backend": "postgres" }"#).is_err());
    }

    #[tokio::test]
    async fn build_from_config() {
        let config = StoreConfig::Sqlite {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            create_database: true,
            run_migrations: true,
        };
        let store = SqliteStoreBuilder::from_config(&config)
            .unwrap()
            .build()
            .await;
        assert!(store.is_ok());

        let store = MemoryStoreBuilder::from_config(&StoreConfig::default())
            .unwrap()
            .build()
            .unwrap();
        assert!(store.path().is_none());
    }

    #[tokio::test]
    async fn in_memory_sqlite_uses_one_connection() {
        let config: StoreConfig =
            serde_json::from_str(r#"{ "backend": "sqlite", "url": "sqlite::memory:" }"#).unwrap();
        assert_matches!(
            config,
            StoreConfig::Sqlite {
                max_connections: 16,
                ..
            }
        );

        let store = SqliteStoreBuilder::from_config(&config)
            .unwrap()
            .build()
            .await
            .unwrap();

        // All reads and writes hit the one migrated database.
        for id in ["w1", "w2", "w3"] {
            let workspace = Workspace::new(WorkspaceId::from(id), UserId::from("alice"), id);
            assert!(store.insert_workspace(&workspace).await.unwrap());
            assert!(store.get_workspace(&workspace.id).await.unwrap().is_some());
        }
    }
}
