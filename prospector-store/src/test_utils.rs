// SPDX-License-Identifier: MIT OR Apache-2.0

/// Installs a `tracing` subscriber when `RUST_LOG` is set, to inspect logs of failing tests.
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Macro to run the same test logic against all store backend implementations.
///
/// This macro takes a closure that will be executed against each store type:
/// - In-memory store (`MemoryStore`)
/// - SQLite store (`SqliteStore`)
///
/// ## Example
///
/// ```rust
/// # use prospector_core::UserId;
/// # use prospector_store::UserStore;
/// # use prospector_store::assert_all_stores;
/// # async fn run() {
/// assert_all_stores!(|store| async {
///     assert!(store.insert_user(&UserId::from("alice")).await.unwrap());
///     assert!(store.has_user(&UserId::from("alice")).await.unwrap());
/// });
/// # }
/// ```
#[macro_export]
macro_rules! assert_all_stores {
    (|$store:ident| $test_body:expr) => {
        $crate::test_utils::setup_logging();

        // Test with MemoryStore.
        {
            let $store = $crate::memory::MemoryStore::default();
            $test_body.await;
        }

        // Test with SqliteStore.
        {
            let $store = $crate::sqlite::SqliteStore::temporary().await;
            $test_body.await;
        }
    };
}
