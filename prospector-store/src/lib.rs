// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence for users, prospects, workspaces, workspace members and workspace-prospect links.
//!
//! Every concern is expressed as its own trait (`UserStore`, `ProspectStore`, `WorkspaceStore`,
//! `LinkStore`) and implemented by two backends with identical observable behaviour:
//!
//! - `SqliteStore`: relational, referential integrity and cascades are declared in the schema and
//!   owner lookups are indexed.
//! - `MemoryStore`: process-local, optionally persisted to a file. It has no foreign keys, so
//!   cascades are explicit sweeps and owner lookups scan the prospects of every user.
pub mod config;
pub mod links;
#[cfg(feature = "memory")]
pub mod memory;
pub mod prospects;
#[cfg(feature = "sqlite")]
pub mod sqlite;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
mod traits;
pub mod users;
pub mod workspaces;

pub use config::StoreConfig;
pub use links::LinkStore;
#[cfg(feature = "memory")]
pub use memory::{MemoryStore, MemoryStoreBuilder, MemoryStoreError};
pub use prospects::ProspectStore;
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteError, SqliteStore, SqliteStoreBuilder};
pub use traits::{Backend, ResourceStore};
pub use users::UserStore;
pub use workspaces::WorkspaceStore;
