// SPDX-License-Identifier: MIT OR Apache-2.0

//! `WorkspaceStore` trait for shared workspaces and the roles granted on them.
#[cfg(feature = "memory")]
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;
mod traits;

pub use traits::WorkspaceStore;
