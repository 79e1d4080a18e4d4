// SPDX-License-Identifier: MIT OR Apache-2.0

//! `LinkStore` trait for the many-to-many association between workspaces and prospects.
#[cfg(feature = "memory")]
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(test)]
mod tests;
mod traits;

pub use traits::LinkStore;
