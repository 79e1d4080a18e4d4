// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ProspectStore` trait for owner-scoped prospect records and the cross-owner lookup used to
//! resolve who owns a prospect.
#[cfg(feature = "memory")]
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(test)]
mod tests;
mod traits;

pub use traits::ProspectStore;
