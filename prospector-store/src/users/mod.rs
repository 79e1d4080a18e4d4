// SPDX-License-Identifier: MIT OR Apache-2.0

//! `UserStore` trait for registering caller identities.
#[cfg(feature = "memory")]
mod memory;
#[cfg(feature = "sqlite")]
pub(crate) mod sqlite;
#[cfg(test)]
mod tests;
mod traits;

pub use traits::UserStore;
