// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::UserId;

use crate::Backend;

/// Interface for registering users.
///
/// Users carry no state besides their identifier. Storing them explicitly gives the relational
/// backend something to point its foreign keys at. Inserting prospects, workspaces or members
/// registers the referenced users implicitly on both backends.
pub trait UserStore: Backend {
    /// Registers a user.
    ///
    /// Returns `true` when the user was inserted and `false` if it was already known.
    fn insert_user(&self, id: &UserId) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Returns `true` if the user is known to the store.
    fn has_user(&self, id: &UserId) -> impl Future<Output = Result<bool, Self::Error>>;
}
