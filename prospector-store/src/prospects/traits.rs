// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{Prospect, ProspectId, ProspectPatch, UserId};

use crate::Backend;

/// Interface for storing, patching and deleting prospects.
///
/// Prospects are addressed through their owner for everything which reads or changes the record
/// itself. Only `find_prospect_owner` looks across all owners.
pub trait ProspectStore: Backend {
    /// Inserts a prospect and registers its owner.
    ///
    /// Returns `true` when the insert occurred, or `false` when a prospect with the same id
    /// already exists for _any_ owner and nothing was inserted.
    fn insert_prospect(&self, prospect: &Prospect) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Returns the prospect if it exists _and_ is owned by the given user.
    fn get_prospect_owned_by(
        &self,
        owner: &UserId,
        id: &ProspectId,
    ) -> impl Future<Output = Result<Option<Prospect>, Self::Error>>;

    /// Finds the owner of a prospect, no matter who owns it.
    ///
    /// The relational backend answers this with one indexed lookup, the memory backend scans the
    /// prospects of every user. Both return the same owner for the same id, only at different
    /// cost.
    fn find_prospect_owner(
        &self,
        id: &ProspectId,
    ) -> impl Future<Output = Result<Option<UserId>, Self::Error>>;

    /// Returns all prospects of an owner, ordered by id.
    fn prospects_owned_by(
        &self,
        owner: &UserId,
    ) -> impl Future<Output = Result<Vec<Prospect>, Self::Error>>;

    /// Applies a patch to the owner-scoped prospect and bumps its `updated_at` timestamp.
    ///
    /// Either the whole patch is applied or nothing. Returns the updated prospect or `None` if the
    /// owner has no prospect with this id. The owner itself is never changed.
    fn apply_prospect_patch(
        &self,
        owner: &UserId,
        id: &ProspectId,
        patch: &ProspectPatch,
    ) -> impl Future<Output = Result<Option<Prospect>, Self::Error>>;

    /// Deletes the owner-scoped prospect together with all workspace links referencing it.
    ///
    /// Returns `true` when the removal occurred and `false` when the owner has no such prospect.
    fn delete_prospect(
        &self,
        owner: &UserId,
        id: &ProspectId,
    ) -> impl Future<Output = Result<bool, Self::Error>>;
}
