// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{ProspectId, WorkspaceId};

use crate::Backend;

/// Interface for linking prospects into workspaces.
///
/// A workspace-prospect pair exists at most once. Links never outlive either side: deleting a
/// workspace or a prospect removes all links referencing it.
pub trait LinkStore: Backend {
    /// Links a prospect into a workspace.
    ///
    /// Returns `true` when a link was inserted. Linking an already linked pair is not an error and
    /// returns `false`, as does linking a workspace or prospect which does not exist.
    fn upsert_link(
        &self,
        workspace_id: &WorkspaceId,
        prospect_id: &ProspectId,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Removes a link.
    ///
    /// Returns `true` when the removal occurred and `false` when the pair was never linked.
    fn delete_link(
        &self,
        workspace_id: &WorkspaceId,
        prospect_id: &ProspectId,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Returns the ids of all workspaces the prospect is linked into, ordered by id.
    ///
    /// This covers every workspace in the store, no matter who created the link.
    fn linked_workspaces(
        &self,
        prospect_id: &ProspectId,
    ) -> impl Future<Output = Result<Vec<WorkspaceId>, Self::Error>>;

    /// Returns the ids of all prospects linked into the workspace, ordered by id.
    fn linked_prospects(
        &self,
        workspace_id: &WorkspaceId,
    ) -> impl Future<Output = Result<Vec<ProspectId>, Self::Error>>;
}
