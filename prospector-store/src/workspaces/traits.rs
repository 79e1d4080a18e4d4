// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{MemberRole, Timestamp, UserId, Workspace, WorkspaceId, WorkspaceMember};

use crate::Backend;

/// Interface for storing workspaces and their members.
///
/// The owner of a workspace is a property of the workspace itself and never appears as a member.
/// Both backends refuse to insert a member row for the owner.
pub trait WorkspaceStore: Backend {
    /// Inserts a workspace and registers its owner.
    ///
    /// Returns `false` if a workspace with the same id already exists.
    fn insert_workspace(
        &self,
        workspace: &Workspace,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Returns the workspace or `None` if it does not exist.
    fn get_workspace(
        &self,
        id: &WorkspaceId,
    ) -> impl Future<Output = Result<Option<Workspace>, Self::Error>>;

    /// Returns all workspaces the user owns or is a member of, ordered by id.
    ///
    /// Archived workspaces are only included when `include_archived` is set.
    fn workspaces_for_user(
        &self,
        user: &UserId,
        include_archived: bool,
    ) -> impl Future<Output = Result<Vec<Workspace>, Self::Error>>;

    /// Archives (`Some`) or restores (`None`) a workspace.
    ///
    /// Returns `false` if the workspace does not exist.
    fn set_workspace_archived(
        &self,
        id: &WorkspaceId,
        archived_at: Option<Timestamp>,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Deletes a workspace together with all of its members and links.
    ///
    /// Returns `false` if the workspace does not exist.
    fn delete_workspace(&self, id: &WorkspaceId) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Inserts a member row and registers the user.
    ///
    /// Returns `false` and inserts nothing when the workspace does not exist, the user is its
    /// owner or already a member.
    fn insert_member(
        &self,
        member: &WorkspaceMember,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Returns the member row of a user in a workspace.
    fn get_member(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Option<WorkspaceMember>, Self::Error>>;

    /// Changes the role of an existing member.
    ///
    /// Returns `false` if there is no such member.
    fn update_member_role(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
        role: MemberRole,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Removes a member row.
    ///
    /// Returns `false` if there is no such member.
    fn delete_member(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Returns all members of a workspace, ordered by user id.
    fn members(
        &self,
        workspace_id: &WorkspaceId,
    ) -> impl Future<Output = Result<Vec<WorkspaceMember>, Self::Error>>;
}
