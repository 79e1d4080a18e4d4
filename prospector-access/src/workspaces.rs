// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workspace life cycle and membership management.
use prospector_core::{
    MemberRole, Role, UserId, Workspace, WorkspaceId, WorkspaceMember, current_timestamp,
};
use prospector_store::ResourceStore;
use tracing::debug;

use crate::{AccessControl, AccessError, AccessResult, ActivityListener, Resource};

impl<S, L> AccessControl<S, L>
where
    S: ResourceStore,
    L: ActivityListener,
{
    /// Creates a workspace owned by the caller.
    pub async fn create_workspace(
        &self,
        caller: &UserId,
        workspace_id: WorkspaceId,
        name: impl Into<String>,
    ) -> AccessResult<Workspace, S> {
        let workspace = Workspace::new(workspace_id, caller.clone(), name);
        let inserted = self
            .store
            .insert_workspace(&workspace)
            .await
            .map_err(AccessError::Store)?;

        if !inserted {
            return Err(AccessError::Conflict(
                Resource::Workspace(workspace.id),
                "id is already taken",
            ));
        }

        debug!(%caller, workspace_id = %workspace.id, "created workspace");
        Ok(workspace)
    }

    /// Returns all workspaces the caller owns or is a member of, together with their role.
    pub async fn workspaces(
        &self,
        caller: &UserId,
        include_archived: bool,
    ) -> AccessResult<Vec<(Workspace, Role)>, S> {
        let workspaces = self
            .store
            .workspaces_for_user(caller, include_archived)
            .await
            .map_err(AccessError::Store)?;

        let mut result = Vec::with_capacity(workspaces.len());
        for workspace in workspaces {
            let role = self.resolve_role(caller, &workspace.id).await?;
            result.push((workspace, role));
        }
        Ok(result)
    }

    /// Hides a workspace from default listings. Roles and links stay in effect.
    pub async fn archive_workspace(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
    ) -> AccessResult<(), S> {
        self.require_owner(caller, workspace_id).await?;
        self.set_archived(workspace_id, Some(current_timestamp()))
            .await
    }

    pub async fn unarchive_workspace(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
    ) -> AccessResult<(), S> {
        self.require_owner(caller, workspace_id).await?;
        self.set_archived(workspace_id, None).await
    }

    async fn set_archived(
        &self,
        workspace_id: &WorkspaceId,
        archived_at: Option<u64>,
    ) -> AccessResult<(), S> {
        let updated = self
            .store
            .set_workspace_archived(workspace_id, archived_at)
            .await
            .map_err(AccessError::Store)?;
        if !updated {
            return Err(AccessError::NotFound(Resource::Workspace(
                workspace_id.clone(),
            )));
        }

        debug!(%workspace_id, archived = archived_at.is_some(), "changed workspace archive state");
        Ok(())
    }

    /// Deletes a workspace with all its members and links. Linked prospects stay with their
    /// owners.
    pub async fn delete_workspace(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
    ) -> AccessResult<(), S> {
        self.require_owner(caller, workspace_id).await?;

        let removed = self
            .store
            .delete_workspace(workspace_id)
            .await
            .map_err(AccessError::Store)?;
        if !removed {
            return Err(AccessError::NotFound(Resource::Workspace(
                workspace_id.clone(),
            )));
        }

        debug!(%caller, %workspace_id, "deleted workspace");
        Ok(())
    }

    /// Grants a user a role in a workspace owned by the caller.
    pub async fn add_member(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
        role: MemberRole,
    ) -> AccessResult<WorkspaceMember, S> {
        self.require_owner(caller, workspace_id).await?;

        let resource = || Resource::Member(workspace_id.clone(), user_id.clone());
        if user_id == caller {
            return Err(AccessError::Conflict(
                resource(),
                "the owner can not become a member",
            ));
        }

        let member = WorkspaceMember::new(workspace_id.clone(), user_id.clone(), role);
        let inserted = self
            .store
            .insert_member(&member)
            .await
            .map_err(AccessError::Store)?;
        if !inserted {
            return Err(AccessError::Conflict(resource(), "user is already a member"));
        }

        debug!(%caller, %workspace_id, %user_id, %role, "added member");
        Ok(member)
    }

    /// Changes the role of a member.
    ///
    /// Only `Role::Viewer` and `Role::Editor` can be granted to members. Asking for `Role::Owner`
    /// or `Role::None` changes nothing and returns `false`, ownership is not transferable and
    /// members are removed with `remove_member`.
    pub async fn set_member_role(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
        role: Role,
    ) -> AccessResult<bool, S> {
        self.require_owner(caller, workspace_id).await?;

        let Ok(role) = MemberRole::try_from(role) else {
            debug!(%workspace_id, %user_id, %role, "ignored role which can not be granted");
            return Ok(false);
        };

        let updated = self
            .store
            .update_member_role(workspace_id, user_id, role)
            .await
            .map_err(AccessError::Store)?;
        if !updated {
            return Err(AccessError::NotFound(Resource::Member(
                workspace_id.clone(),
                user_id.clone(),
            )));
        }

        debug!(%caller, %workspace_id, %user_id, %role, "changed member role");
        Ok(true)
    }

    /// Revokes the membership of a user. Takes effect with the next resolved role.
    ///
    /// Returns `false` if the user was not a member, which is always the case for the owner.
    pub async fn remove_member(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> AccessResult<bool, S> {
        self.require_owner(caller, workspace_id).await?;

        let removed = self
            .store
            .delete_member(workspace_id, user_id)
            .await
            .map_err(AccessError::Store)?;
        debug!(%caller, %workspace_id, %user_id, removed, "removed member");
        Ok(removed)
    }

    /// Returns the members of a workspace the caller may view, ordered by user id.
    ///
    /// The owner is not a member and not part of the list.
    pub async fn members(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
    ) -> AccessResult<Vec<WorkspaceMember>, S> {
        self.require_view(caller, workspace_id).await?;
        self.store
            .members(workspace_id)
            .await
            .map_err(AccessError::Store)
    }
}
