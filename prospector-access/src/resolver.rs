// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role resolution and the guards built on top of it.
use prospector_core::{Role, UserId, WorkspaceId};
use prospector_store::ResourceStore;
use tracing::debug;

use crate::{AccessControl, AccessError, AccessResult, ActivityListener, Resource};

impl<S, L> AccessControl<S, L>
where
    S: ResourceStore,
    L: ActivityListener,
{
    /// Returns the role of a user within a workspace.
    ///
    /// The workspace owner always resolves to `Role::Owner`, regardless of any member rows.
    /// Members resolve to the role of their row and everybody else, including callers asking for
    /// a workspace which does not exist, to `Role::None`.
    pub async fn resolve_role(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
    ) -> AccessResult<Role, S> {
        let Some(workspace) = self
            .store
            .get_workspace(workspace_id)
            .await
            .map_err(AccessError::Store)?
        else {
            debug!(%caller, %workspace_id, "workspace unknown, resolved no role");
            return Ok(Role::None);
        };

        let role = if &workspace.owner == caller {
            Role::Owner
        } else {
            self.store
                .get_member(workspace_id, caller)
                .await
                .map_err(AccessError::Store)?
                .map(|member| Role::from(member.role))
                .unwrap_or(Role::None)
        };

        debug!(%caller, %workspace_id, %role, "resolved workspace role");
        Ok(role)
    }

    /// Succeeds with the resolved role if the caller may at least view the workspace.
    pub async fn require_view(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
    ) -> AccessResult<Role, S> {
        self.require(caller, workspace_id, Role::Viewer).await
    }

    /// Succeeds with the resolved role if the caller may edit the workspace.
    pub async fn require_edit(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
    ) -> AccessResult<Role, S> {
        self.require(caller, workspace_id, Role::Editor).await
    }

    /// Succeeds if the caller owns the workspace.
    pub async fn require_owner(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
    ) -> AccessResult<Role, S> {
        self.require(caller, workspace_id, Role::Owner).await
    }

    async fn require(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
        required: Role,
    ) -> AccessResult<Role, S> {
        let actual = self.resolve_role(caller, workspace_id).await?;
        if actual >= required {
            return Ok(actual);
        }

        debug!(%caller, %workspace_id, %required, %actual, "denied workspace access");
        Err(AccessError::Forbidden {
            caller: caller.clone(),
            resource: Resource::Workspace(workspace_id.clone()),
            required,
            actual,
        })
    }
}
