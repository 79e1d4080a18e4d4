// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{MemberRole, Timestamp, UserId, Workspace, WorkspaceId, WorkspaceMember};

use crate::memory::{MemoryStore, MemoryStoreError};
use crate::workspaces::WorkspaceStore;

impl WorkspaceStore for MemoryStore {
    async fn insert_workspace(&self, workspace: &Workspace) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| {
            if dataset.workspaces.contains_key(&workspace.id) {
                return false;
            }

            dataset.users.insert(workspace.owner.clone());
            dataset
                .workspaces
                .insert(workspace.id.clone(), workspace.clone());
            true
        })
    }

    async fn get_workspace(&self, id: &WorkspaceId) -> Result<Option<Workspace>, MemoryStoreError> {
        Ok(self.read_store().workspaces.get(id).cloned())
    }

    async fn workspaces_for_user(
        &self,
        user: &UserId,
        include_archived: bool,
    ) -> Result<Vec<Workspace>, MemoryStoreError> {
        let dataset = self.read_store();
        let result = dataset
            .workspaces
            .values()
            .filter(|workspace| include_archived || !workspace.is_archived())
            .filter(|workspace| {
                &workspace.owner == user || dataset.member_index(&workspace.id, user).is_some()
            })
            .cloned()
            .collect();
        Ok(result)
    }

    async fn set_workspace_archived(
        &self,
        id: &WorkspaceId,
        archived_at: Option<Timestamp>,
    ) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| match dataset.workspaces.get_mut(id) {
            Some(workspace) => {
                workspace.archived_at = archived_at;
                true
            }
            None => false,
        })
    }

    async fn delete_workspace(&self, id: &WorkspaceId) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| {
            if dataset.workspaces.remove(id).is_none() {
                return false;
            }

            // Cascade by hand, members and links must never outlive their workspace.
            dataset.members.retain(|member| &member.workspace_id != id);
            dataset.links.retain(|(workspace_id, _)| workspace_id != id);
            true
        })
    }

    async fn insert_member(&self, member: &WorkspaceMember) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| {
            let Some(workspace) = dataset.workspaces.get(&member.workspace_id) else {
                return false;
            };

            if workspace.owner == member.user_id
                || dataset
                    .member_index(&member.workspace_id, &member.user_id)
                    .is_some()
            {
                return false;
            }

            dataset.users.insert(member.user_id.clone());
            dataset.members.push(member.clone());
            true
        })
    }

    async fn get_member(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<Option<WorkspaceMember>, MemoryStoreError> {
        let dataset = self.read_store();
        Ok(dataset
            .member_index(workspace_id, user_id)
            .map(|index| dataset.members[index].clone()))
    }

    async fn update_member_role(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
        role: MemberRole,
    ) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| match dataset.member_index(workspace_id, user_id) {
            Some(index) => {
                dataset.members[index].role = role;
                true
            }
            None => false,
        })
    }

    async fn delete_member(
        &self,
        workspace_id: &WorkspaceId,
        user_id: &UserId,
    ) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| match dataset.member_index(workspace_id, user_id) {
            Some(index) => {
                dataset.members.remove(index);
                true
            }
            None => false,
        })
    }

    async fn members(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<WorkspaceMember>, MemoryStoreError> {
        let dataset = self.read_store();
        let mut result: Vec<WorkspaceMember> = dataset
            .members
            .iter()
            .filter(|member| &member.workspace_id == workspace_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(result)
    }
}
