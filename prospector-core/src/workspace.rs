// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{MemberRole, Timestamp, UserId, WorkspaceId, current_timestamp};

/// Shared container grouping prospects of possibly many owners.
///
/// A workspace has exactly one owner which is set on creation and can not be transferred.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub owner: UserId,
    pub name: String,
    pub created_at: Timestamp,
    pub archived_at: Option<Timestamp>,
}

impl Workspace {
    pub fn new(id: WorkspaceId, owner: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            created_at: current_timestamp(),
            archived_at: None,
        }
    }

    /// Archived workspaces are excluded from default listings but keep all members and links.
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Role granted to a non-owner user on a workspace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMember {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub role: MemberRole,
}

impl WorkspaceMember {
    pub fn new(workspace_id: WorkspaceId, user_id: UserId, role: MemberRole) -> Self {
        Self {
            workspace_id,
            user_id,
            role,
        }
    }
}
