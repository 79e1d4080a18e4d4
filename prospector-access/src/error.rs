// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use prospector_core::{ProspectId, Role, UserId, WorkspaceId};
use prospector_store::Backend;
use thiserror::Error;

/// Resource an operation was refused on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    Workspace(WorkspaceId),
    Prospect(ProspectId),
    Member(WorkspaceId, UserId),
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Workspace(id) => write!(f, "workspace '{}'", id),
            Resource::Prospect(id) => write!(f, "prospect '{}'", id),
            Resource::Member(workspace_id, user_id) => {
                write!(f, "member '{}' of workspace '{}'", user_id, workspace_id)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum AccessError<E> {
    /// The referenced resource does not exist.
    #[error("{0} not found")]
    NotFound(Resource),

    /// The resource exists but the caller's role is not sufficient.
    ///
    /// Workspaces which do not exist resolve to `Role::None` and are reported here as well, so
    /// callers without access learn nothing about their existence.
    #[error("{caller} requires {required} access on {resource} but holds {actual}")]
    Forbidden {
        caller: UserId,
        resource: Resource,
        required: Role,
        actual: Role,
    },

    /// The operation would violate a uniqueness rule, like adding a member twice.
    #[error("{0} conflicts with existing state: {1}")]
    Conflict(Resource, &'static str),

    /// Error of the storage backend, passed on unchanged and never retried.
    #[error("store error: {0}")]
    Store(#[source] E),
}

impl<E> AccessError<E> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccessError::NotFound(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, AccessError::Forbidden { .. })
    }
}

pub type AccessResult<T, S> = Result<T, AccessError<<S as Backend>::Error>>;
