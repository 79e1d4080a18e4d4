// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data-types shared by the prospector store and access-control crates.
//!
//! A [`Prospect`] is privately owned by exactly one user and can only be shared indirectly, by
//! linking it into a [`Workspace`] whose owner grants [`MemberRole`]s to other users.
mod identity;
mod prospect;
mod role;
mod workspace;

pub use identity::{ProspectId, UserId, WorkspaceId};
pub use prospect::{Prospect, ProspectPatch, ProspectPayload};
pub use role::{MemberRole, Role, RoleError};
pub use workspace::{Workspace, WorkspaceMember};

/// UNIX timestamp in seconds.
pub type Timestamp = u64;

/// Returns the current UNIX timestamp in seconds.
pub fn current_timestamp() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default()
}
