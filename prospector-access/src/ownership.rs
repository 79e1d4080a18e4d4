// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{ProspectId, Role, UserId};
use prospector_store::ResourceStore;
use tracing::{debug, trace};

use crate::{AccessControl, AccessError, AccessResult, ActivityListener};

impl<S, L> AccessControl<S, L>
where
    S: ResourceStore,
    L: ActivityListener,
{
    /// Returns the owner of a prospect or `None` if no user owns a prospect with this id.
    ///
    /// Prospects are stored per owner, the answer does not depend on who is asking.
    pub async fn find_owner_of(&self, prospect_id: &ProspectId) -> AccessResult<Option<UserId>, S> {
        let owner = self
            .store
            .find_prospect_owner(prospect_id)
            .await
            .map_err(AccessError::Store)?;
        trace!(%prospect_id, ?owner, "looked up prospect owner");
        Ok(owner)
    }

    /// Returns the highest role the caller holds on any workspace the prospect is linked into.
    ///
    /// Workspaces are resolved one by one and the search stops as soon as `enough` is reached.
    /// Owning a workspace does not make anybody the owner of the prospects linked into it, the
    /// result is capped at `Role::Editor`.
    pub(crate) async fn linked_role(
        &self,
        caller: &UserId,
        prospect_id: &ProspectId,
        enough: Role,
    ) -> AccessResult<Role, S> {
        let workspaces = self
            .store
            .linked_workspaces(prospect_id)
            .await
            .map_err(AccessError::Store)?;

        let mut best = Role::None;
        for workspace_id in &workspaces {
            let role = self.resolve_role(caller, workspace_id).await?.min(Role::Editor);
            best = best.max(role);
            if best >= enough {
                break;
            }
        }

        debug!(
            %caller,
            %prospect_id,
            workspaces = workspaces.len(),
            role = %best,
            "resolved role through linked workspaces"
        );
        Ok(best)
    }
}
