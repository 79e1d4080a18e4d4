// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{Prospect, ProspectId, UserId, WorkspaceId};
use prospector_store::ResourceStore;
use tracing::{debug, trace};

use crate::{AccessControl, AccessError, AccessResult, Activity, ActivityListener, Resource};

impl<S, L> AccessControl<S, L>
where
    S: ResourceStore,
    L: ActivityListener,
{
    /// Shares a prospect through a workspace the caller may edit.
    ///
    /// Linking is idempotent, linking the same pair again succeeds without any effect. The caller
    /// does not need to own the prospect.
    pub async fn link(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
        prospect_id: &ProspectId,
    ) -> AccessResult<(), S> {
        self.require_edit(caller, workspace_id).await?;

        if self.find_owner_of(prospect_id).await?.is_none() {
            return Err(AccessError::NotFound(Resource::Prospect(prospect_id.clone())));
        }

        let inserted = self
            .store
            .upsert_link(workspace_id, prospect_id)
            .await
            .map_err(AccessError::Store)?;

        if inserted {
            debug!(%caller, %workspace_id, %prospect_id, "linked prospect");
            self.notify(Activity::ProspectLinked {
                caller: caller.clone(),
                workspace_id: workspace_id.clone(),
                prospect_id: prospect_id.clone(),
            });
        } else {
            trace!(%workspace_id, %prospect_id, "prospect was already linked");
        }

        Ok(())
    }

    /// Removes a prospect from a workspace the caller may edit.
    ///
    /// Returns `false` if the pair was not linked.
    pub async fn unlink(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
        prospect_id: &ProspectId,
    ) -> AccessResult<bool, S> {
        self.require_edit(caller, workspace_id).await?;

        let removed = self
            .store
            .delete_link(workspace_id, prospect_id)
            .await
            .map_err(AccessError::Store)?;
        debug!(%caller, %workspace_id, %prospect_id, removed, "unlinked prospect");
        Ok(removed)
    }

    /// Returns all prospects linked into a workspace the caller may view, ordered by id.
    ///
    /// Prospects of every owner are included.
    pub async fn linked_prospects(
        &self,
        caller: &UserId,
        workspace_id: &WorkspaceId,
    ) -> AccessResult<Vec<Prospect>, S> {
        self.require_view(caller, workspace_id).await?;

        let ids = self
            .store
            .linked_prospects(workspace_id)
            .await
            .map_err(AccessError::Store)?;

        let mut prospects = Vec::with_capacity(ids.len());
        for prospect_id in &ids {
            let Some(owner) = self.find_owner_of(prospect_id).await? else {
                continue;
            };
            if let Some(prospect) = self
                .store
                .get_prospect_owned_by(&owner, prospect_id)
                .await
                .map_err(AccessError::Store)?
            {
                prospects.push(prospect);
            }
        }

        Ok(prospects)
    }
}
