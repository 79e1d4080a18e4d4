// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reads and writes of prospects on behalf of a caller.
use prospector_core::{Prospect, ProspectId, ProspectPatch, ProspectPayload, Role, UserId};
use prospector_store::ResourceStore;
use tracing::debug;

use crate::{AccessControl, AccessError, AccessResult, Activity, ActivityListener, Resource};

impl<S, L> AccessControl<S, L>
where
    S: ResourceStore,
    L: ActivityListener,
{
    /// Creates a prospect owned by the caller.
    ///
    /// Prospect ids are unique across all owners, reusing one fails with a conflict.
    pub async fn create_prospect(
        &self,
        caller: &UserId,
        prospect_id: ProspectId,
        payload: ProspectPayload,
    ) -> AccessResult<Prospect, S> {
        let prospect = Prospect::new(prospect_id, caller.clone(), payload);
        let inserted = self
            .store
            .insert_prospect(&prospect)
            .await
            .map_err(AccessError::Store)?;

        if !inserted {
            return Err(AccessError::Conflict(
                Resource::Prospect(prospect.id),
                "id is already taken",
            ));
        }

        debug!(%caller, prospect_id = %prospect.id, "created prospect");
        self.notify(Activity::ProspectCreated {
            caller: caller.clone(),
            prospect_id: prospect.id.clone(),
        });
        Ok(prospect)
    }

    /// Returns all prospects the caller owns, ordered by id.
    pub async fn prospects(&self, caller: &UserId) -> AccessResult<Vec<Prospect>, S> {
        self.store
            .prospects_owned_by(caller)
            .await
            .map_err(AccessError::Store)
    }

    /// Returns a prospect the caller owns or may view through any workspace it is linked into.
    pub async fn prospect(
        &self,
        caller: &UserId,
        prospect_id: &ProspectId,
    ) -> AccessResult<Prospect, S> {
        if let Some(prospect) = self
            .store
            .get_prospect_owned_by(caller, prospect_id)
            .await
            .map_err(AccessError::Store)?
        {
            return Ok(prospect);
        }

        let Some(owner) = self.find_owner_of(prospect_id).await? else {
            return Err(AccessError::NotFound(Resource::Prospect(prospect_id.clone())));
        };

        let role = self.linked_role(caller, prospect_id, Role::Viewer).await?;
        if !role.can_view() {
            return Err(forbidden(caller, prospect_id, Role::Viewer, role));
        }

        self.store
            .get_prospect_owned_by(&owner, prospect_id)
            .await
            .map_err(AccessError::Store)?
            .ok_or_else(|| AccessError::NotFound(Resource::Prospect(prospect_id.clone())))
    }

    /// Applies a patch to a prospect, either owned by the caller or shared with them.
    ///
    /// The caller's own prospects are patched directly. Otherwise the true owner is looked up and
    /// the change is permitted if _any_ workspace the prospect is linked into grants the caller
    /// edit access. The patch is always applied to the owner's record, ownership never changes.
    ///
    /// A prospect which exists but is not shared with the caller is reported as forbidden and
    /// left untouched.
    pub async fn update_prospect(
        &self,
        caller: &UserId,
        prospect_id: &ProspectId,
        patch: &ProspectPatch,
    ) -> AccessResult<Prospect, S> {
        let owned = self
            .store
            .get_prospect_owned_by(caller, prospect_id)
            .await
            .map_err(AccessError::Store)?
            .is_some();

        let owner = if owned {
            caller.clone()
        } else {
            let Some(owner) = self.find_owner_of(prospect_id).await? else {
                debug!(%caller, %prospect_id, "prospect to update does not exist");
                return Err(AccessError::NotFound(Resource::Prospect(prospect_id.clone())));
            };

            let role = self.linked_role(caller, prospect_id, Role::Editor).await?;
            if !role.can_edit() {
                debug!(%caller, %prospect_id, %owner, %role, "denied prospect update");
                return Err(forbidden(caller, prospect_id, Role::Editor, role));
            }

            owner
        };

        // The prospect might have been removed since it was looked up.
        let Some(updated) = self
            .store
            .apply_prospect_patch(&owner, prospect_id, patch)
            .await
            .map_err(AccessError::Store)?
        else {
            return Err(AccessError::NotFound(Resource::Prospect(prospect_id.clone())));
        };

        debug!(%caller, %prospect_id, %owner, "updated prospect");
        self.notify(Activity::ProspectUpdated {
            caller: caller.clone(),
            owner,
            prospect_id: prospect_id.clone(),
        });
        Ok(updated)
    }

    /// Deletes a prospect of the caller together with all links to it.
    ///
    /// Only the owner may delete a prospect, sharing never grants this.
    pub async fn delete_prospect(
        &self,
        caller: &UserId,
        prospect_id: &ProspectId,
    ) -> AccessResult<(), S> {
        let removed = self
            .store
            .delete_prospect(caller, prospect_id)
            .await
            .map_err(AccessError::Store)?;
        if removed {
            debug!(%caller, %prospect_id, "deleted prospect");
            return Ok(());
        }

        if self.find_owner_of(prospect_id).await?.is_none() {
            return Err(AccessError::NotFound(Resource::Prospect(prospect_id.clone())));
        }

        let role = self.linked_role(caller, prospect_id, Role::Editor).await?;
        debug!(%caller, %prospect_id, %role, "denied prospect deletion");
        Err(forbidden(caller, prospect_id, Role::Owner, role))
    }
}

fn forbidden<E>(
    caller: &UserId,
    prospect_id: &ProspectId,
    required: Role,
    actual: Role,
) -> AccessError<E> {
    AccessError::Forbidden {
        caller: caller.clone(),
        resource: Resource::Prospect(prospect_id.clone()),
        required,
        actual,
    }
}
