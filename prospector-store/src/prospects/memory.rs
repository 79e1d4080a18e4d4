// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{Prospect, ProspectId, ProspectPatch, UserId, current_timestamp};

use crate::memory::{MemoryStore, MemoryStoreError};
use crate::prospects::ProspectStore;

impl ProspectStore for MemoryStore {
    async fn insert_prospect(&self, prospect: &Prospect) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| {
            // Ids are unique across owners, just like the primary key of the relational backend.
            if dataset.find_prospect(&prospect.id).is_some() {
                return false;
            }

            dataset.users.insert(prospect.owner.clone());
            dataset
                .prospects
                .entry(prospect.owner.clone())
                .or_default()
                .insert(prospect.id.clone(), prospect.clone());
            true
        })
    }

    async fn get_prospect_owned_by(
        &self,
        owner: &UserId,
        id: &ProspectId,
    ) -> Result<Option<Prospect>, MemoryStoreError> {
        let dataset = self.read_store();
        Ok(dataset
            .prospects
            .get(owner)
            .and_then(|prospects| prospects.get(id))
            .cloned())
    }

    async fn find_prospect_owner(&self, id: &ProspectId) -> Result<Option<UserId>, MemoryStoreError> {
        let dataset = self.read_store();
        Ok(dataset.find_prospect(id).map(|prospect| prospect.owner.clone()))
    }

    async fn prospects_owned_by(&self, owner: &UserId) -> Result<Vec<Prospect>, MemoryStoreError> {
        let dataset = self.read_store();
        Ok(dataset
            .prospects
            .get(owner)
            .map(|prospects| prospects.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn apply_prospect_patch(
        &self,
        owner: &UserId,
        id: &ProspectId,
        patch: &ProspectPatch,
    ) -> Result<Option<Prospect>, MemoryStoreError> {
        self.write(|dataset| {
            let prospect = dataset
                .prospects
                .get_mut(owner)
                .and_then(|prospects| prospects.get_mut(id))?;
            patch.apply_to(&mut prospect.payload);
            prospect.updated_at = current_timestamp();
            Some(prospect.clone())
        })
    }

    async fn delete_prospect(&self, owner: &UserId, id: &ProspectId) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| {
            let removed = dataset
                .prospects
                .get_mut(owner)
                .and_then(|prospects| prospects.remove(id))
                .is_some();

            // Sweep links within the same write, there is no cascade doing this for us.
            if removed {
                dataset.links.retain(|(_, prospect_id)| prospect_id != id);
            }

            removed
        })
    }
}
