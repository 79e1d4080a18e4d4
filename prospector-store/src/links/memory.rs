// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::{ProspectId, WorkspaceId};

use crate::links::LinkStore;
use crate::memory::{MemoryStore, MemoryStoreError};

impl LinkStore for MemoryStore {
    async fn upsert_link(
        &self,
        workspace_id: &WorkspaceId,
        prospect_id: &ProspectId,
    ) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| {
            if !dataset.workspaces.contains_key(workspace_id)
                || dataset.find_prospect(prospect_id).is_none()
                || dataset.has_link(workspace_id, prospect_id)
            {
                return false;
            }

            dataset
                .links
                .push((workspace_id.clone(), prospect_id.clone()));
            true
        })
    }

    async fn delete_link(
        &self,
        workspace_id: &WorkspaceId,
        prospect_id: &ProspectId,
    ) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| {
            let before = dataset.links.len();
            dataset
                .links
                .retain(|(w, p)| !(w == workspace_id && p == prospect_id));
            dataset.links.len() < before
        })
    }

    async fn linked_workspaces(
        &self,
        prospect_id: &ProspectId,
    ) -> Result<Vec<WorkspaceId>, MemoryStoreError> {
        let dataset = self.read_store();
        let mut result: Vec<WorkspaceId> = dataset
            .links
            .iter()
            .filter(|(_, p)| p == prospect_id)
            .map(|(w, _)| w.clone())
            .collect();
        result.sort();
        Ok(result)
    }

    async fn linked_prospects(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<ProspectId>, MemoryStoreError> {
        let dataset = self.read_store();
        let mut result: Vec<ProspectId> = dataset
            .links
            .iter()
            .filter(|(w, _)| w == workspace_id)
            .map(|(_, p)| p.clone())
            .collect();
        result.sort();
        Ok(result)
    }
}
