// SPDX-License-Identifier: MIT OR Apache-2.0

use prospector_core::UserId;

use crate::memory::{MemoryStore, MemoryStoreError};
use crate::users::UserStore;

impl UserStore for MemoryStore {
    async fn insert_user(&self, id: &UserId) -> Result<bool, MemoryStoreError> {
        self.write(|dataset| dataset.users.insert(id.clone()))
    }

    async fn has_user(&self, id: &UserId) -> Result<bool, MemoryStoreError> {
        Ok(self.read_store().users.contains(id))
    }
}
