// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local backend, optionally persisted to a file.
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use prospector_core::{Prospect, ProspectId, UserId, Workspace, WorkspaceId, WorkspaceMember};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::Backend;
use crate::config::StoreConfig;

/// All collections of one logical dataset.
///
/// The collections are plain maps and lists without any foreign keys. Referential integrity is
/// simulated by the store methods: cascades are explicit sweeps and lookups across owners are
/// scans.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Dataset {
    pub(crate) users: BTreeSet<UserId>,

    /// Prospects grouped per owner. Finding the owner of a prospect means scanning every group.
    pub(crate) prospects: BTreeMap<UserId, BTreeMap<ProspectId, Prospect>>,

    pub(crate) workspaces: BTreeMap<WorkspaceId, Workspace>,

    pub(crate) members: Vec<WorkspaceMember>,

    /// Workspace-prospect pairs, kept free of duplicates by the link methods.
    pub(crate) links: Vec<(WorkspaceId, ProspectId)>,
}

impl Dataset {
    /// Scans the prospects of every user until the given id is found.
    pub(crate) fn find_prospect(&self, id: &ProspectId) -> Option<&Prospect> {
        let mut scanned = 0;
        for prospects in self.prospects.values() {
            scanned += prospects.len();
            if let Some(prospect) = prospects.get(id) {
                trace!(%id, scanned, "found prospect owner");
                return Some(prospect);
            }
        }
        trace!(%id, scanned, "prospect not found in any collection");
        None
    }

    pub(crate) fn has_link(&self, workspace_id: &WorkspaceId, prospect_id: &ProspectId) -> bool {
        self.links
            .iter()
            .any(|(w, p)| w == workspace_id && p == prospect_id)
    }

    pub(crate) fn member_index(&self, workspace_id: &WorkspaceId, user_id: &UserId) -> Option<usize> {
        self.members
            .iter()
            .position(|m| &m.workspace_id == workspace_id && &m.user_id == user_id)
    }
}

/// In-memory store with optional file persistence.
///
/// The dataset sits behind an `RwLock`: reads happen concurrently, structural writes (including
/// their cascades) are serialized per store instance. Cloned instances share the same dataset.
///
/// When a file path is configured the dataset is loaded from it on build and written back after
/// every write. A write is only applied in memory once it was persisted successfully.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    inner: Arc<RwLock<Dataset>>,
    path: Option<Arc<PathBuf>>,
}

impl MemoryStore {
    /// Create a new, empty in-memory store without persistence.
    pub fn new() -> Self {
        Self {
            inner: Arc::default(),
            path: None,
        }
    }

    /// Path of the file the dataset is persisted to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref().map(PathBuf::as_path)
    }

    /// Obtain a read-lock on the dataset.
    pub(crate) fn read_store(&self) -> RwLockReadGuard<'_, Dataset> {
        self.inner
            .read()
            .expect("acquire shared read access on store")
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, Dataset> {
        self.inner
            .write()
            .expect("acquire exclusive write access on store")
    }

    /// Applies a structural change to the dataset while holding the write-lock.
    ///
    /// With persistence enabled the change is applied to a copy first which replaces the current
    /// dataset only after it was written to disk. Writes which leave the dataset unchanged never
    /// touch the file.
    pub(crate) fn write<F, R>(&self, f: F) -> Result<R, MemoryStoreError>
    where
        F: FnOnce(&mut Dataset) -> R,
    {
        let mut dataset = self.write_store();

        match &self.path {
            Some(path) => {
                let mut next = dataset.clone();
                let result = f(&mut next);
                if next != *dataset {
                    persist(path, &next)?;
                    *dataset = next;
                }
                Ok(result)
            }
            None => Ok(f(&mut dataset)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryStore {
    type Error = MemoryStoreError;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStoreBuilder {
    path: Option<PathBuf>,
}

impl MemoryStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with all settings taken from the `memory` variant of a store configuration.
    ///
    /// Returns `None` if the configuration selects another backend.
    pub fn from_config(config: &StoreConfig) -> Option<Self> {
        match config {
            StoreConfig::Memory { path } => Some(Self { path: path.clone() }),
            _ => None,
        }
    }

    /// Persist the dataset to this file.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Builds the store, loading the dataset from the configured file if it exists.
    pub fn build(self) -> Result<MemoryStore, MemoryStoreError> {
        let dataset = match &self.path {
            Some(path) => load(path)?,
            None => Dataset::default(),
        };

        Ok(MemoryStore {
            inner: Arc::new(RwLock::new(dataset)),
            path: self.path.map(Arc::new),
        })
    }
}

fn load(path: &Path) -> Result<Dataset, MemoryStoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no dataset file yet, starting empty");
            return Ok(Dataset::default());
        }
        Err(err) => return Err(MemoryStoreError::Io(path.to_path_buf(), err)),
    };

    let dataset: Dataset = ciborium::from_reader(&bytes[..])
        .map_err(|err| MemoryStoreError::Decode(path.to_path_buf(), err.to_string()))?;

    debug!(
        path = %path.display(),
        users = dataset.users.len(),
        workspaces = dataset.workspaces.len(),
        "loaded dataset"
    );

    Ok(dataset)
}

fn persist(path: &Path, dataset: &Dataset) -> Result<(), MemoryStoreError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(dataset, &mut bytes)
        .map_err(|err| MemoryStoreError::Encode(err.to_string()))?;

    // Write next to the target and rename, a crash mid-write must not corrupt the dataset.
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, &bytes).map_err(|err| MemoryStoreError::Io(tmp_path.clone(), err))?;
    fs::rename(&tmp_path, path).map_err(|err| MemoryStoreError::Io(path.to_path_buf(), err))?;

    trace!(path = %path.display(), bytes = bytes.len(), "persisted dataset");
    Ok(())
}

#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("could not access dataset file {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("failed encoding dataset: {0}")]
    Encode(String),

    /// Invalid, corrupted data was found in the dataset file. This is a critical error.
    #[error("could not decode corrupted dataset file {0}: {1}")]
    Decode(PathBuf, String),
}
