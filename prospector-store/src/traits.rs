// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error;

use crate::{LinkStore, ProspectStore, UserStore, WorkspaceStore};

/// Storage backend with one error type shared by all of its store concerns.
///
/// Errors are reserved for failures of the backend itself (I/O, corrupted data, database errors).
/// Missing entries or already existing keys are regular return values.
pub trait Backend {
    type Error: Error + Send + Sync + 'static;
}

/// All store concerns required by the access-control layer.
///
/// Implemented automatically for every backend implementing the individual store traits.
pub trait ResourceStore: UserStore + ProspectStore + WorkspaceStore + LinkStore {}

impl<T> ResourceStore for T where T: UserStore + ProspectStore + WorkspaceStore + LinkStore {}
