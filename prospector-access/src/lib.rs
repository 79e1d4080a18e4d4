// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access control over privately owned prospects which are shared through workspaces.
//!
//! A prospect belongs to exactly one user. Other users gain access to it indirectly: anybody with
//! edit access to a workspace can link the prospect into it, and everybody holding a role on that
//! workspace can then see (viewer) or edit (editor, owner) the prospect. Edits are always applied
//! to the record of the true owner, sharing never moves a prospect to another user.
//!
//! Roles are resolved from the store on every call and never cached, so revoking a membership or
//! removing a link takes effect with the very next request.
//!
//! The same decisions are made no matter which backend holds the data, see `prospector-store` for
//! the relational and the process-local implementation.
mod activity;
mod error;
mod gateway;
mod links;
mod ownership;
mod resolver;
mod workspaces;

pub use activity::{Activity, ActivityListener, ListenerError};
pub use error::{AccessError, AccessResult, Resource};
pub use prospector_core::{MemberRole, Role};

use tracing::warn;

/// Authorizes and applies operations on prospects, workspaces, members and links.
///
/// Holds the store and an optional listener which is informed about successful activity, for
/// example to award points. The listener never influences the outcome of an operation.
#[derive(Clone, Debug)]
pub struct AccessControl<S, L = ()> {
    store: S,
    listener: L,
}

impl<S> AccessControl<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            listener: (),
        }
    }
}

impl<S, L> AccessControl<S, L> {
    /// Replaces the activity listener.
    pub fn with_listener<T>(self, listener: T) -> AccessControl<S, T>
    where
        T: ActivityListener,
    {
        AccessControl {
            store: self.store,
            listener,
        }
    }

    /// Direct access to the underlying store, bypassing all checks.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }
}

impl<S, L> AccessControl<S, L>
where
    L: ActivityListener,
{
    pub(crate) fn notify(&self, activity: Activity) {
        if let Err(err) = self.listener.record(&activity) {
            warn!(?activity, "activity listener failed: {}", err);
        }
    }
}
