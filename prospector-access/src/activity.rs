// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error;

use prospector_core::{ProspectId, UserId, WorkspaceId};

/// Successful activity of a user, reported after the change was stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activity {
    /// A user created a prospect.
    ProspectCreated {
        caller: UserId,
        prospect_id: ProspectId,
    },

    /// A user changed a prospect, either their own or one shared with them.
    ProspectUpdated {
        caller: UserId,
        owner: UserId,
        prospect_id: ProspectId,
    },

    /// A user linked a prospect into a workspace for the first time.
    ProspectLinked {
        caller: UserId,
        workspace_id: WorkspaceId,
        prospect_id: ProspectId,
    },
}

impl Activity {
    /// The user who did something.
    pub fn caller(&self) -> &UserId {
        match self {
            Activity::ProspectCreated { caller, .. }
            | Activity::ProspectUpdated { caller, .. }
            | Activity::ProspectLinked { caller, .. } => caller,
        }
    }
}

pub type ListenerError = Box<dyn Error + Send + Sync>;

/// Receiver of activity, for example a gamification service awarding points.
///
/// Failures are logged and otherwise ignored, the reported change is already stored.
pub trait ActivityListener {
    fn record(&self, activity: &Activity) -> Result<(), ListenerError>;
}

impl ActivityListener for () {
    fn record(&self, _activity: &Activity) -> Result<(), ListenerError> {
        Ok(())
    }
}
