// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Effective role of a caller on a workspace.
///
/// Roles are totally ordered, every greater role contains all lower ones:
///
/// None < Viewer < Editor < Owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No access at all, also returned for workspaces which do not exist.
    None,

    /// Permission to read the workspace and its linked prospects.
    Viewer,

    /// Permission to link, unlink and edit prospects of the workspace.
    Editor,

    /// The single owner of the workspace. Derived from the workspace itself and never from a
    /// membership row.
    Owner,
}

impl Role {
    /// Any role other than `None` grants view access.
    pub fn can_view(&self) -> bool {
        *self >= Role::Viewer
    }

    /// `Owner` and `Editor` grant edit access.
    pub fn can_edit(&self) -> bool {
        *self >= Role::Editor
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Role::None)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::None => "none",
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Owner => "owner",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Role::None),
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            "owner" => Ok(Role::Owner),
            _ => Err(RoleError::Unknown(value.to_string())),
        }
    }
}

/// Role which can be granted to a non-owner through a workspace membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Viewer,
    Editor,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Viewer => "viewer",
            MemberRole::Editor => "editor",
        }
    }
}

impl Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = RoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MemberRole::try_from(value.parse::<Role>()?)
    }
}

impl From<MemberRole> for Role {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Viewer => Role::Viewer,
            MemberRole::Editor => Role::Editor,
        }
    }
}

impl TryFrom<Role> for MemberRole {
    type Error = RoleError;

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        match role {
            Role::Viewer => Ok(MemberRole::Viewer),
            Role::Editor => Ok(MemberRole::Editor),
            Role::Owner | Role::None => Err(RoleError::NotGrantable(role)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("unknown role '{0}'")]
    Unknown(String),

    /// Ownership is a property of the workspace, and "none" is expressed by removing the member.
    #[error("role '{0}' can not be granted through a membership")]
    NotGrantable(Role),
}

#[cfg(test)]
mod tests {
    use super::{MemberRole, Role, RoleError};

    #[test]
    fn total_order() {
        assert!(Role::Owner > Role::Editor);
        assert!(Role::Editor > Role::Viewer);
        assert!(Role::Viewer > Role::None);

        let mut roles = vec![Role::Editor, Role::None, Role::Owner, Role::Viewer];
        roles.sort();
        assert_eq!(
            roles,
            vec![Role::None, Role::Viewer, Role::Editor, Role::Owner]
        );
    }

    #[test]
    fn access_checks() {
        assert!(Role::Owner.can_edit());
        assert!(Role::Editor.can_edit());
        assert!(!Role::Viewer.can_edit());
        assert!(!Role::None.can_edit());

        assert!(Role::Viewer.can_view());
        assert!(!Role::None.can_view());

        assert!(Role::Owner.is_owner());
        assert!(!Role::Editor.is_owner());
    }

    #[test]
    fn member_roles_never_grant_ownership() {
        assert_eq!(MemberRole::try_from(Role::Editor), Ok(MemberRole::Editor));
        assert_eq!(
            MemberRole::try_from(Role::Owner),
            Err(RoleError::NotGrantable(Role::Owner))
        );
        assert_eq!(
            "owner".parse::<MemberRole>(),
            Err(RoleError::NotGrantable(Role::Owner))
        );
        assert_eq!(
            "admin".parse::<MemberRole>(),
            Err(RoleError::Unknown("admin".into()))
        );
        assert!(Role::from(MemberRole::Editor) < Role::Owner);
    }

    #[test]
    fn string_representation() {
        for role in [Role::None, Role::Viewer, Role::Editor, Role::Owner] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
        assert_eq!(MemberRole::Viewer.to_string(), "viewer");
    }
}
