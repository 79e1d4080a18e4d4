// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Ok(Self(value.to_owned()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

identifier!(
    /// Verified identity of a caller, handed to us by the identity provider.
    UserId
);

identifier!(
    /// Globally unique identifier of a prospect, independent of its owner.
    ProspectId
);

identifier!(
    /// Identifier of a shared workspace.
    WorkspaceId
);

#[cfg(test)]
mod tests {
    use super::{ProspectId, UserId};

    #[test]
    fn ordering_follows_bytes() {
        let mut ids = vec![UserId::from("bob"), UserId::from("Carol"), UserId::from("alice")];
        ids.sort();
        assert_eq!(
            ids.iter().map(UserId::as_str).collect::<Vec<_>>(),
            vec!["Carol", "alice", "bob"]
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ProspectId::new("p1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");
        assert_eq!(id.to_string(), "p1");
    }
}
