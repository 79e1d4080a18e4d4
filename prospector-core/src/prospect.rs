// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Deserializer, Serialize};

use crate::{ProspectId, Timestamp, UserId, current_timestamp};

/// A sales prospect, privately owned by exactly one user.
///
/// The owner is set on creation and never changes, not even when collaborators edit the prospect
/// through a shared workspace. Patches can only touch the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: ProspectId,
    pub owner: UserId,
    pub payload: ProspectPayload,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Prospect {
    pub fn new(id: ProspectId, owner: UserId, payload: ProspectPayload) -> Self {
        let now = current_timestamp();
        Self {
            id,
            owner,
            payload,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Application data of a prospect.
///
/// Geometry is kept as an opaque WKT string, parsing and rendering it happens elsewhere.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectPayload {
    pub name: String,
    pub status: String,
    pub notes: Option<String>,
    pub geometry: Option<String>,
}

impl ProspectPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "new".into(),
            notes: None,
            geometry: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_geometry(mut self, wkt: impl Into<String>) -> Self {
        self.geometry = Some(wkt.into());
        self
    }
}

/// Partial update of a prospect payload.
///
/// Fields set to `None` are left untouched. Nullable fields use a nested `Option` so they can be
/// cleared explicitly with `Some(None)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub geometry: Option<Option<String>>,
}

/// Maps a present field to `Some`, including an explicit `null` which becomes `Some(None)`.
///
/// Absent fields fall back to `None` through `#[serde(default)]`.
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ProspectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn geometry(mut self, wkt: Option<String>) -> Self {
        self.geometry = Some(wkt);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none() && self.notes.is_none() && self.geometry.is_none()
    }

    /// Applies all set fields to the payload.
    pub fn apply_to(&self, payload: &mut ProspectPayload) {
        if let Some(name) = &self.name {
            payload.name = name.clone();
        }
        if let Some(status) = &self.status {
            payload.status = status.clone();
        }
        if let Some(notes) = &self.notes {
            payload.notes = notes.clone();
        }
        if let Some(geometry) = &self.geometry {
            payload.geometry = geometry.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ProspectPatch, ProspectPayload};

    #[test]
    fn patch_only_touches_set_fields() {
        let mut payload = ProspectPayload::new("Bakery Müller")
            .with_notes("call after lunch")
            .with_geometry("POINT(13.4 52.5)");

        ProspectPatch::new().status("contacted").apply_to(&mut payload);

        assert_eq!(payload.name, "Bakery Müller");
        assert_eq!(payload.status, "contacted");
        assert_eq!(payload.notes.as_deref(), Some("call after lunch"));
        assert_eq!(payload.geometry.as_deref(), Some("POINT(13.4 52.5)"));
    }

    #[test]
    fn patch_clears_nullable_fields() {
        let mut payload = ProspectPayload::new("Kiosk").with_notes("closed on mondays");
        ProspectPatch::new().notes(None).apply_to(&mut payload);
        assert_eq!(payload.notes, None);
    }

    #[test]
    fn empty_patch() {
        assert!(ProspectPatch::new().is_empty());
        assert!(!ProspectPatch::new().geometry(None).is_empty());
    }

    #[test]
    fn patch_from_json() {
        let patch: ProspectPatch =
            serde_json::from_str(r#"{"status":"contacted","notes":null}"#).unwrap();
        assert_eq!(patch.status.as_deref(), Some("contacted"));
        assert_eq!(patch.name, None);
        assert_eq!(patch.notes, Some(None));
        assert_eq!(patch.geometry, None);
        assert!(!patch.is_empty());
    }

    #[test]
    fn null_clears_after_json_round_trip() {
        let patch = ProspectPatch::new().notes(None).geometry(None);
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"notes":null,"geometry":null}"#);

        let decoded: ProspectPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, patch);

        let mut payload = ProspectPayload::new("Kiosk")
            .with_notes("closed on mondays")
            .with_geometry("POINT(13.4 52.5)");
        decoded.apply_to(&mut payload);
        assert_eq!(payload.notes, None);
        assert_eq!(payload.geometry, None);
    }
}
