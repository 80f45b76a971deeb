/// Document identifiers.
///
/// Every stored document is keyed by a UUID v7, rendered on the wire as its
/// hyphenated string under `_id`. Ids sort by creation time.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Allocate a fresh, time-ordered id.
    pub fn new() -> Self {
        DocumentId(Uuid::now_v7())
    }

    /// Parse an id taken from a path segment or form field.
    /// Returns `None` for anything that is not a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(DocumentId)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        DocumentId(id)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(DocumentId)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Deserialize a nullable reference. Console forms submit `""` for "no selection".
pub fn optional<'de, D>(deserializer: D) -> Result<Option<DocumentId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid document id `{value}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "optional")]
        reference: Option<DocumentId>,
    }

    #[test]
    fn parse_round_trips_display() {
        let id = DocumentId::new();
        assert_eq!(DocumentId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn parse_rejects_non_uuid() {
        assert_eq!(DocumentId::parse("507f1f77bcf86cd799439011"), None);
        assert_eq!(DocumentId::parse(""), None);
    }

    #[test]
    fn new_ids_are_time_ordered() {
        let first = DocumentId::new();
        let second = DocumentId::new();
        assert!(first < second);
    }

    #[test]
    fn optional_reference_treats_blank_as_absent() {
        let blank: Holder = serde_json::from_str(r#"{"reference":""}"#).unwrap();
        assert_eq!(blank.reference, None);

        let null: Holder = serde_json::from_str(r#"{"reference":null}"#).unwrap();
        assert_eq!(null.reference, None);

        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.reference, None);
    }

    #[test]
    fn optional_reference_rejects_garbage() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"reference":"nope"}"#);
        assert!(result.is_err());
    }
}
