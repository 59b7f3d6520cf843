//! Strongly-typed record identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a notification record.
///
/// Assigned by the document store; opaque to this job. A newtype keeps it
/// from being confused with other strings (tokens, receipts) at compile
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_is_transparent_in_json() {
        let id = RecordId::new("-NxK3f");
        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, "\"-NxK3f\"");

        let back: RecordId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, id);
    }
}
