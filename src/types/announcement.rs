use serde::{Deserialize, Serialize};

/// The two-field launch status payload served by the notam feed. Fields the
/// feed omits decode to empty strings; anything else in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub long: String,
}

impl Announcement {
    pub fn new(short: impl Into<String>, long: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
        }
    }

    /// The fixed record shown whenever the feed cannot be read.
    pub fn unknown() -> Self {
        Self::new("Unknown", "")
    }
}
