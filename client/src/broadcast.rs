//! Broadcast domain object.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a broadcast.
///
/// # Examples
///
/// ```
/// use broadcast_client::Level;
///
/// assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
/// assert!("critical".parse::<Level>().is_err());
/// assert_eq!(Level::default().as_str(), "info");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Info,
    Warning,
}

impl Level {
    /// Every accepted level, in display order.
    pub const ALL: [Level; 2] = [Level::Info, Level::Warning];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown broadcast level {0:?}: expected info or warning")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// An announcement shown to every user of the platform.
///
/// The server owns the lifecycle: `id`, timestamps and the read/archived
/// flags are assigned remotely and are left at their defaults when a new
/// broadcast is built locally.
///
/// # Examples
///
/// ```
/// use broadcast_client::{Broadcast, Level};
///
/// let bc = Broadcast::new("Maintenance", "Tonight at 22:00", Level::Warning);
/// assert_eq!(bc.id, 0);
/// assert!(bc.created.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Broadcast {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
}

impl Broadcast {
    pub fn new(title: impl Into<String>, content: impl Into<String>, level: Level) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            level,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Level::Warning).unwrap(),
            "\"warning\""
        );
        let level: Level = serde_json::from_str("\"info\"").unwrap();
        assert_eq!(level, Level::Info);
    }

    #[test]
    fn test_broadcast_deserializes_server_payload() {
        let json = r#"{
            "id": 12,
            "title": "Upgrade",
            "content": "v2 is live",
            "level": "warning",
            "created": "2026-10-01T08:00:00Z",
            "updated": "2026-10-02T08:00:00Z",
            "archived": false,
            "read": true,
            "project_key": "PRJ"
        }"#;
        let bc: Broadcast = serde_json::from_str(json).unwrap();

        assert_eq!(bc.id, 12);
        assert_eq!(bc.level, Level::Warning);
        assert!(bc.read);
        assert_eq!(bc.project_key.as_deref(), Some("PRJ"));
        assert_eq!(
            bc.created.map(|c| c.to_rfc3339()),
            Some("2026-10-01T08:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_new_broadcast_omits_server_fields() {
        let bc = Broadcast::new("t", "", Level::Info);
        let value = serde_json::to_value(&bc).unwrap();

        assert_eq!(value["title"], "t");
        assert_eq!(value["content"], "");
        assert_eq!(value["level"], "info");
        assert!(value.get("created").is_none());
        assert!(value.get("project_key").is_none());
    }
}
