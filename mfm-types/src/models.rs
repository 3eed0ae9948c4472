use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::LoadState;

/// A built-in Unicode emoji bound to a name, as listed in the bundled default set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultEmoji {
    pub name: String,
    #[serde(rename = "char")]
    pub glyph: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl DefaultEmoji {
    pub fn new(name: impl Into<String>, glyph: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            name: name.into(),
            glyph: glyph.into(),
            category: category.map(str::to_string),
            keywords: Vec::new(),
        }
    }
}

/// A server-hosted, image-backed emoji
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEmoji {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CustomEmoji {
    pub fn new(name: impl Into<String>, url: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            category: category.map(str::to_string),
            aliases: Vec::new(),
        }
    }
}

/// Custom emoji belonging to another server, shipped alongside a note or user payload.
/// Only ever consulted for the render call it was passed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEmoji {
    pub name: String,
    pub url: String,
}

impl ExternalEmoji {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Normalized instance host, e.g. `misskey.io`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceHost(String);

impl InstanceHost {
    /// Normalize a host or base URL.
    ///
    /// Accepts `Example.Social`, `https://example.social/`, `example.social/api` and
    /// similar spellings of the same instance. Returns `None` when no host remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let without_scheme = trimmed
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(trimmed);

        let host = without_scheme
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('.')
            .to_lowercase();

        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self(host))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base URL used to reach the instance's API
    pub fn base_url(&self) -> String {
        format!("https://{}", self.0)
    }
}

impl fmt::Display for InstanceHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for InstanceHost {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid instance host: {value:?}"))
    }
}

impl From<InstanceHost> for String {
    fn from(host: InstanceHost) -> Self {
        host.0
    }
}

/// An account registered with the app. Catalogs are keyed by its instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub instance: InstanceHost,
}

impl Account {
    pub fn new(username: impl Into<String>, instance: InstanceHost) -> Self {
        Self {
            username: username.into(),
            instance,
        }
    }
}

/// Load progress of one half (default or custom) of a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfStatus {
    pub state: LoadState,
    pub count: usize,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for HalfStatus {
    fn default() -> Self {
        Self {
            state: LoadState::Pending,
            count: 0,
            updated_at: None,
        }
    }
}

/// Snapshot of both halves of a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStatus {
    pub default: HalfStatus,
    pub custom: HalfStatus,
}

impl CatalogStatus {
    /// Both halves have either loaded or failed
    pub fn is_settled(&self) -> bool {
        self.default.state.is_settled() && self.custom.state.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_host_normalization() {
        let expected = InstanceHost::parse("example.social").unwrap();

        assert_eq!(InstanceHost::parse("Example.Social"), Some(expected.clone()));
        assert_eq!(InstanceHost::parse("https://example.social/"), Some(expected.clone()));
        assert_eq!(InstanceHost::parse("http://example.social/api/meta"), Some(expected.clone()));
        assert_eq!(InstanceHost::parse("  example.social.  "), Some(expected));
    }

    #[test]
    fn test_instance_host_rejects_empty() {
        assert_eq!(InstanceHost::parse(""), None);
        assert_eq!(InstanceHost::parse("https://"), None);
        assert_eq!(InstanceHost::parse("bad host"), None);
    }

    #[test]
    fn test_default_emoji_wire_shape() {
        let json = r#"{"category":"people","char":"😀","name":"grinning","keywords":["face"]}"#;
        let emoji: DefaultEmoji = serde_json::from_str(json).unwrap();

        assert_eq!(emoji.name, "grinning");
        assert_eq!(emoji.glyph, "😀");
        assert_eq!(emoji.category.as_deref(), Some("people"));
    }

    #[test]
    fn test_custom_emoji_wire_shape() {
        let json = r#"{"name":"blob","url":"https://example.social/emoji/blob.png","category":null}"#;
        let emoji: CustomEmoji = serde_json::from_str(json).unwrap();

        assert_eq!(emoji.url, "https://example.social/emoji/blob.png");
        assert_eq!(emoji.category, None);
        assert!(emoji.aliases.is_empty());
    }

    #[test]
    fn test_account_round_trips_instance() {
        let json = r#"{"username":"alice","instance":"https://Example.Social"}"#;
        let account: Account = serde_json::from_str(json).unwrap();

        assert_eq!(account.instance.as_str(), "example.social");
    }
}
