use serde::{Deserialize, Serialize};

/// What an anchor produced by the markup preprocessor points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Url,
    User,
    Hashtag,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Url => "url",
            LinkKind::User => "user",
            LinkKind::Hashtag => "hashtag",
        }
    }
}

/// Population state of one half of an emoji catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Pending => "pending",
            LoadState::Loaded => "loaded",
            LoadState::Failed => "failed",
        }
    }

    /// Loaded or failed; either way nothing more will arrive
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadState::Pending)
    }
}

/// The two independently fetched halves of a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiSet {
    Default,
    Custom,
}

impl EmojiSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiSet::Default => "default",
            EmojiSet::Custom => "custom",
        }
    }
}
