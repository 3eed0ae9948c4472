use async_trait::async_trait;
use mfm_types::{CustomEmoji, DefaultEmoji, InstanceHost};

use crate::error::EngineResult;

/// Where a catalog's two halves come from.
///
/// Implementations talk to the network (or a bundled list); the registry only calls
/// each method once per instance and treats any error as "this half stays empty".
#[async_trait]
pub trait EmojiSource: Send + Sync {
    /// The instance's default (Unicode) emoji set
    async fn fetch_default_emojis(&self, instance: &InstanceHost) -> EngineResult<Vec<DefaultEmoji>>;

    /// The instance's own custom emoji
    async fn fetch_custom_emojis(&self, instance: &InstanceHost) -> EngineResult<Vec<CustomEmoji>>;
}
