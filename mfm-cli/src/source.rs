use std::time::Duration;

use async_trait::async_trait;
use mfm_engine::{EmojiSource, EngineError, EngineResult};
use mfm_types::{CustomEmoji, DefaultEmoji, EmojiSet, InstanceHost};

use crate::api::MisskeyClient;
use crate::emoji::bundled_default_emojis;

/// Live source: bundled default set, custom set from the instance's API
pub struct MisskeySource {
    timeout: Duration,
}

impl MisskeySource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl EmojiSource for MisskeySource {
    async fn fetch_default_emojis(&self, _instance: &InstanceHost) -> EngineResult<Vec<DefaultEmoji>> {
        Ok(bundled_default_emojis())
    }

    async fn fetch_custom_emojis(&self, instance: &InstanceHost) -> EngineResult<Vec<CustomEmoji>> {
        let client = MisskeyClient::for_instance(instance, self.timeout)
            .map_err(|e| EngineError::fetch(instance, EmojiSet::Custom, e))?;
        fetch_custom_with(&client, instance).await
    }
}

async fn fetch_custom_with(client: &MisskeyClient, instance: &InstanceHost) -> EngineResult<Vec<CustomEmoji>> {
    let emojis = client
        .get_emojis()
        .await
        .map_err(|e| EngineError::fetch(instance, EmojiSet::Custom, e))?;

    log::info!("Fetched {} custom emoji from {}", emojis.len(), instance);
    Ok(emojis)
}

/// Offline source: bundled default set plus a fixed custom list
#[derive(Default)]
pub struct StaticSource {
    custom: Vec<CustomEmoji>,
}

impl StaticSource {
    pub fn new(custom: Vec<CustomEmoji>) -> Self {
        Self { custom }
    }
}

#[async_trait]
impl EmojiSource for StaticSource {
    async fn fetch_default_emojis(&self, _instance: &InstanceHost) -> EngineResult<Vec<DefaultEmoji>> {
        Ok(bundled_default_emojis())
    }

    async fn fetch_custom_emojis(&self, _instance: &InstanceHost) -> EngineResult<Vec<CustomEmoji>> {
        Ok(self.custom.clone())
    }
}
