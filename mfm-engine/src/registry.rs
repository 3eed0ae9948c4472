use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use mfm_types::{Account, EmojiSet, InstanceHost};
use tokio::runtime::Handle;

use crate::catalog::EmojiCatalog;
use crate::source::EmojiSource;

/// Application-scoped registry holding one emoji catalog per instance host
#[derive(Clone)]
pub struct EmojiRegistry {
    catalogs: Arc<Mutex<HashMap<InstanceHost, Arc<EmojiCatalog>>>>,
    source: Arc<dyn EmojiSource>,
}

impl EmojiRegistry {
    pub fn new(source: Arc<dyn EmojiSource>) -> Self {
        Self {
            catalogs: Arc::new(Mutex::new(HashMap::new())),
            source,
        }
    }

    /// Get the catalog for the account's instance, creating it on first sight.
    ///
    /// A new catalog starts two background fetches (default set, custom set) on the
    /// current tokio runtime. Registering another account on the same instance
    /// returns the same catalog and starts nothing.
    pub fn register(&self, account: &Account) -> Arc<EmojiCatalog> {
        let catalog = {
            let mut catalogs = self.catalogs.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = catalogs.get(&account.instance) {
                tracing::debug!(
                    instance = %account.instance,
                    username = %account.username,
                    "reusing emoji catalog"
                );
                return existing.clone();
            }

            let catalog = Arc::new(EmojiCatalog::new(account.instance.clone()));
            catalogs.insert(account.instance.clone(), catalog.clone());
            catalog
        };

        tracing::info!(instance = %account.instance, "registering emoji catalog");
        self.spawn_fetches(&catalog);
        catalog
    }

    pub fn lookup(&self, instance: &InstanceHost) -> Option<Arc<EmojiCatalog>> {
        self.catalogs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(instance)
            .cloned()
    }

    /// Instances with a registered catalog, sorted
    pub fn instances(&self) -> Vec<InstanceHost> {
        let mut instances: Vec<_> = self
            .catalogs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        instances.sort();
        instances
    }

    /// Start both fetches on the current runtime. Outside a runtime nothing can be
    /// fetched, so both halves are marked failed and `ready` still resolves.
    fn spawn_fetches(&self, catalog: &Arc<EmojiCatalog>) {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(instance = %catalog.instance(), "No tokio runtime, emoji not fetched: {}", e);
                catalog.mark_failed(EmojiSet::Default);
                catalog.mark_failed(EmojiSet::Custom);
                return;
            }
        };

        let source = self.source.clone();
        let target = catalog.clone();
        runtime.spawn(async move {
            match source.fetch_default_emojis(target.instance()).await {
                Ok(emojis) => target.load_default(emojis),
                Err(e) => {
                    tracing::warn!("Default emoji fetch failed: {}", e);
                    target.mark_failed(EmojiSet::Default);
                }
            }
        });

        let source = self.source.clone();
        let target = catalog.clone();
        runtime.spawn(async move {
            match source.fetch_custom_emojis(target.instance()).await {
                Ok(emojis) => target.load_custom(emojis),
                Err(e) => {
                    tracing::warn!("Custom emoji fetch failed: {}", e);
                    target.mark_failed(EmojiSet::Custom);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EngineError, EngineResult};
    use async_trait::async_trait;
    use mfm_types::{CustomEmoji, DefaultEmoji, LoadState};

    struct FailingSource;

    #[async_trait]
    impl EmojiSource for FailingSource {
        async fn fetch_default_emojis(&self, instance: &InstanceHost) -> EngineResult<Vec<DefaultEmoji>> {
            Err(EngineError::fetch(instance, EmojiSet::Default, "connection refused"))
        }

        async fn fetch_custom_emojis(&self, instance: &InstanceHost) -> EngineResult<Vec<CustomEmoji>> {
            Ok(vec![CustomEmoji::new(
                "blob",
                format!("https://{}/emoji/blob.png", instance),
                None,
            )])
        }
    }

    fn account(name: &str, host: &str) -> Account {
        Account::new(name, InstanceHost::parse(host).unwrap())
    }

    #[tokio::test]
    async fn test_failed_half_stays_empty() {
        let registry = EmojiRegistry::new(Arc::new(FailingSource));
        let catalog = registry.register(&account("alice", "example.social"));

        let status = catalog.ready().await;
        assert_eq!(status.default.state, LoadState::Failed);
        assert_eq!(status.custom.state, LoadState::Loaded);
        assert!(catalog.default_emojis().is_empty());
        assert_eq!(catalog.custom_emojis().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_uses_normalized_host() {
        let registry = EmojiRegistry::new(Arc::new(FailingSource));
        let catalog = registry.register(&account("alice", "https://Example.Social/"));

        let found = registry
            .lookup(&InstanceHost::parse("example.social").unwrap())
            .expect("catalog should be registered");
        assert!(Arc::ptr_eq(&catalog, &found));
        assert!(registry
            .lookup(&InstanceHost::parse("other.social").unwrap())
            .is_none());
    }

    #[tokio::test]
    async fn test_one_catalog_per_instance() {
        let registry = EmojiRegistry::new(Arc::new(FailingSource));
        registry.register(&account("alice", "example.social"));
        registry.register(&account("bob", "example.social"));
        registry.register(&account("carol", "misskey.io"));

        let names: Vec<_> = registry
            .instances()
            .iter()
            .map(|host| host.to_string())
            .collect();
        assert_eq!(names, vec!["example.social", "misskey.io"]);
    }

    #[test]
    fn test_register_without_runtime_settles_as_failed() {
        let registry = EmojiRegistry::new(Arc::new(FailingSource));
        let catalog = registry.register(&account("alice", "example.social"));

        let status = catalog.status();
        assert!(status.is_settled());
        assert_eq!(status.default.state, LoadState::Failed);
        assert_eq!(status.custom.state, LoadState::Failed);

        let again = registry.register(&account("bob", "example.social"));
        assert!(Arc::ptr_eq(&catalog, &again));
    }
}
