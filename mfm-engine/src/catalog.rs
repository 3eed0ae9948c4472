//! Per-instance emoji catalog.
//!
//! A catalog holds two halves, the default (Unicode) set and the instance's custom
//! set. Each half arrives independently and may never arrive at all, so readers must
//! accept a partially populated catalog at any time.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use mfm_types::{
    CatalogStatus, CustomEmoji, DefaultEmoji, EmojiSet, HalfStatus, InstanceHost, LoadState,
};
use tokio::sync::watch;

/// Category used when an emoji has none, or an empty one
pub const FALLBACK_CATEGORY: &str = "Others";

/// Emoji that can be grouped into picker categories
pub trait Categorized {
    fn category(&self) -> Option<&str>;
}

impl Categorized for DefaultEmoji {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Categorized for CustomEmoji {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Group emoji by category, keeping arrival order inside each group
pub fn categorize<T: Categorized + Clone>(emojis: &[T]) -> BTreeMap<String, Vec<T>> {
    let mut grouped: BTreeMap<String, Vec<T>> = BTreeMap::new();

    for emoji in emojis {
        let category = match emoji.category() {
            Some(category) if !category.is_empty() => category,
            _ => FALLBACK_CATEGORY,
        };
        grouped
            .entry(category.to_string())
            .or_default()
            .push(emoji.clone());
    }

    grouped
}

#[derive(Debug)]
struct Half<T> {
    emojis: Vec<T>,
    categorized: BTreeMap<String, Vec<T>>,
}

impl<T> Default for Half<T> {
    fn default() -> Self {
        Self {
            emojis: Vec::new(),
            categorized: BTreeMap::new(),
        }
    }
}

impl<T: Categorized + Clone> Half<T> {
    fn replace(&mut self, emojis: Vec<T>) {
        self.categorized = categorize(&emojis);
        self.emojis = emojis;
    }
}

#[derive(Debug)]
pub struct EmojiCatalog {
    instance: InstanceHost,
    default_half: RwLock<Half<DefaultEmoji>>,
    custom_half: RwLock<Half<CustomEmoji>>,
    status: watch::Sender<CatalogStatus>,
}

impl EmojiCatalog {
    /// Create an empty catalog; both halves start out pending
    pub fn new(instance: InstanceHost) -> Self {
        let (status, _) = watch::channel(CatalogStatus::default());
        Self {
            instance,
            default_half: RwLock::new(Half::default()),
            custom_half: RwLock::new(Half::default()),
            status,
        }
    }

    /// Create a catalog with both halves already loaded
    pub fn with_emojis(
        instance: InstanceHost,
        default_emojis: Vec<DefaultEmoji>,
        custom_emojis: Vec<CustomEmoji>,
    ) -> Self {
        let catalog = Self::new(instance);
        catalog.load_default(default_emojis);
        catalog.load_custom(custom_emojis);
        catalog
    }

    pub fn instance(&self) -> &InstanceHost {
        &self.instance
    }

    /// Store the default set and rebuild its category view
    pub fn load_default(&self, emojis: Vec<DefaultEmoji>) {
        let count = emojis.len();
        write(&self.default_half).replace(emojis);
        self.mark_loaded(EmojiSet::Default, count);
    }

    /// Store the custom set and rebuild its category view
    pub fn load_custom(&self, emojis: Vec<CustomEmoji>) {
        let count = emojis.len();
        write(&self.custom_half).replace(emojis);
        self.mark_loaded(EmojiSet::Custom, count);
    }

    /// Record that a half could not be fetched. Data from an earlier load is kept.
    pub fn mark_failed(&self, set: EmojiSet) {
        self.status.send_modify(|status| {
            let half = half_status_mut(status, set);
            if half.state == LoadState::Pending {
                half.state = LoadState::Failed;
                half.updated_at = Some(Utc::now());
            }
        });
        tracing::warn!(instance = %self.instance, set = set.as_str(), "emoji set unavailable");
    }

    fn mark_loaded(&self, set: EmojiSet, count: usize) {
        self.status.send_modify(|status| {
            *half_status_mut(status, set) = HalfStatus {
                state: LoadState::Loaded,
                count,
                updated_at: Some(Utc::now()),
            };
        });
        tracing::debug!(instance = %self.instance, set = set.as_str(), count, "emoji set loaded");
    }

    pub fn status(&self) -> CatalogStatus {
        self.status.borrow().clone()
    }

    /// Wait until both halves have loaded or failed
    pub async fn ready(&self) -> CatalogStatus {
        let mut receiver = self.status.subscribe();
        let status = match receiver.wait_for(CatalogStatus::is_settled).await {
            Ok(status) => status.clone(),
            Err(_) => self.status(),
        };
        status
    }

    /// First default emoji accepted by `matches`
    pub fn find_default(&self, matches: impl Fn(&DefaultEmoji) -> bool) -> Option<DefaultEmoji> {
        read(&self.default_half)
            .emojis
            .iter()
            .find(|emoji| matches(emoji))
            .cloned()
    }

    /// First custom emoji accepted by `matches`
    pub fn find_custom(&self, matches: impl Fn(&CustomEmoji) -> bool) -> Option<CustomEmoji> {
        read(&self.custom_half)
            .emojis
            .iter()
            .find(|emoji| matches(emoji))
            .cloned()
    }

    pub fn default_emojis(&self) -> Vec<DefaultEmoji> {
        read(&self.default_half).emojis.clone()
    }

    pub fn custom_emojis(&self) -> Vec<CustomEmoji> {
        read(&self.custom_half).emojis.clone()
    }

    pub fn categorized_default(&self) -> BTreeMap<String, Vec<DefaultEmoji>> {
        read(&self.default_half).categorized.clone()
    }

    pub fn categorized_custom(&self) -> BTreeMap<String, Vec<CustomEmoji>> {
        read(&self.custom_half).categorized.clone()
    }
}

fn half_status_mut(status: &mut CatalogStatus, set: EmojiSet) -> &mut HalfStatus {
    match set {
        EmojiSet::Default => &mut status.default,
        EmojiSet::Custom => &mut status.custom,
    }
}

// Halves are swapped wholesale, so a poisoned lock still guards consistent data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> InstanceHost {
        InstanceHost::parse("example.social").unwrap()
    }

    #[test]
    fn test_categorize_default_with_fallback() {
        let catalog = EmojiCatalog::new(host());
        catalog.load_default(vec![
            DefaultEmoji::new("a", "🅰️", Some("X")),
            DefaultEmoji::new("b", "🅱️", None),
        ]);

        let grouped = catalog.categorized_default();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["X"][0].name, "a");
        assert_eq!(grouped["Others"][0].name, "b");
    }

    #[test]
    fn test_empty_category_falls_back() {
        let grouped = categorize(&[CustomEmoji::new("blob", "https://x/blob.png", Some(""))]);
        assert!(grouped.contains_key(FALLBACK_CATEGORY));
    }

    #[test]
    fn test_arrival_order_within_category() {
        let grouped = categorize(&[
            CustomEmoji::new("one", "https://x/1.png", Some("blobs")),
            CustomEmoji::new("two", "https://x/2.png", Some("cats")),
            CustomEmoji::new("three", "https://x/3.png", Some("blobs")),
        ]);

        let names: Vec<_> = grouped["blobs"].iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["one", "three"]);
    }

    #[test]
    fn test_reload_replaces_half() {
        let catalog = EmojiCatalog::new(host());
        catalog.load_custom(vec![CustomEmoji::new("old", "https://x/old.png", Some("A"))]);
        catalog.load_custom(vec![CustomEmoji::new("new", "https://x/new.png", Some("B"))]);

        assert_eq!(catalog.custom_emojis().len(), 1);
        assert!(!catalog.categorized_custom().contains_key("A"));
        assert_eq!(catalog.status().custom.count, 1);
    }

    #[test]
    fn test_failure_after_load_keeps_loaded_state() {
        let catalog = EmojiCatalog::new(host());
        catalog.load_default(vec![DefaultEmoji::new("a", "🅰️", None)]);
        catalog.mark_failed(EmojiSet::Default);

        assert_eq!(catalog.status().default.state, LoadState::Loaded);
        assert_eq!(catalog.default_emojis().len(), 1);
    }

    #[test]
    fn test_status_tracks_each_half() {
        let catalog = EmojiCatalog::new(host());
        assert!(!catalog.status().is_settled());

        catalog.load_default(Vec::new());
        assert!(!catalog.status().is_settled());

        catalog.mark_failed(EmojiSet::Custom);
        let status = catalog.status();
        assert!(status.is_settled());
        assert_eq!(status.custom.state, LoadState::Failed);
    }

    #[tokio::test]
    async fn test_ready_resolves_once_settled() {
        let catalog = std::sync::Arc::new(EmojiCatalog::new(host()));

        let loader = catalog.clone();
        tokio::spawn(async move {
            loader.load_custom(vec![CustomEmoji::new("blob", "https://x/blob.png", None)]);
            loader.mark_failed(EmojiSet::Default);
        });

        let status = catalog.ready().await;
        assert_eq!(status.custom.state, LoadState::Loaded);
        assert_eq!(status.default.state, LoadState::Failed);
    }
}
