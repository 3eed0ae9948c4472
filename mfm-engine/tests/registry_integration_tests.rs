// Integration tests for catalog registration
// A counting source stands in for the network so fetches can be observed

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mfm_engine::{render, resolve, EmojiRegistry, EmojiSource, EngineResult};
use mfm_types::{
    Account, CustomEmoji, DefaultEmoji, ImageSize, InstanceHost, LoadState, ResolvedEmoji,
    Segment, TextStyle,
};

#[derive(Default)]
struct CountingSource {
    default_calls: AtomicUsize,
    custom_calls: AtomicUsize,
}

#[async_trait]
impl EmojiSource for CountingSource {
    async fn fetch_default_emojis(&self, _instance: &InstanceHost) -> EngineResult<Vec<DefaultEmoji>> {
        self.default_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![DefaultEmoji::new("grinning", "😀", Some("people"))])
    }

    async fn fetch_custom_emojis(&self, instance: &InstanceHost) -> EngineResult<Vec<CustomEmoji>> {
        self.custom_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![CustomEmoji::new(
            "blob",
            format!("https://{}/emoji/blob.png", instance),
            Some("blobs"),
        )])
    }
}

fn account(username: &str) -> Account {
    Account::new(username, InstanceHost::parse("example.social").unwrap())
}

#[tokio::test]
async fn test_registration_is_idempotent() {
    let source = Arc::new(CountingSource::default());
    let registry = EmojiRegistry::new(source.clone());

    let first = registry.register(&account("alice"));
    let second = registry.register(&account("bob"));
    assert!(Arc::ptr_eq(&first, &second));

    first.ready().await;
    assert_eq!(source.default_calls.load(Ordering::SeqCst), 1);
    assert_eq!(source.custom_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_registration_creates_one_catalog() {
    let source = Arc::new(CountingSource::default());
    let registry = EmojiRegistry::new(source.clone());

    let mut tasks = Vec::new();
    for i in 0..8 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move {
            registry.register(&account(&format!("user{}", i)))
        }));
    }

    let mut catalogs = Vec::new();
    for task in tasks {
        catalogs.push(task.await.unwrap());
    }
    assert!(catalogs.iter().all(|c| Arc::ptr_eq(c, &catalogs[0])));

    catalogs[0].ready().await;
    assert_eq!(source.default_calls.load(Ordering::SeqCst), 1);
    assert_eq!(source.custom_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_render_after_ready() {
    let registry = EmojiRegistry::new(Arc::new(CountingSource::default()));
    let catalog = registry.register(&account("alice"));

    let status = catalog.ready().await;
    assert_eq!(status.default.state, LoadState::Loaded);
    assert_eq!(status.custom.count, 1);

    let style = TextStyle::default();
    let segments = render("hi :blob: world", Some(&*catalog), &[]);
    assert_eq!(
        segments,
        vec![
            Segment::plain("hi ", &style),
            Segment::ImagePlaceholder {
                image_url: "https://example.social/emoji/blob.png".to_string(),
                size: ImageSize::square(30.0),
                source: ":blob:".to_string(),
            },
            Segment::plain(" world", &style),
        ]
    );

    assert_eq!(
        resolve(":grinning:", Some(&*catalog), &[]),
        ResolvedEmoji::Default {
            glyph: "😀".to_string()
        }
    );
    assert_eq!(catalog.categorized_custom()["blobs"].len(), 1);
}
