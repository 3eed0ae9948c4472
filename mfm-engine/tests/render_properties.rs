// Property tests for segment rendering and the pre-transform pass

use mfm_engine::markup::Sentinel;
use mfm_engine::{pre_transform, render, EmojiCatalog};
use mfm_types::{CustomEmoji, DefaultEmoji, ExternalEmoji, InstanceHost, Segment};
use proptest::prelude::*;

fn catalog() -> EmojiCatalog {
    EmojiCatalog::with_emojis(
        InstanceHost::parse("example.social").unwrap(),
        vec![
            DefaultEmoji::new("grinning", "😀", Some("people")),
            DefaultEmoji::new("blob", "🫧", None),
        ],
        vec![
            CustomEmoji::new("blob", "https://example.social/emoji/blob.png", None),
            CustomEmoji::new("party", "https://example.social/emoji/party.gif", Some("fun")),
            CustomEmoji::new("like", "https://example.social/emoji/like.png", None),
        ],
    )
}

fn external() -> Vec<ExternalEmoji> {
    vec![ExternalEmoji::new("remote", "https://other.social/remote.png")]
}

/// Post-like text: words, whitespace, stray colons and a few known shortcodes
fn post_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-zA-Zあ-ん0-9 ]{0,8}",
        Just(":".to_string()),
        Just("\n".to_string()),
        Just(":blob:".to_string()),
        Just(":party:".to_string()),
        Just(":grinning:".to_string()),
        Just(":remote:".to_string()),
        Just(":like:".to_string()),
        Just(":unknown:".to_string()),
    ];
    prop::collection::vec(piece, 0..12).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn plain_text_is_a_single_segment(text in "[^:]{0,64}") {
        let segments = render(&text, Some(&catalog()), &external());

        prop_assert_eq!(segments.len(), 1);
        prop_assert!(segments[0].is_plain());
        prop_assert_eq!(segments[0].visible_text(), text.as_str());
    }

    #[test]
    fn segments_reconstruct_original(text in post_text()) {
        let segments = render(&text, Some(&catalog()), &external());
        let rebuilt: String = segments.iter().map(Segment::source_text).collect();

        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn no_empty_plain_runs_between_emoji(text in post_text()) {
        let segments = render(&text, Some(&catalog()), &external());
        if segments.len() > 1 {
            prop_assert!(segments.iter().all(|s| !s.source_text().is_empty()));
        }
    }

    #[test]
    fn pre_transform_never_leaks_sentinels(text in "[ -~]{0,64}") {
        let html = pre_transform(&text);
        for sentinel in Sentinel::ALL {
            prop_assert!(!html.contains(sentinel.token()));
        }
    }
}

#[test]
fn default_emoji_wins_over_custom_in_render() {
    let segments = render(":blob:", Some(&catalog()), &[]);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].visible_text(), "🫧");
}

#[test]
fn non_colon_alias_wins_in_render() {
    let segments = render("nice :like:", Some(&catalog()), &[]);
    assert_eq!(segments[1].visible_text(), "👍");
}
