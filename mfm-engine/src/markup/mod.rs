//! MFM pre-transform: raw post text to an HTML-ish fragment.
//!
//! Passes run in a fixed order and each one sees the previous one's output. Links
//! go first so that `@` and `#` inside URLs can be hidden behind sentinels before the
//! mention and hashtag passes look for them; the sentinels are restored last.
//! Emoji are not touched here, see [`crate::render`].

mod classify;
mod hashtag;
mod link;
mod magic;
mod markdown;
mod mention;

pub use classify::classify_link;
pub use hashtag::{hyper_hashtag, HASHTAG_LINK_PREFIX};
pub use link::{hyper_link, LINK_COLOR};
pub use magic::{dehyper_magic, Sentinel};
pub use markdown::{disabling_tags, markdown, DISABLED_MARKERS, DISABLED_TAGS};
pub use mention::{hyper_user, USER_LINK_PREFIX};

/// Linkify, apply markdown, and restore protected characters
pub fn pre_transform(text: &str) -> String {
    let transformed = hyper_link(text);
    let transformed = hyper_user(&transformed);
    let transformed = hyper_hashtag(&transformed);
    let transformed = markdown(&transformed);
    dehyper_magic(&transformed)
}
