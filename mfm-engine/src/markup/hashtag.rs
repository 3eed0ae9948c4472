use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::link::anchor;

/// Href prefix of links produced for hashtags
pub const HASHTAG_LINK_PREFIX: &str = "mfm://hashtag/";

/// Regex pattern for matching hashtags
/// Matches: # followed by anything up to whitespace or a comma
static HASHTAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[^\s,]+").expect("Failed to compile hashtag regex"));

/// Link every #hashtag to the synthetic hashtag scheme
///
/// # Examples
///
/// ```
/// use mfm_engine::markup::{dehyper_magic, hyper_hashtag};
/// let linked = dehyper_magic(&hyper_hashtag("learning #rust"));
/// assert!(linked.contains("href=\"mfm://hashtag/#rust\""));
/// ```
pub fn hyper_hashtag(text: &str) -> String {
    HASHTAG_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            let tag = &caps[0];
            anchor(&format!("{}{}", HASHTAG_LINK_PREFIX, tag), tag)
        })
        .into_owned()
}
