/// Mention linking for post text
/// Turns @username and @username@host runs into user links
use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::link::anchor;

/// Href prefix of links produced for mentions
pub const USER_LINK_PREFIX: &str = "mfm://user/";

/// Get the compiled regex for mention linking
fn mention_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        // Letters, digits, underscores and dots, plus @ so remote users keep their host
        Regex::new(r"@[a-zA-Z0-9_.@]+").expect("Failed to compile mention regex")
    })
}

/// Link every @mention to the synthetic user scheme, carrying the matched text as path
pub fn hyper_user(text: &str) -> String {
    mention_regex()
        .replace_all(text, |caps: &Captures<'_>| {
            let mention = &caps[0];
            anchor(&format!("{}{}", USER_LINK_PREFIX, mention), mention)
        })
        .into_owned()
}
