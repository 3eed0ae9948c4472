use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::magic::{protect, Sentinel};

/// Colour of every generated anchor, without its leading `#`
pub const LINK_COLOR: &str = "2F7CF6";

/// Markdown-style `[label](url)` links, or bare `http(s)://` URLs.
///
/// The bare-URL class is deliberately permissive and includes `"`, so a URL sitting
/// inside an existing `href="..."` ends with a quote and is left alone.
static LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[([^\]]+)\]\(([^)]+)\)|(https?://[\w/:%#$&?(~.=+\-@"]+)"#)
        .expect("Failed to compile link regex")
});

/// `<https://...>` autolinks end up as an anchor wrapped in a second pair of brackets
static DOUBLED_ANCHOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(<a [^>]*>[^<]*</a>)>").expect("Failed to compile anchor cleanup regex")
});

/// Build a styled anchor. `href` and `label` are inserted as given.
pub(crate) fn anchor(href: &str, label: &str) -> String {
    format!(
        "<a style=\"color: {}{};\" href=\"{}\">{}</a>",
        Sentinel::Hash.token(),
        LINK_COLOR,
        href,
        label
    )
}

/// Turn markdown links and bare URLs into anchors.
///
/// `@` and `#` inside every generated URL are replaced with sentinels so the mention
/// and hashtag passes do not link them a second time.
pub fn hyper_link(text: &str) -> String {
    let linked = LINK_REGEX.replace_all(text, |caps: &Captures<'_>| {
        if let (Some(label), Some(url)) = (caps.get(1), caps.get(2)) {
            return anchor(&protect(url.as_str()), label.as_str());
        }

        let url = &caps[3];
        if url.ends_with('"') {
            return url.to_string();
        }

        let protected = protect(url);
        anchor(&protected, &protected)
    });

    DOUBLED_ANCHOR_REGEX.replace_all(&linked, "$1").into_owned()
}
