use mfm_types::LinkKind;

use super::hashtag::HASHTAG_LINK_PREFIX;
use super::mention::USER_LINK_PREFIX;

/// Sort an anchor href produced by the preprocessor back into what was tapped.
///
/// User and hashtag links yield the mention (`@alice@host`) or tag (`#rust`) they were
/// built from, percent-decoded in case the rich-text layer escaped them. Anything
/// else is an ordinary URL and comes back unchanged.
pub fn classify_link(href: &str) -> (LinkKind, String) {
    let prefixes = [
        (USER_LINK_PREFIX, LinkKind::User),
        (HASHTAG_LINK_PREFIX, LinkKind::Hashtag),
    ];

    for (prefix, kind) in prefixes {
        let Some(value) = strip_prefix_ignore_case(href, prefix) else {
            continue;
        };
        if value.is_empty() {
            break;
        }

        let decoded = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        return (kind, decoded);
    }

    (LinkKind::Url, href.to_string())
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}
