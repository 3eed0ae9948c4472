use mfm_types::{ExternalEmoji, ResolvedEmoji};

use crate::alias::non_colon_glyph;
use crate::catalog::EmojiCatalog;

/// Does `token` refer to the emoji called `name`?
///
/// Accepts `:name:`, a bare `name`, or any token that equals `name` once all of its
/// colons are removed. Comparison is case-sensitive.
pub fn matches_shortcode(name: &str, token: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    let wrapped = token
        .strip_prefix(':')
        .and_then(|rest| rest.strip_suffix(':'))
        .is_some_and(|inner| inner == name);

    wrapped || token == name || token.replace(':', "") == name
}

/// Resolve a shortcode token against the instance catalog, then the external list.
///
/// Priority: non-colon alias, default set, custom set, external emoji. Without a
/// catalog only the external list is consulted.
pub fn resolve(
    token: &str,
    catalog: Option<&EmojiCatalog>,
    external: &[ExternalEmoji],
) -> ResolvedEmoji {
    let local = encode(token, catalog);
    if local.is_resolved() {
        return local;
    }

    external
        .iter()
        .find(|emoji| matches_shortcode(&emoji.name, token))
        .map(|emoji| ResolvedEmoji::Custom {
            image_url: emoji.url.clone(),
        })
        .unwrap_or(ResolvedEmoji::Unresolved)
}

/// Resolve a token against the instance catalog only
pub fn encode(token: &str, catalog: Option<&EmojiCatalog>) -> ResolvedEmoji {
    let Some(catalog) = catalog else {
        return ResolvedEmoji::Unresolved;
    };

    if let Some(glyph) = non_colon_glyph(token) {
        return ResolvedEmoji::NonColon {
            glyph: glyph.to_string(),
        };
    }

    if let Some(emoji) = catalog.find_default(|emoji| matches_shortcode(&emoji.name, token)) {
        return ResolvedEmoji::Default { glyph: emoji.glyph };
    }

    if let Some(emoji) = catalog.find_custom(|emoji| matches_shortcode(&emoji.name, token)) {
        return ResolvedEmoji::Custom {
            image_url: emoji.url,
        };
    }

    ResolvedEmoji::Unresolved
}
