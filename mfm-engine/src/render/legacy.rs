use mfm_types::{ExternalEmoji, ResolvedEmoji};

use super::scan_shortcodes;
use crate::catalog::EmojiCatalog;
use crate::resolver::resolve;

/// Width and height of inline `<img>` tags in the flattened encoding
pub const LEGACY_IMAGE_SIZE: u32 = 30;

/// Flatten emoji into an HTML string instead of a segment list.
///
/// Default emoji become their glyph and custom emoji an inline `<img>`; every
/// occurrence of a resolved token is replaced. Non-colon aliases and unresolved
/// tokens are left as written.
pub fn legacy_encode(
    text: &str,
    catalog: Option<&EmojiCatalog>,
    external: &[ExternalEmoji],
) -> String {
    let mut encoded = text.to_string();

    for target in scan_shortcodes(text) {
        match resolve(&target, catalog, external) {
            ResolvedEmoji::Default { glyph } => {
                encoded = encoded.replace(&target, &glyph);
            }
            ResolvedEmoji::Custom { image_url } => {
                let img = format!(
                    "<img width=\"{size}\" height=\"{size}\" src=\"{}\">",
                    image_url,
                    size = LEGACY_IMAGE_SIZE
                );
                encoded = encoded.replace(&target, &img);
            }
            ResolvedEmoji::NonColon { .. } | ResolvedEmoji::Unresolved => {}
        }
    }

    encoded
}
