//! Emoji-aware segmentation of the original (untransformed) post text.

mod host;
mod legacy;

pub use host::{attach, HtmlConverter, RichTextHost};
pub use legacy::{legacy_encode, LEGACY_IMAGE_SIZE};

use once_cell::sync::Lazy;
use regex::Regex;

use mfm_types::{ExternalEmoji, ImageSize, ResolvedEmoji, Segment, TextStyle};

use crate::catalog::EmojiCatalog;
use crate::resolver::resolve;

/// A `:shortcode:` candidate: no whitespace and no inner colon
static SHORTCODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":[^\s:]+:").expect("Failed to compile shortcode regex"));

/// Every shortcode-shaped token in `text`, left to right
pub fn scan_shortcodes(text: &str) -> Vec<String> {
    SHORTCODE_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Splits one post at its emoji.
///
/// The token scan happens once, so the same renderer can be rendered again with a
/// different style or catalog.
#[derive(Debug, Clone)]
pub struct SegmentRenderer {
    original: String,
    targets: Vec<String>,
}

impl SegmentRenderer {
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let targets = scan_shortcodes(&original);
        Self { original, targets }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Shortcode candidates found in the original text
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Produce the ordered segment list.
    ///
    /// Unresolved tokens stay inside the surrounding plain text. Empty plain runs
    /// are skipped, except that a render always yields at least one segment.
    pub fn render(
        &self,
        style: &TextStyle,
        catalog: Option<&EmojiCatalog>,
        external: &[ExternalEmoji],
    ) -> Vec<Segment> {
        let mut output = Vec::new();
        let mut rest = self.original.as_str();

        for target in &self.targets {
            let segment = match resolve(target, catalog, external) {
                ResolvedEmoji::Custom { image_url } => Segment::ImagePlaceholder {
                    image_url,
                    size: ImageSize::square(style.line_height),
                    source: target.clone(),
                },
                ResolvedEmoji::Default { glyph } | ResolvedEmoji::NonColon { glyph } => {
                    Segment::LiteralGlyph {
                        text: glyph,
                        source: target.clone(),
                    }
                }
                ResolvedEmoji::Unresolved => continue,
            };
            let Some(position) = rest.find(target.as_str()) else {
                continue;
            };

            let before = &rest[..position];
            if !before.is_empty() {
                output.push(Segment::plain(before, style));
            }
            output.push(segment);

            rest = &rest[position + target.len()..];
        }

        if !rest.is_empty() || output.is_empty() {
            output.push(Segment::plain(rest, style));
        }

        tracing::trace!(
            targets = self.targets.len(),
            segments = output.len(),
            "rendered post"
        );
        output
    }
}

/// Render `text` with the default style
pub fn render(
    text: &str,
    catalog: Option<&EmojiCatalog>,
    external: &[ExternalEmoji],
) -> Vec<Segment> {
    SegmentRenderer::new(text).render(&TextStyle::default(), catalog, external)
}
