use serde::{Deserialize, Serialize};

/// Outcome of resolving one shortcode token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedEmoji {
    /// Built-in Unicode emoji from the instance's default set
    Default { glyph: String },
    /// Image-backed emoji, either the instance's own or an external one
    Custom { image_url: String },
    /// One of the legacy reaction names usable without colons
    NonColon { glyph: String },
    Unresolved,
}

impl ResolvedEmoji {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ResolvedEmoji::Unresolved)
    }

    /// The glyph to print, for the variants rendered as ordinary text
    pub fn glyph(&self) -> Option<&str> {
        match self {
            ResolvedEmoji::Default { glyph } | ResolvedEmoji::NonColon { glyph } => Some(glyph),
            _ => None,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            ResolvedEmoji::Custom { image_url } => Some(image_url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Helvetica".to_string(),
            size: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f32,
    pub height: f32,
}

impl ImageSize {
    pub fn square(side: f32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// Styling applied to every plain-text run of a render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: Font,
    pub color_hex: String,
    /// Side length of inline custom emoji images
    pub line_height: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: Font::default(),
            color_hex: "#000000".to_string(),
            line_height: 30.0,
        }
    }
}

/// One unit of renderer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    PlainText {
        text: String,
        font: Font,
        color_hex: String,
    },
    /// A default or non-colon emoji, rendered as ordinary text
    LiteralGlyph { text: String, source: String },
    /// A custom emoji; the host binds an image view here later
    ImagePlaceholder {
        image_url: String,
        size: ImageSize,
        source: String,
    },
}

impl Segment {
    pub fn plain(text: impl Into<String>, style: &TextStyle) -> Self {
        Segment::PlainText {
            text: text.into(),
            font: style.font.clone(),
            color_hex: style.color_hex.clone(),
        }
    }

    /// Text a reader sees; empty for image placeholders
    pub fn visible_text(&self) -> &str {
        match self {
            Segment::PlainText { text, .. } | Segment::LiteralGlyph { text, .. } => text,
            Segment::ImagePlaceholder { .. } => "",
        }
    }

    /// The characters of the original post this segment stands for
    pub fn source_text(&self) -> &str {
        match self {
            Segment::PlainText { text, .. } => text,
            Segment::LiteralGlyph { source, .. } | Segment::ImagePlaceholder { source, .. } => {
                source
            }
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Segment::PlainText { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_serializes_with_type_tag() {
        let segment = Segment::ImagePlaceholder {
            image_url: "https://example.social/emoji/blob.png".to_string(),
            size: ImageSize::square(30.0),
            source: ":blob:".to_string(),
        };

        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["type"], "image_placeholder");
        assert_eq!(json["size"]["width"], 30.0);
    }

    #[test]
    fn test_resolved_accessors() {
        let glyph = ResolvedEmoji::NonColon {
            glyph: "👍".to_string(),
        };
        assert_eq!(glyph.glyph(), Some("👍"));
        assert_eq!(glyph.image_url(), None);
        assert!(!ResolvedEmoji::Unresolved.is_resolved());
    }

    #[test]
    fn test_source_and_visible_text() {
        let style = TextStyle::default();
        let plain = Segment::plain("hi ", &style);
        let glyph = Segment::LiteralGlyph {
            text: "😀".to_string(),
            source: ":grinning:".to_string(),
        };

        assert_eq!(plain.visible_text(), plain.source_text());
        assert_eq!(glyph.visible_text(), "😀");
        assert_eq!(glyph.source_text(), ":grinning:");
    }
}
