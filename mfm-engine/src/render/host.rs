use mfm_types::{Font, ImageSize, Segment};

/// A rich-text surface that can host inline image views ("attachments").
///
/// Offsets count characters of text already pushed, with every placed image
/// occupying one slot.
pub trait RichTextHost {
    type Handle;

    fn push_text(&mut self, text: &str, font: &Font, color_hex: &str);

    /// A resolved default or non-colon emoji, laid out as ordinary text.
    /// `source` is the shortcode it stands for.
    fn push_glyph(&mut self, glyph: &str, source: &str);

    /// Reserve room for an inline image at `offset_hint`, in place of `source`
    fn place_image(&mut self, offset_hint: usize, size: ImageSize, source: &str) -> Self::Handle;

    /// Point a placed image at its source; loading it is up to the host
    fn bind_image(&mut self, handle: &Self::Handle, image_url: &str);
}

/// Converts the pre-transformed HTML-ish fragment into the host's rich text
pub trait HtmlConverter {
    type Output;

    fn convert(&self, html: &str, font: &Font, color_hex: &str) -> Self::Output;
}

/// Hand a rendered segment list to `host`, returning image handles in order
pub fn attach<H: RichTextHost>(segments: &[Segment], host: &mut H) -> Vec<H::Handle> {
    let mut offset = 0;
    let mut handles = Vec::new();

    for segment in segments {
        match segment {
            Segment::PlainText {
                text,
                font,
                color_hex,
            } => {
                host.push_text(text, font, color_hex);
                offset += text.chars().count();
            }
            Segment::LiteralGlyph { text, source } => {
                host.push_glyph(text, source);
                offset += text.chars().count();
            }
            Segment::ImagePlaceholder {
                image_url,
                size,
                source,
            } => {
                let handle = host.place_image(offset, *size, source);
                host.bind_image(&handle, image_url);
                handles.push(handle);
                offset += 1;
            }
        }
    }

    handles
}
