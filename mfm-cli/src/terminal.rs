//! Terminal rendering of posts.
//!
//! [`HtmlSpans`] turns the pre-transformed fragment into styled ratatui lines and
//! [`SpanHost`] collects a whole rendered post, emoji images included, for printing.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use mfm_engine::markup::LINK_COLOR;
use mfm_engine::{classify_link, pre_transform, HtmlConverter, RichTextHost};
use mfm_types::{Font, ImageSize, LinkKind};
use once_cell::sync::Lazy;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use regex::Regex;
use uuid::Uuid;

/// Stand-in drawn where an inline emoji image sits
pub const IMAGE_PLACEHOLDER: &str = "▣";

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([a-zA-Z]+)((?:\s[^<>]*)?)>").expect("Failed to compile tag regex")
});

static ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z-]+)="([^"]*)""#).expect("Failed to compile attribute regex")
});

static FG_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[;\s])color:\s*(#?[0-9A-Fa-f]{6})").expect("Failed to compile color regex")
});

static BG_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"background-color:\s*(#?[0-9A-Fa-f]{6})").expect("Failed to compile color regex")
});

/// Parse `#RRGGBB` (the `#` is optional)
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn link_color() -> Color {
    parse_hex_color(LINK_COLOR).unwrap_or(Color::Blue)
}

/// A link found while converting, with its visible label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub kind: LinkKind,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct StyledText {
    pub lines: Vec<Line<'static>>,
    pub links: Vec<LinkRef>,
}

/// Accumulates spans into lines, breaking on `\n` and `<br>`
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl LineBuilder {
    fn push(&mut self, text: &str, style: Style) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if !part.is_empty() {
                self.current.push(Span::styled(part.to_string(), style));
            }
        }
    }

    fn break_line(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.break_line();
        self.lines
    }
}

/// Converts the fragment produced by `pre_transform` into ratatui spans.
///
/// Knows `a`, `b`, `s`, `span`, `img` and `br`; any other tag is shown as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSpans;

impl HtmlSpans {
    fn tag_style(&self, name: &str, attrs: &str, current: Style) -> Style {
        let style_attr = attribute(attrs, "style").unwrap_or_default();
        match name {
            "b" => current.add_modifier(Modifier::BOLD),
            "s" => current.add_modifier(Modifier::CROSSED_OUT),
            "a" => {
                let color = capture_color(&FG_COLOR_REGEX, &style_attr).unwrap_or_else(link_color);
                current.fg(color).add_modifier(Modifier::UNDERLINED)
            }
            _ => match capture_color(&BG_COLOR_REGEX, &style_attr) {
                Some(bg) => current.bg(bg).fg(Color::Black),
                None => current,
            },
        }
    }
}

fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTR_REGEX
        .captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .map(|caps| caps[2].to_string())
}

fn capture_color(regex: &Regex, style_attr: &str) -> Option<Color> {
    regex
        .captures(style_attr)
        .and_then(|caps| parse_hex_color(&caps[1]))
}

impl HtmlConverter for HtmlSpans {
    type Output = StyledText;

    fn convert(&self, html: &str, _font: &Font, color_hex: &str) -> StyledText {
        let base = match parse_hex_color(color_hex) {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        };

        let mut builder = LineBuilder::default();
        let mut links: Vec<LinkRef> = Vec::new();
        let mut open_link: Option<usize> = None;
        let mut stack: Vec<(String, Style)> = Vec::new();
        let mut last = 0;

        for caps in TAG_REGEX.captures_iter(html) {
            let Some(tag) = caps.get(0) else { continue };
            let current = stack.last().map(|(_, style)| *style).unwrap_or(base);

            let text = &html[last..tag.start()];
            builder.push(text, current);
            if let Some(index) = open_link {
                links[index].label.push_str(text);
            }
            last = tag.end();

            let closing = &caps[1] == "/";
            let name = caps[2].to_ascii_lowercase();
            let attrs = &caps[3];

            match (closing, name.as_str()) {
                (false, "br") => builder.break_line(),
                (false, "img") => builder.push(IMAGE_PLACEHOLDER, Style::default().fg(link_color())),
                (false, "a" | "b" | "s" | "span") => {
                    if name == "a" {
                        let href = attribute(attrs, "href").unwrap_or_default();
                        let (kind, value) = classify_link(&href);
                        links.push(LinkRef {
                            kind,
                            value,
                            label: String::new(),
                        });
                        open_link = Some(links.len() - 1);
                    }
                    stack.push((name.clone(), self.tag_style(&name, attrs, current)));
                }
                (true, "a" | "b" | "s" | "span") => {
                    if name == "a" {
                        open_link = None;
                    }
                    if let Some(position) = stack.iter().rposition(|(open, _)| *open == name) {
                        stack.truncate(position);
                    }
                }
                _ => builder.push(tag.as_str(), current),
            }
        }

        let current = stack.last().map(|(_, style)| *style).unwrap_or(base);
        builder.push(&html[last..], current);
        if let Some(index) = open_link {
            links[index].label.push_str(&html[last..]);
        }

        StyledText {
            lines: builder.finish(),
            links,
        }
    }
}

/// An inline image slot reserved in a [`SpanHost`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub id: Uuid,
    pub offset: usize,
    pub size: ImageSize,
    pub url: Option<String>,
}

/// What replaces an emoji token once the post has been laid out
#[derive(Debug, Clone)]
enum SlotKind {
    Glyph(String),
    Image,
}

#[derive(Debug, Clone)]
struct Slot {
    token: String,
    kind: SlotKind,
}

impl Slot {
    fn span(&self, style: Style) -> Span<'static> {
        match &self.kind {
            SlotKind::Glyph(glyph) => Span::styled(glyph.clone(), style),
            SlotKind::Image => Span::styled(IMAGE_PLACEHOLDER, style.fg(link_color())),
        }
    }
}

/// Rich-text host that lays a rendered post out as terminal lines.
///
/// The host collects the whole post first. Markup is then applied to the complete
/// text in one pass, so bold, code or links may span emoji, and each emoji token
/// is swapped for its glyph or image slot afterwards. [`SpanHost::plain`] skips
/// the markup pass.
pub struct SpanHost {
    converter: HtmlSpans,
    markup: bool,
    source: String,
    slots: Vec<Slot>,
    images: Vec<PlacedImage>,
    font: Font,
    color_hex: Option<String>,
}

impl SpanHost {
    pub fn new() -> Self {
        Self {
            converter: HtmlSpans,
            markup: true,
            source: String::new(),
            slots: Vec::new(),
            images: Vec::new(),
            font: Font::default(),
            color_hex: None,
        }
    }

    /// A host that shows text exactly as given
    pub fn plain() -> Self {
        Self {
            markup: false,
            ..Self::new()
        }
    }

    pub fn images(&self) -> &[PlacedImage] {
        &self.images
    }

    /// Lay out everything pushed so far
    pub fn layout(&self) -> StyledText {
        let color_hex = self.color_hex.as_deref().unwrap_or("");
        let styled = if self.markup {
            self.converter
                .convert(&pre_transform(&self.source), &self.font, color_hex)
        } else {
            let style = parse_hex_color(color_hex)
                .map(|color| Style::default().fg(color))
                .unwrap_or_default();
            let mut builder = LineBuilder::default();
            builder.push(&self.source, style);
            StyledText {
                lines: builder.finish(),
                links: Vec::new(),
            }
        };

        StyledText {
            lines: fill_slots(styled.lines, &self.slots),
            links: styled.links,
        }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        self.layout().lines
    }

    pub fn links(&self) -> Vec<LinkRef> {
        self.layout().links
    }
}

impl Default for SpanHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextHost for SpanHost {
    type Handle = Uuid;

    fn push_text(&mut self, text: &str, font: &Font, color_hex: &str) {
        if self.color_hex.is_none() {
            self.font = font.clone();
            self.color_hex = Some(color_hex.to_string());
        }
        self.source.push_str(text);
    }

    fn push_glyph(&mut self, glyph: &str, source: &str) {
        self.source.push_str(source);
        self.slots.push(Slot {
            token: source.to_string(),
            kind: SlotKind::Glyph(glyph.to_string()),
        });
    }

    fn place_image(&mut self, offset_hint: usize, size: ImageSize, source: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.images.push(PlacedImage {
            id,
            offset: offset_hint,
            size,
            url: None,
        });
        self.source.push_str(source);
        self.slots.push(Slot {
            token: source.to_string(),
            kind: SlotKind::Image,
        });
        id
    }

    fn bind_image(&mut self, handle: &Uuid, image_url: &str) {
        if let Some(image) = self.images.iter_mut().find(|image| image.id == *handle) {
            image.url = Some(image_url.to_string());
        }
    }
}

/// Replace emoji tokens in laid-out text with their slots, in order.
///
/// A glyph keeps the style of the text around it. A token that markup split apart
/// or swallowed is skipped and stays as written.
fn fill_slots(lines: Vec<Line<'static>>, slots: &[Slot]) -> Vec<Line<'static>> {
    let pieces: Vec<(usize, Style, String)> = lines
        .iter()
        .enumerate()
        .flat_map(|(index, line)| {
            line.spans
                .iter()
                .map(move |span| (index, span.style, span.content.to_string()))
        })
        .collect();

    let mut filled: Vec<Vec<Span<'static>>> = vec![Vec::new(); lines.len()];
    let mut next = 0;

    for (position, (line, style, content)) in pieces.iter().enumerate() {
        let mut rest = content.as_str();

        while let Some(slot) = slots.get(next) {
            if let Some(found) = rest.find(&slot.token) {
                if found > 0 {
                    filled[*line].push(Span::styled(rest[..found].to_string(), *style));
                }
                filled[*line].push(slot.span(*style));
                rest = &rest[found + slot.token.len()..];
                next += 1;
            } else if pieces[position + 1..]
                .iter()
                .any(|(_, _, later)| later.contains(&slot.token))
            {
                break;
            } else {
                next += 1;
            }
        }

        if !rest.is_empty() {
            filled[*line].push(Span::styled(rest.to_string(), *style));
        }
    }

    filled.into_iter().map(Line::from).collect()
}

fn term_color(color: Color) -> Option<TermColor> {
    match color {
        Color::Rgb(r, g, b) => Some(TermColor::Rgb { r, g, b }),
        Color::Black => Some(TermColor::Black),
        Color::Blue => Some(TermColor::Blue),
        _ => None,
    }
}

/// Write lines to `out`, with colors and attributes when `styled`
pub fn print_lines<W: Write>(out: &mut W, lines: &[Line<'_>], styled: bool) -> io::Result<()> {
    for line in lines {
        for span in &line.spans {
            if styled {
                if let Some(fg) = span.style.fg.and_then(term_color) {
                    queue!(out, SetForegroundColor(fg))?;
                }
                if let Some(bg) = span.style.bg.and_then(term_color) {
                    queue!(out, SetBackgroundColor(bg))?;
                }
                let modifiers = span.style.add_modifier;
                if modifiers.contains(Modifier::BOLD) {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if modifiers.contains(Modifier::UNDERLINED) {
                    queue!(out, SetAttribute(Attribute::Underlined))?;
                }
                if modifiers.contains(Modifier::CROSSED_OUT) {
                    queue!(out, SetAttribute(Attribute::CrossedOut))?;
                }
            }
            queue!(out, Print(span.content.as_ref()))?;
            if styled {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}
