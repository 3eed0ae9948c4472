use once_cell::sync::Lazy;
use regex::Regex;

/// Decorative MFM tags whose markers are dropped while their content is kept
pub const DISABLED_TAGS: [&str; 5] = ["motion", "flip", "spin", "jump", "small"];

/// Symbolic wrapper pairs dropped the same way
pub const DISABLED_MARKERS: [(&str, &str); 2] = [("***", "***"), ("(((", ")))")];

const CODE_STYLE: &str = "font-family: Menlo, monospace; background-color: #F4F4F4;";

static BOLD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Failed to compile bold regex"));

static STRIKE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~~([^~]+)~~").expect("Failed to compile strikethrough regex"));

static CODE_BLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(.+?)```").expect("Failed to compile code block regex"));

static INLINE_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("Failed to compile inline code regex"));

/// Strip the decorative tags and wrapper markers. Naive replace: no nesting, no balancing.
pub fn disabling_tags(text: &str) -> String {
    let mut result = text.to_string();

    for tag in DISABLED_TAGS {
        result = result
            .replace(&format!("<{}>", tag), "")
            .replace(&format!("</{}>", tag), "");
    }

    for (open, close) in DISABLED_MARKERS {
        result = result.replace(open, "").replace(close, "");
    }

    result
}

/// Disable decorative tags, then translate bold, strikethrough and code
pub fn markdown(text: &str) -> String {
    let stripped = disabling_tags(text);
    let bold = BOLD_REGEX.replace_all(&stripped, "<b>$1</b>");
    let struck = STRIKE_REGEX.replace_all(&bold, "<s>$1</s>");

    let block = CODE_BLOCK_REGEX.replace_all(
        &struck,
        format!("<span style=\"{} white-space: pre;\">$1</span>", CODE_STYLE).as_str(),
    );

    INLINE_CODE_REGEX
        .replace_all(&block, format!("<span style=\"{}\">$1</span>", CODE_STYLE).as_str())
        .into_owned()
}
