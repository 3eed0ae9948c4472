/// Private-use stand-ins for characters that later passes would otherwise pick up.
///
/// `@` and `#` inside generated URLs (and in the anchors' own `color: #...` styles)
/// are swapped for these before mention and hashtag linking run, then swapped back by
/// [`dehyper_magic`] as the very last pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    At,
    Hash,
}

impl Sentinel {
    pub const ALL: [Sentinel; 2] = [Sentinel::At, Sentinel::Hash];

    pub const fn token(self) -> &'static str {
        match self {
            Sentinel::At => "\u{E000}at\u{E001}",
            Sentinel::Hash => "\u{E000}hash\u{E001}",
        }
    }

    pub const fn literal(self) -> char {
        match self {
            Sentinel::At => '@',
            Sentinel::Hash => '#',
        }
    }
}

/// Replace every `@` and `#` with its sentinel
pub fn protect(text: &str) -> String {
    let mut protected = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '@' => protected.push_str(Sentinel::At.token()),
            '#' => protected.push_str(Sentinel::Hash.token()),
            _ => protected.push(ch),
        }
    }
    protected
}

/// Restore literal `@` and `#` from their sentinels
pub fn dehyper_magic(text: &str) -> String {
    Sentinel::ALL.iter().fold(text.to_string(), |acc, sentinel| {
        acc.replace(sentinel.token(), sentinel.literal().encode_utf8(&mut [0; 4]))
    })
}
