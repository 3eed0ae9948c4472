use std::collections::HashMap;

/// Legacy reaction names that older servers accept without surrounding colons
pub const NON_COLON_ALIASES: [(&str, &str); 11] = [
    ("like", "👍"),
    ("love", "❤️"),
    ("laugh", "😆"),
    ("hmm", "🤔"),
    ("surprise", "😮"),
    ("congrats", "🎉"),
    ("angry", "💢"),
    ("confused", "😥"),
    ("rip", "😇"),
    ("pudding", "🍮"),
    ("star", "⭐"),
];

lazy_static::lazy_static! {
    static ref ALIAS_TABLE: HashMap<&'static str, &'static str> =
        NON_COLON_ALIASES.iter().copied().collect();
}

/// Look up a token in the alias table after stripping one pair of surrounding colons
pub fn non_colon_glyph(token: &str) -> Option<&'static str> {
    let bare = token
        .strip_prefix(':')
        .and_then(|rest| rest.strip_suffix(':'))
        .unwrap_or(token);

    ALIAS_TABLE.get(bare).copied()
}
