/// Bundled default emoji set.
///
/// Misskey servers never serve the Unicode set, so it ships with the client, built
/// from the `emojis` crate's table and keyed by the first gemoji shortcode.
use emojis::Group;
use mfm_types::DefaultEmoji;

/// Category name used by Misskey's own emoji picker for a Unicode group
fn group_category(group: Group) -> Option<&'static str> {
    match group {
        Group::SmileysAndEmotion => Some("face"),
        Group::PeopleAndBody => Some("people"),
        Group::AnimalsAndNature => Some("animals_and_nature"),
        Group::FoodAndDrink => Some("food_and_drink"),
        Group::TravelAndPlaces => Some("travel_and_places"),
        Group::Activities => Some("activity"),
        Group::Objects => Some("objects"),
        Group::Symbols => Some("symbols"),
        Group::Flags => Some("flags"),
        // skin tones and hair components land in "Others"
        _ => None,
    }
}

/// Every bundled emoji that has a shortcode, in Unicode order
pub fn bundled_default_emojis() -> Vec<DefaultEmoji> {
    emojis::iter()
        .filter_map(|emoji| {
            let name = emoji.shortcode()?;
            let mut default = DefaultEmoji::new(name, emoji.as_str(), group_category(emoji.group()));
            default.keywords = emoji
                .shortcodes()
                .filter(|shortcode| *shortcode != name)
                .map(str::to_string)
                .collect();
            Some(default)
        })
        .collect()
}
