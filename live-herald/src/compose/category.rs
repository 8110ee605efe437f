/// Label used when a stream reports no category.
pub const EMPTY_CATEGORY_LABEL: &str = "some games";

/// Official category names that have a well-known short tag.
const CATEGORY_TAGS: &[(&str, &str)] = &[
    ("Hearthstone: Heroes of Warcraft", "#Hearthstone"),
    ("Hearthstone", "#Hearthstone"),
    ("Counter-Strike: Global Offensive", "#CSGO"),
    ("Counter-Strike 2", "#CS2"),
    ("Return to Castle Wolfenstein", "#RTCW"),
    ("Call of Duty 4: Modern Warfare", "#CoD4"),
    ("Team Fortress 2", "#TF2"),
    ("World of Warcraft", "#WoW"),
    ("Overwatch", "#Overwatch"),
    ("Overwatch 2", "#Overwatch2"),
    ("Quake Live", "#QuakeLive"),
    ("Quake Champions", "#QuakeChampions"),
    ("League of Legends", "#LoL"),
];

/// Shorten a category to its hashtag form.
///
/// Unknown categories are returned unchanged; an empty one becomes
/// [`EMPTY_CATEGORY_LABEL`].
pub fn short_category(category: &str) -> &str {
    let category = category.trim();
    if category.is_empty() {
        return EMPTY_CATEGORY_LABEL;
    }

    CATEGORY_TAGS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, tag)| *tag)
        .unwrap_or(category)
}
