//! Mood / location labels and tag resolution
//!
//! The fixed label sets drive both the UI selection and the chat keyword
//! matching, so they are ordered: scanning follows declaration order and
//! is deterministic.

/// Fallback tag for labels outside the fixed sets
pub const DEFAULT_TAG: &str = "pop";

/// Mood labels selectable in the UI and matched in chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
    Calm,
    Energetic,
}

/// All moods, in scan order
pub const MOODS: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Calm, Mood::Energetic];

impl Mood {
    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Calm => "Calm",
            Mood::Energetic => "Energetic",
        }
    }

    /// Last.fm query tag mapped to this mood
    pub fn tag(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Calm => "chill",
            Mood::Energetic => "energetic",
        }
    }

    /// Parse a label, case-insensitively
    pub fn parse(s: &str) -> Option<Mood> {
        MOODS.into_iter().find(|m| m.label().eq_ignore_ascii_case(s))
    }
}

/// Location labels produced by the classifier and matched in chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Beach,
    City,
    Forest,
    Mountain,
}

/// All locations, in scan order
pub const LOCATIONS: [Location; 4] = [
    Location::Beach,
    Location::City,
    Location::Forest,
    Location::Mountain,
];

impl Location {
    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Location::Beach => "Beach",
            Location::City => "City",
            Location::Forest => "Forest",
            Location::Mountain => "Mountain",
        }
    }

    /// Last.fm query tag mapped to this location
    pub fn tag(&self) -> &'static str {
        match self {
            Location::Beach => "tropical",
            Location::City => "urban",
            Location::Forest => "acoustic",
            Location::Mountain => "folk",
        }
    }

    /// Parse a label, case-insensitively
    pub fn parse(s: &str) -> Option<Location> {
        LOCATIONS
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(s))
    }
}

/// Resolve a client-supplied mood label to a query tag, with the optional
/// free-text genre filter appended. Unknown labels fall back to
/// [`DEFAULT_TAG`]; the genre passes through unvalidated.
pub fn resolve_mood_tag(label: &str, genre: Option<&str>) -> String {
    let base = Mood::parse(label).map(|m| m.tag()).unwrap_or(DEFAULT_TAG);
    match genre {
        Some(g) if !g.is_empty() => with_genre(base, g),
        _ => base.to_string(),
    }
}

/// Append a genre filter to a base tag.
///
/// Whitespace inside the genre becomes the `+` delimiter, matching the
/// query syntax the lookup API expects.
pub fn with_genre(base: &str, genre: &str) -> String {
    format!("{}+{}", base, genre.replace(char::is_whitespace, "+"))
}

/// A keyword hit in a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    Mood(Mood),
    Location(Location),
}

/// Scan a chat message for the first mood or location label it contains.
///
/// Case-insensitive substring match; moods are checked before locations
/// and the first hit wins.
pub fn scan_message(message: &str) -> Option<LabelMatch> {
    let lowered = message.to_lowercase();

    for mood in MOODS {
        if lowered.contains(&mood.label().to_ascii_lowercase()) {
            return Some(LabelMatch::Mood(mood));
        }
    }

    for location in LOCATIONS {
        if lowered.contains(&location.label().to_ascii_lowercase()) {
            return Some(LabelMatch::Location(location));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_moods_map_to_exact_tags() {
        assert_eq!(resolve_mood_tag("Happy", None), "happy");
        assert_eq!(resolve_mood_tag("Sad", None), "sad");
        assert_eq!(resolve_mood_tag("Calm", None), "chill");
        assert_eq!(resolve_mood_tag("Energetic", None), "energetic");
    }

    #[test]
    fn unknown_mood_falls_back_to_default() {
        assert_eq!(resolve_mood_tag("Melancholic", None), DEFAULT_TAG);
        assert_eq!(resolve_mood_tag("", None), DEFAULT_TAG);
    }

    #[test]
    fn location_tags_match_fixed_mapping() {
        assert_eq!(Location::Beach.tag(), "tropical");
        assert_eq!(Location::City.tag(), "urban");
        assert_eq!(Location::Forest.tag(), "acoustic");
        assert_eq!(Location::Mountain.tag(), "folk");
    }

    #[test]
    fn genre_joins_with_single_delimiter() {
        assert_eq!(resolve_mood_tag("Calm", Some("jazz")), "chill+jazz");
    }

    #[test]
    fn genre_whitespace_becomes_delimiter() {
        assert_eq!(resolve_mood_tag("Happy", Some("indie rock")), "happy+indie+rock");
        assert_eq!(with_genre("sad", "trip\thop"), "sad+trip+hop");
    }

    #[test]
    fn empty_genre_is_ignored() {
        assert_eq!(resolve_mood_tag("Happy", Some("")), "happy");
        assert_eq!(resolve_mood_tag("Happy", None), "happy");
    }

    #[test]
    fn scan_matches_mood_case_insensitively() {
        assert_eq!(
            scan_message("I feel happy today"),
            Some(LabelMatch::Mood(Mood::Happy))
        );
        assert_eq!(
            scan_message("SO SAD right now"),
            Some(LabelMatch::Mood(Mood::Sad))
        );
    }

    #[test]
    fn scan_prefers_mood_over_location() {
        // "happy" and "beach" both present, the mood table is scanned first
        assert_eq!(
            scan_message("happy day at the beach"),
            Some(LabelMatch::Mood(Mood::Happy))
        );
    }

    #[test]
    fn scan_matches_location_when_no_mood_present() {
        assert_eq!(
            scan_message("off to the mountain cabin"),
            Some(LabelMatch::Location(Location::Mountain))
        );
    }

    #[test]
    fn scan_returns_none_without_keywords() {
        assert_eq!(scan_message("recommend me something"), None);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Mood::parse("energetic"), Some(Mood::Energetic));
        assert_eq!(Location::parse("FOREST"), Some(Location::Forest));
        assert_eq!(Mood::parse("Beach"), None);
    }
}
