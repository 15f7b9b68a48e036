//! Wiki slug normalization
//!
//! Turns display names ("Beat of Black & White") into the lowercase hyphenated
//! directory tokens the wiki uses ("beat-of-black-and-white"), and namespaces
//! them by kind (`track:`, `artist:`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Namespace prefix for track identifiers
pub const TRACK_PREFIX: &str = "track:";

/// Namespace prefix for artist identifiers
pub const ARTIST_PREFIX: &str = "artist:";

/// Display names the wiki never case-folds
const LITERAL_SLUGS: [&str; 2] = ["MeGaLoVania", "iRRRRRRRRECONCILA8LE"];

static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\-]").expect("valid slug character class"));

static REPEATED_HYPHENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-{2,}").expect("valid hyphen run pattern"));

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthetical pattern"));

/// Normalize a display string into a wiki slug.
///
/// Spaces become hyphens, `&` becomes `and`, everything outside
/// `[A-Za-z0-9-]` is dropped, hyphen runs collapse to one, leading and
/// trailing hyphens are trimmed and the result is lowercased.
///
/// # Examples
///
/// ```
/// use motif_common::slug::normalize_wiki_string;
///
/// assert_eq!(normalize_wiki_string("Beat of Black & White"), "beat-of-black-and-white");
/// assert_eq!(normalize_wiki_string("  --Weird--  "), "weird");
/// assert_eq!(normalize_wiki_string("MeGaLoVania"), "MeGaLoVania");
/// ```
pub fn normalize_wiki_string(display: &str) -> String {
    if LITERAL_SLUGS.contains(&display) {
        return display.to_string();
    }

    let hyphenated = display.split(' ').collect::<Vec<_>>().join("-");
    let hyphenated = hyphenated.replace('&', "and");
    let stripped = DISALLOWED_CHARS.replace_all(&hyphenated, "");
    let collapsed = REPEATED_HYPHENS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_lowercase()
}

/// `track:`-namespaced slug for a display name
pub fn track_slug(display: &str) -> String {
    format!("{}{}", TRACK_PREFIX, normalize_wiki_string(display))
}

/// Resolve an artist credit to an `artist:` identifier.
///
/// Credits already carrying the prefix pass through untouched. Others lose
/// any parenthetical annotation ("Toby Fox (arrangement)") before slugging.
pub fn artist_slug(credit: &str) -> String {
    if credit.starts_with(ARTIST_PREFIX) {
        return credit.to_string();
    }
    let bare = PARENTHETICAL.replace_all(credit, "");
    format!("{}{}", ARTIST_PREFIX, normalize_wiki_string(bare.trim()))
}
