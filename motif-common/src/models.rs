//! Catalog records and game data models
//!
//! Catalog records mirror the wiki's per-album YAML documents. Game data
//! models are the JSON artifacts served to the daily game.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// One YAML document from a per-album catalog file.
///
/// The album header and the track entries share the same field vocabulary,
/// so a single record type covers both. A document is the album header when
/// it carries `Album`, and a track when it carries `Track`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogRecord {
    #[serde(rename = "Album", default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    #[serde(rename = "Groups", default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,

    #[serde(rename = "Has Track Art", default, skip_serializing_if = "Option::is_none")]
    pub has_track_art: Option<bool>,

    #[serde(rename = "Has Cover Art", default, skip_serializing_if = "Option::is_none")]
    pub has_cover_art: Option<bool>,

    #[serde(rename = "Track", default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,

    /// Explicit identifier overriding the slug derived from `Track`
    #[serde(rename = "Directory", default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    #[serde(rename = "Artists", default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<String>>,

    #[serde(rename = "URLs", default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,

    #[serde(rename = "Referenced Tracks", default, skip_serializing_if = "Vec::is_empty")]
    pub referenced_tracks: Vec<String>,

    #[serde(rename = "Sampled Tracks", default, skip_serializing_if = "Vec::is_empty")]
    pub sampled_tracks: Vec<String>,

    /// Present on re-release aliases that point at the original track
    #[serde(
        rename = "Originally Released As",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub originally_released_as: Option<String>,
}

impl CatalogRecord {
    /// True when this document is an album header
    pub fn is_album_header(&self) -> bool {
        self.album.is_some()
    }

    /// True when this track is an alias of another release
    pub fn is_alias(&self) -> bool {
        self.originally_released_as.is_some()
    }

    /// A track needs both a display name and a URL list to be considered
    pub fn is_candidate(&self) -> bool {
        self.track.is_some() && self.urls.is_some()
    }

    /// Group memberships (empty when absent)
    pub fn group_list(&self) -> &[String] {
        self.groups.as_deref().unwrap_or(&[])
    }

    /// Artist credits (empty when absent)
    pub fn artist_list(&self) -> &[String] {
        self.artists.as_deref().unwrap_or(&[])
    }

    /// URL list (empty when absent)
    pub fn url_list(&self) -> &[String] {
        self.urls.as_deref().unwrap_or(&[])
    }

    /// Album header flag: tracks have no individual artwork
    pub fn lacks_track_art(&self) -> bool {
        self.has_track_art == Some(false)
    }

    /// Track flag: this track has no individual artwork
    pub fn lacks_cover_art(&self) -> bool {
        self.has_cover_art == Some(false)
    }
}

/// Slug index entry: everything the game needs to show a guessable track
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub name: String,
    pub album_name: String,
    pub is_official: bool,
    pub is_fandom: bool,
    pub image_url: String,
}

/// External playback provider of a song's URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlType {
    Youtube,
    Soundcloud,
}

impl UrlType {
    /// Provider for a URL, if it is one the game can play
    pub fn detect(url: &str) -> Option<Self> {
        if url.contains("youtu") {
            Some(UrlType::Youtube)
        } else if url.contains("soundcloud") {
            Some(UrlType::Soundcloud)
        } else {
            None
        }
    }

    /// Pick the playback URL by provider priority: YouTube, then SoundCloud.
    ///
    /// The first YouTube URL wins outright. Without one, the last listed
    /// SoundCloud URL is used.
    pub fn select<'a, I>(urls: I) -> Option<(String, UrlType)>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut soundcloud = None;
        for url in urls {
            match Self::detect(url) {
                Some(UrlType::Youtube) => return Some((url.clone(), UrlType::Youtube)),
                Some(UrlType::Soundcloud) => {
                    soundcloud = Some((url.clone(), UrlType::Soundcloud));
                }
                None => {}
            }
        }
        soundcloud
    }
}

impl fmt::Display for UrlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlType::Youtube => write!(f, "youtube"),
            UrlType::Soundcloud => write!(f, "soundcloud"),
        }
    }
}

/// A track the game can serve as a song of the day
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayableSong {
    /// Track slug without the `track:` namespace
    pub slug: String,
    pub name: String,
    /// Resolved `artist:` identifiers
    pub artist: Vec<String>,
    pub album_name: String,
    /// Resolved `track:` identifiers of referenced tracks
    pub leitmotifs: Vec<String>,
    /// Resolved `track:` identifiers of sampled tracks
    #[serde(default)]
    pub samples: Vec<String>,
    pub n_leitmotifs: usize,
    pub wiki_url: String,
    pub image_url: String,
    pub is_official: bool,
    pub is_fandom: bool,
    pub url: String,
    pub url_type: UrlType,
    /// Calendar day this song is served, once scheduled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<NaiveDate>,
}

/// Guess difficulty tier, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rarity(u8);

impl Rarity {
    pub const MIN: Rarity = Rarity(1);
    pub const MAX: Rarity = Rarity(5);

    /// Clamp any tier arithmetic result into the valid range
    pub fn clamped(tier: i32) -> Self {
        Rarity(tier.clamp(Self::MIN.0 as i32, Self::MAX.0 as i32) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rarity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Rarity(value))
        } else {
            Err(Error::InvalidInput(format!("rarity {} outside 1..=5", value)))
        }
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> Self {
        rarity.0
    }
}

/// A valid guess: a Track Summary with its reference slug and rarity tier
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuessCandidate {
    #[serde(flatten)]
    pub summary: TrackSummary,
    /// Namespaced `track:` identifier
    pub slug: String,
    pub rarity: Rarity,
}
