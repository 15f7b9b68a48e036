//! Configuration loading and config file resolution
//!
//! Every setting has a compiled default so a missing or empty config file is
//! never fatal. Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `MOTIF_CONFIG` environment variable
//! 3. Per-user config file (`~/.config/motif/config.toml` on Linux)
//! 4. Compiled defaults (fallback)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MOTIF_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Directory holding one YAML file per album
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory receiving the generated JSON artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Game data generation parameters (optional)
    #[serde(default)]
    pub game: GameConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            logging: LoggingConfig::default(),
            game: GameConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// A track known to be official even though no official album carries it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OfficialException {
    /// Track slug without namespace
    pub slug: String,
    /// Artist credit exactly as written in the catalog
    pub artist: String,
}

/// Leitmotif count thresholds and per-song leitmotif bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Thresholds {
    /// Citations needed for a common leitmotif
    pub common: usize,
    /// Citations needed for an uncommon leitmotif
    pub uncommon: usize,
    /// Citations needed for a rare leitmotif (below this: not guessable)
    pub rare: usize,
    /// Fewest distinct counted leitmotifs a playable song may have
    pub min_leitmotifs: usize,
    /// Most distinct counted leitmotifs a playable song may have
    pub max_leitmotifs: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            common: 20,
            uncommon: 10,
            rare: 4,
            min_leitmotifs: 3,
            max_leitmotifs: 999,
        }
    }
}

impl Thresholds {
    /// Check ordering of the tiers and the leitmotif bounds
    pub fn validate(&self) -> Result<()> {
        if self.rare < 1 {
            return Err(Error::Config("rare threshold must be at least 1".to_string()));
        }
        if !(self.common > self.uncommon && self.uncommon > self.rare) {
            return Err(Error::Config(format!(
                "thresholds must satisfy common > uncommon > rare (got {} / {} / {})",
                self.common, self.uncommon, self.rare
            )));
        }
        if self.min_leitmotifs > self.max_leitmotifs {
            return Err(Error::Config(format!(
                "min_leitmotifs ({}) exceeds max_leitmotifs ({})",
                self.min_leitmotifs, self.max_leitmotifs
            )));
        }
        Ok(())
    }
}

/// Game data generation parameters
///
/// Catalog-specific carve-outs (excluded albums, meme motifs, unreleased
/// official tracks) live here rather than in code.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// Base URL for wiki track pages and album art
    pub wiki_base_url: String,
    /// Groups whose albums count as official
    pub counted_reference_groups: Vec<String>,
    /// Group tagging fan-made albums
    pub fandom_group: String,
    /// Additional included groups beyond the counted groups and the fandom group
    pub included_groups: Vec<String>,
    /// Albums in any of these groups are never playable
    pub excluded_groups: Vec<String>,
    /// Album file stems that are never playable
    pub excluded_albums: Vec<String>,
    /// Track slugs that never become playable songs
    pub excluded_songs: Vec<String>,
    /// Leitmotif slugs (without namespace) that never count toward eligibility
    pub discarded_motifs: Vec<String>,
    /// Reference identifiers treated as official regardless of their album
    pub extra_official_references: Vec<String>,
    /// Count `Sampled Tracks` citations together with `Referenced Tracks`
    pub count_samples_as_leitmotifs: bool,
    /// Seed for the candidate shuffle
    pub shuffle_seed: u64,
    /// Launch day of the published schedule
    pub original_date: NaiveDate,
    /// First day of the regenerated part of the schedule
    pub start_date: NaiveDate,
    pub thresholds: Thresholds,
    /// Official-but-unreleased tracks, matched by slug and artist credit
    pub official_exceptions: Vec<OfficialException>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            wiki_base_url: "https://hsmusic.wiki".to_string(),
            counted_reference_groups: strings(&["Official Discography", "group:official"]),
            fandom_group: "Fandom".to_string(),
            included_groups: Vec::new(),
            excluded_groups: strings(&["Desynced"]),
            excluded_albums: strings(&[
                "hiveswap-act-1-ost",
                "hiveswap-act-2-ost",
                "hiveswap-friendsim",
                "the-grubbles",
                "homestuck-vol-1-4",
                "genesis-frog",
                "sburb",
                "call-and-new",
                "call-and-new-2-locomotif",
                "c-a-n-w-a-v-e",
                "c-a-n-w-a-v-e-2",
            ]),
            excluded_songs: strings(&[
                "lame-and-old-webcomic-voluem-10-mega-milx",
                "special-delivery",
                "please-help-me-i-am-in-pain",
                "crystalmegamix",
                "waste-of-a-track-slot",
                "credit-shack",
                "licord-nacrasty",
                "im-not-saying-anything",
            ]),
            discarded_motifs: strings(&[
                "the-nutshack-intro",
                "bowmans-credit-score",
                "snow-halation",
                "dk-rap",
                "meet-the-flintstones",
            ]),
            extra_official_references: strings(&["track:penumbra-phantasm"]),
            count_samples_as_leitmotifs: false,
            shuffle_seed: 612,
            original_date: NaiveDate::from_ymd_opt(2023, 8, 9).unwrap_or_default(),
            start_date: NaiveDate::from_ymd_opt(2023, 11, 5).unwrap_or_default(),
            thresholds: Thresholds::default(),
            official_exceptions: vec![OfficialException {
                slug: "penumbra-phantasm".to_string(),
                artist: "Toby Fox".to_string(),
            }],
        }
    }
}

impl GameConfig {
    /// Validate thresholds and the schedule dates
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if self.start_date < self.original_date {
            return Err(Error::Config(format!(
                "start_date {} is before original_date {}",
                self.start_date, self.original_date
            )));
        }
        Ok(())
    }

    /// Every group that makes an album playable
    pub fn all_included_groups(&self) -> Vec<String> {
        let mut groups = self.counted_reference_groups.clone();
        groups.push(self.fandom_group.clone());
        for group in &self.included_groups {
            if !groups.contains(group) {
                groups.push(group.clone());
            }
        }
        groups
    }

    /// Number of previously published days that stay untouched
    pub fn carried_day_count(&self) -> usize {
        crate::time::days_between(self.original_date, self.start_date).max(0) as usize
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("hsmusic-data").join("album")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        let config: TomlConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
        config.game.validate()?;
        Ok(config)
    }
}

/// Resolve which config file to read, if any
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Per-user config file
    default_config_path().filter(|p| p.exists())
}

/// Platform config file location (`<config dir>/motif/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("motif").join("config.toml"))
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file
    File(PathBuf),
    /// This file was requested but does not exist
    Missing(PathBuf),
    /// No file requested and no per-user file present
    Defaults,
}

impl ConfigSource {
    /// Report the source. Called once logging is initialised, since the
    /// logging settings themselves come from the loaded configuration.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing(path) => warn!(
                "Config file {} not found, using compiled defaults",
                path.display()
            ),
            ConfigSource::Defaults => info!("No config file found, using compiled defaults"),
        }
    }
}

/// Load configuration following the resolution priority.
///
/// A file that exists must parse and validate. A requested file that does
/// not exist, or no file at all, yields compiled defaults; the returned
/// [`ConfigSource`] says which case applied.
pub fn load_config_with_source(cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    match resolve_config_path(cli_arg) {
        Some(path) if path.exists() => {
            let config = TomlConfig::from_file(&path)?;
            Ok((config, ConfigSource::File(path)))
        }
        Some(path) => Ok((TomlConfig::default(), ConfigSource::Missing(path))),
        None => Ok((TomlConfig::default(), ConfigSource::Defaults)),
    }
}

/// Load configuration following the resolution priority, discarding its source
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    load_config_with_source(cli_arg).map(|(config, _)| config)
}

/// Write a config file atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)?;
    Ok(())
}
