//! Configuration for the `spanish` tool.
//!
//! [`Config::load`] layers the built-in defaults, an optional
//! `~/.config/spanish/config.toml` and `SPANISH_*` environment variables
//! (e.g. `SPANISH_DATA__DIR=/usr/share/spanish`). [`Config::defaults`] returns
//! the defaults without touching the filesystem.

use crate::core::format::Layout;
use crate::core::search::Direction;
use crate::persistence::CacheFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
dir           = ""
english_text  = "english-to-spanish.txt"
english_cache = "english-to-spanish"
spanish_cache = "spanish-to-english"

[layout]
line_width     = 80
headword_width = 25
separator      = " : "
color          = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub layout: LayoutConfig,
}

/// `[data]` section. Cache names are stems; the extension comes from the
/// cache format.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding the glossary files. Empty means "next to the
    /// executable".
    pub dir: PathBuf,
    pub english_text: String,
    pub english_cache: String,
    pub spanish_cache: String,
}

/// `[layout]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub line_width: usize,
    pub headword_width: usize,
    pub separator: String,
    /// Bold headwords when stdout is a terminal.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the built-in defaults, then the user config file (if any), then
    /// `SPANISH_*` environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        Self::builder()
            .add_source(config::File::from(config_path().as_path()).required(false))
            .add_source(
                config::Environment::with_prefix("SPANISH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        Self::builder()
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
    }

    /// Replace the configured data directory, e.g. from `--data-dir`.
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.data.dir = dir;
        }
        self
    }

    /// Resolve the data directory and file names into concrete paths.
    pub fn data_paths(&self) -> anyhow::Result<DataPaths> {
        let dir = if self.data.dir.as_os_str().is_empty() {
            executable_dir()?
        } else {
            self.data.dir.clone()
        };
        Ok(DataPaths {
            dir,
            english_text: self.data.english_text.clone(),
            english_cache: self.data.english_cache.clone(),
            spanish_cache: self.data.spanish_cache.clone(),
        })
    }

    pub fn layout(&self, styled: bool) -> Layout {
        Layout {
            headword_width: self.layout.headword_width,
            line_width: self.layout.line_width,
            separator: self.layout.separator.clone(),
            styled: styled && self.layout.color,
        }
    }
}

/// Concrete locations of the glossary text and caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    dir: PathBuf,
    english_text: String,
    english_cache: String,
    spanish_cache: String,
}

impl DataPaths {
    /// Paths inside `dir` using the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let defaults = Config::defaults();
        Self {
            dir: dir.into(),
            english_text: defaults.data.english_text,
            english_cache: defaults.data.english_cache,
            spanish_cache: defaults.data.spanish_cache,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The English glossary text. There is no Spanish text; the Spanish
    /// glossary only exists as a cache built by inversion.
    pub fn english_text(&self) -> PathBuf {
        self.dir.join(&self.english_text)
    }

    /// Cache for glossaries keyed in the source language of `direction`.
    pub fn cache(&self, direction: Direction, format: CacheFormat) -> PathBuf {
        let stem = match direction {
            Direction::ToSpanish => &self.english_cache,
            Direction::ToEnglish => &self.spanish_cache,
        };
        self.dir.join(format!("{stem}.{}", format.extension()))
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("spanish")
        .join("config.toml")
}

fn executable_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
