//! Storage layout configuration.
//!
//! A [`StoreConfig`] can be built in code or read from a RON, TOML or JSON
//! file; the format is detected from the extension.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::LevelError;

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, LevelError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(LevelError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// StoreConfig
// ===========================================================================

/// Where levels live on disk and how their files are named.
///
/// Files resolve to `<root>/<playable_dir|editable_dir>/<file_stem><id>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Install directory, `$HOME/.energy` unless overridden.
    pub root: PathBuf,
    pub playable_dir: String,
    pub editable_dir: String,
    pub file_stem: String,
    /// File extension without the leading dot.
    pub extension: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            playable_dir: "playable".to_string(),
            editable_dir: "editable".to_string(),
            file_stem: "level".to_string(),
            extension: "nrg".to_string(),
        }
    }
}

fn default_root() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".energy")
}

impl StoreConfig {
    /// Default layout rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Read a configuration file; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let format = detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format).map_err(|detail| LevelError::Parse {
            file: path.to_path_buf(),
            detail,
        })
    }

    fn parse(content: &str, format: Format) -> Result<Self, String> {
        match format {
            Format::Ron => ron::from_str(content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// `<stem><id>.<ext>`.
    pub fn file_name(&self, id: u32) -> String {
        format!("{}{id}.{}", self.file_stem, self.extension)
    }

    /// Parse a file name produced by [`StoreConfig::file_name`].
    pub fn id_from_file_name(&self, name: &str) -> Option<u32> {
        let digits = name
            .strip_prefix(self.file_stem.as_str())?
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}
