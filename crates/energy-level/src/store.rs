//! On-disk level storage.
//!
//! Every level is kept twice, once in the playable directory and once in
//! the editable directory. Saving writes both copies so the two views stay
//! in sync; loading reads from the one requested.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::LevelError;
use crate::level::Level;

/// Which copy of a level to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKind {
    Playable,
    Editable,
}

impl LevelKind {
    pub fn all() -> [LevelKind; 2] {
        [LevelKind::Playable, LevelKind::Editable]
    }
}

/// Reads and writes level files under a [`StoreConfig`] layout.
#[derive(Debug, Clone)]
pub struct LevelStore {
    config: StoreConfig,
}

impl LevelStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Store with the default layout rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::with_root(root))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Directory holding levels of `kind`.
    pub fn dir(&self, kind: LevelKind) -> PathBuf {
        let name = match kind {
            LevelKind::Playable => &self.config.playable_dir,
            LevelKind::Editable => &self.config.editable_dir,
        };
        self.config.root.join(name)
    }

    /// Full path of level `id` of `kind`.
    pub fn path_for(&self, kind: LevelKind, id: u32) -> PathBuf {
        self.dir(kind).join(self.config.file_name(id))
    }

    pub fn exists(&self, kind: LevelKind, id: u32) -> bool {
        self.path_for(kind, id).is_file()
    }

    /// Load level `id`.
    ///
    /// An absent or unreadable file is [`LevelError::NotFound`]; a file that
    /// does not parse is [`LevelError::Malformed`].
    pub fn load(&self, kind: LevelKind, id: u32) -> Result<Level, LevelError> {
        let path = self.path_for(kind, id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "level file unavailable");
                return Err(LevelError::NotFound { path });
            }
        };
        match Level::decode(id, &text) {
            Ok(level) => {
                info!(id, ?kind, tiles = level.circuit().len(), "loaded level");
                Ok(level)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt level file");
                Err(e)
            }
        }
    }

    /// Write `level` to both the playable and editable directories.
    ///
    /// Each copy is written to a temporary file and renamed into place, so a
    /// reader never observes a partial file.
    pub fn save(&self, level: &Level) -> Result<(), LevelError> {
        let text = level.encode();
        for kind in LevelKind::all() {
            let path = self.path_for(kind, level.id());
            write_atomic(&path, &text)?;
        }
        info!(id = level.id(), "saved level");
        Ok(())
    }

    /// Delete both copies of level `id`. Returns `true` if any file existed.
    pub fn remove(&self, id: u32) -> Result<bool, LevelError> {
        let mut removed = false;
        for kind in LevelKind::all() {
            match fs::remove_file(self.path_for(kind, id)) {
                Ok(()) => removed = true,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }

    /// Ids of the levels of `kind` present on disk, ascending. A missing
    /// directory lists as empty.
    pub fn list(&self, kind: LevelKind) -> Result<Vec<u32>, LevelError> {
        let dir = self.dir(kind);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| self.config.id_from_file_name(name))
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    /// Id for a newly created level: one past the highest playable id.
    /// Level numbering starts at 1.
    pub fn new_level_id(&self) -> Result<u32, LevelError> {
        let highest = self.list(LevelKind::Playable)?.last().copied().unwrap_or(0);
        Ok(highest.saturating_add(1))
    }

    /// First-run setup: if the root directory does not exist yet, create
    /// both level directories and save `bundled` into them.
    ///
    /// Returns `false` without touching anything when the root exists.
    pub fn install(&self, bundled: &[Level]) -> Result<bool, LevelError> {
        if self.config.root.exists() {
            debug!(root = %self.config.root.display(), "store already installed");
            return Ok(false);
        }
        for kind in LevelKind::all() {
            fs::create_dir_all(self.dir(kind))?;
        }
        for level in bundled {
            self.save(level)?;
        }
        info!(root = %self.config.root.display(), levels = bundled.len(), "installed level store");
        Ok(true)
    }
}

fn write_atomic(path: &Path, text: &str) -> Result<(), LevelError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, text)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
