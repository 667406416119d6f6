use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

use crate::settings::types::SessionOptions;

/// Settings persistence errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("settings file is not valid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistent session options backed by a JSON file.
pub struct OptionsStore {
    path: PathBuf,
    data: Mutex<SessionOptions>,
}

impl OptionsStore {
    /// Create a store, loading from disk if the file exists.
    pub fn open(path: PathBuf) -> Result<Self, SettingsError> {
        let data = Self::load(&path)?;
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Load options from a JSON file, returning defaults on a missing file.
    pub fn load(path: &Path) -> Result<SessionOptions, SettingsError> {
        if !path.exists() {
            return Ok(SessionOptions::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Current options snapshot.
    pub fn get(&self) -> SessionOptions {
        self.data.lock().clone()
    }

    /// Modify the in-memory options. Does not touch disk.
    pub fn update(&self, f: impl FnOnce(&mut SessionOptions)) {
        f(&mut self.data.lock());
    }

    /// Save current options to disk atomically (write .tmp then rename).
    pub fn save(&self) -> Result<(), SettingsError> {
        let data = self.data.lock().clone();
        let json = serde_json::to_string_pretty(&data)?;

        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(io_err)?;
        std::fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        tracing::debug!("saved session options to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
