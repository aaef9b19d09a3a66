//! Opaque analytics client identifier, persisted between runs

use crate::error::Result;
use chrono::Utc;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Length of the random suffix
const SUFFIX_LEN: usize = 13;

/// Opaque client identifier (`"{unix_millis}.{random}"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Generate a fresh identifier without persisting it
    pub fn generate() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}.{}",
            Utc::now().timestamp_millis(),
            &random[..SUFFIX_LEN]
        ))
    }

    /// Default location: `<data_local_dir>/partsfinder/client_id`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("partsfinder").join("client_id"))
    }

    /// Read the identifier stored at `path`, creating it if missing or empty
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if let Ok(existing) = fs::read_to_string(path) {
            let existing = existing.trim();
            if !existing.is_empty() {
                return Ok(Self(existing.to_string()));
            }
        }

        let id = Self::generate();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &id.0)?;
        debug!(path = %path.display(), "created analytics client id");
        Ok(id)
    }

    /// Load from the default location, falling back to an unsaved id
    pub fn load_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load_or_create(&path).ok())
            .unwrap_or_else(Self::generate)
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
