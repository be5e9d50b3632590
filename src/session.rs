//! Session token storage.
//!
//! The bearer token issued at login or OTP verification lives behind a
//! [`SessionStore`]. The connection reads it once per request; nothing else
//! in the SDK touches storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{DrobbError, Result};

pub trait SessionStore: Send + Sync {
    /// The stored token, if any. Blank tokens count as absent.
    fn token(&self) -> Result<Option<String>>;

    fn set_token(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

/// Process-local token store. Forgets the session on drop.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| DrobbError::InvalidArgument("session lock poisoned".into()))?;
        Ok(guard.clone().filter(|t| !t.trim().is_empty()))
    }

    fn set_token(&self, token: &str) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| DrobbError::InvalidArgument("session lock poisoned".into()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| DrobbError::InvalidArgument("session lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileSessionStore
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// Token persisted as a small JSON file, surviving restarts.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Use `path`, or the platform data directory when `None`.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.unwrap_or_else(config::default_session_path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<SessionFile>(&raw) {
            Ok(file) if !file.token.trim().is_empty() => Ok(Some(file.token)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "ignoring unreadable session file: {}",
                    e
                );
                Ok(None)
            }
        }
    }

    fn set_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string(&SessionFile {
            token: token.to_string(),
        })?;

        // Write then rename so a crash never leaves a truncated file.
        let tmp = self.path.with_extension("json.tmp");
        let result = (|| -> Result<()> {
            fs::write(&tmp, body)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        })();
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
