//! Persisted session token
//!
//! A single bearer token lives in `session.json` under the project data
//! directory. A token found in `UPOINT_TOKEN` at startup replaces it.
//! Logging out deletes the file.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding a token to sign in with
pub const TOKEN_ENV: &str = "UPOINT_TOKEN";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no data directory available for the session file")]
    NoDataDir,
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    token: Option<String>,
}

/// The current session and where it is stored
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    token: Option<String>,
}

impl Session {
    /// Default location of the session file
    pub fn default_path() -> Result<PathBuf, SessionError> {
        ProjectDirs::from("br", "upoint", "upoint-tui")
            .map(|dirs| dirs.data_dir().join("session.json"))
            .ok_or(SessionError::NoDataDir)
    }

    /// Load the session from the default location
    pub fn load() -> Result<Self, SessionError> {
        Self::load_from(Self::default_path()?)
    }

    /// Load the session stored at `path`; a missing file is a signed-out session
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<SessionFile>(&content)?.token,
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => return Err(SessionError::Io { path, source }),
        };
        Ok(Self { path, token })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a new token
    pub fn store(&mut self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&SessionFile {
            token: Some(token.clone()),
        })?;
        fs::write(&self.path, content).map_err(io_err)?;
        self.token = Some(token);
        Ok(())
    }

    /// Forget the token and remove the session file
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.token = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("upoint-session-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn test_missing_file_is_signed_out() {
        let session = Session::load_from(temp_path()).unwrap();
        assert!(!session.is_signed_in());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_store_then_load() {
        let path = temp_path();
        let mut session = Session::load_from(&path).unwrap();
        session.store("abc.def").unwrap();
        assert_eq!(session.token(), Some("abc.def"));

        let reloaded = Session::load_from(&path).unwrap();
        assert_eq!(reloaded.token(), Some("abc.def"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_clear_removes_file() {
        let path = temp_path();
        let mut session = Session::load_from(&path).unwrap();
        session.store("token").unwrap();
        session.clear().unwrap();
        assert!(!session.is_signed_in());
        assert!(!path.exists());
        // Clearing twice is fine
        session.clear().unwrap();
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let err = Session::load_from(&path).unwrap_err();
        assert!(matches!(err, SessionError::Corrupt(_)));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
