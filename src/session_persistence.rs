use crate::session::ClientSession;
use crate::{LastFmError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "lastfm-ws";
const SESSION_FILE: &str = "session.json";

/// Stores session keys per user under the XDG data directory.
///
/// Sessions live at `~/.local/share/lastfm-ws/users/{username}/session.json`.
/// [`SessionPersistence::with_root`] points the store somewhere else, which is
/// what tests do.
#[derive(Debug, Clone)]
pub struct SessionPersistence {
    root: PathBuf,
}

impl SessionPersistence {
    /// Store rooted at `$XDG_DATA_HOME/lastfm-ws`.
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            LastFmError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "Cannot determine XDG data directory",
            ))
        })?;
        Ok(Self::with_root(data_dir.join(APP_DIR)))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path of the session file for `username`.
    ///
    /// Names that are empty, `.`/`..`, or contain a path separator are
    /// rejected so every session file stays under the store root.
    pub fn session_path(&self, username: &str) -> Result<PathBuf> {
        if username.is_empty()
            || username == "."
            || username == ".."
            || username.contains(&['/', '\\'][..])
        {
            return Err(LastFmError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid username for session storage: '{username}'"),
            )));
        }
        Ok(self.users_dir().join(username).join(SESSION_FILE))
    }

    /// Write `session` as JSON, creating parent directories as needed.
    pub fn save_session(&self, session: &ClientSession) -> Result<()> {
        let session_path = self.session_path(&session.username)?;

        if let Some(parent) = session_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let session_json = session
            .to_json()
            .map_err(|e| LastFmError::Parse(format!("Failed to serialize session: {e}")))?;
        fs::write(&session_path, session_json)?;

        log::debug!("Session saved to: {}", session_path.display());
        Ok(())
    }

    /// Load the saved session for `username`, or `None` if there is none.
    pub fn load_session(&self, username: &str) -> Result<Option<ClientSession>> {
        let session_path = self.session_path(username)?;

        if !session_path.exists() {
            log::debug!("No saved session for {username}");
            return Ok(None);
        }

        let session_json = fs::read_to_string(&session_path)?;
        let session = ClientSession::from_json(&session_json).map_err(|e| {
            LastFmError::Parse(format!(
                "Failed to parse session file {}: {e}",
                session_path.display()
            ))
        })?;

        log::debug!("Session loaded from: {}", session_path.display());
        Ok(Some(session))
    }

    pub fn session_exists(&self, username: &str) -> bool {
        self.session_path(username)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Delete the saved session for `username`. Missing files are not an error.
    pub fn remove_session(&self, username: &str) -> Result<()> {
        let session_path = self.session_path(username)?;

        if session_path.exists() {
            fs::remove_file(&session_path)?;
            log::debug!("Session removed from: {}", session_path.display());
        }

        Ok(())
    }

    /// Usernames with a saved session, sorted.
    pub fn list_saved_users(&self) -> Result<Vec<String>> {
        let users_dir = self.users_dir();

        if !users_dir.exists() {
            return Ok(Vec::new());
        }

        let mut users = Vec::new();
        for entry in fs::read_dir(&users_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() && entry.path().join(SESSION_FILE).exists() {
                if let Some(username) = entry.file_name().to_str() {
                    users.push(username.to_string());
                }
            }
        }

        users.sort();
        Ok(users)
    }
}
