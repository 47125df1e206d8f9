//! File-backed session store used by the command-line client.

use std::fs;
use std::path::{Path, PathBuf};

use super::{SessionError, SessionStore};

const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Token slot persisted as a single file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data_local_dir>/ghostcheck/credentials`
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .map(|p| p.join("ghostcheck").join(CREDENTIALS_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(".ghostcheck").join(CREDENTIALS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim_end_matches(['\r', '\n']).to_string())
            .filter(|s| !s.trim().is_empty())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        let write_err = |e: std::io::Error| SessionError::Write {
            path: self.path.display().to_string(),
            error: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(&self.path, token).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)) {
                tracing::warn!("Failed to chmod 0600 {}: {}", self.path.display(), e);
            }
        }

        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Remove {
                path: self.path.display().to_string(),
                error: e.to_string(),
            }),
        }
    }
}
