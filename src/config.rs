use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WizardError;

const DIR_NAME: &str = ".godrive";
const CLIENT_SECRETS_FILE: &str = "client_secrets.json";
const AUTH_MARKER_FILE: &str = "auth.txt";

/// Per-user configuration directory and the files kept in it.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub dir: PathBuf,
    pub client_secrets: PathBuf,
    pub auth_marker: PathBuf,
}

impl ConfigPaths {
    pub fn resolve() -> Result<Self, WizardError> {
        // Environment override first (tests, portable installs)
        if let Some(dir) = env::var_os("GODRIVE_HOME").filter(|v| !v.is_empty()) {
            return Ok(Self::in_dir(PathBuf::from(dir)));
        }

        let home = dirs::home_dir().ok_or(WizardError::HomeDirUnavailable)?;
        Ok(Self::in_dir(home.join(DIR_NAME)))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            client_secrets: dir.join(CLIENT_SECRETS_FILE),
            auth_marker: dir.join(AUTH_MARKER_FILE),
            dir,
        }
    }

    /// Create the directory if absent. Existing directories are left as they are.
    pub fn ensure_dir(&self) -> Result<(), WizardError> {
        create_dir(&self.dir).map_err(|source| WizardError::ConfigDir {
            path: self.dir.clone(),
            source,
        })?;
        tracing::debug!(dir = %self.dir.display(), "config directory ready");
        Ok(())
    }
}

#[cfg(unix)]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(dir)
}

#[cfg(not(unix))]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}
