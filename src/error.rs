use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Unable to determine home directory")]
    HomeDirUnavailable,

    #[error("Failed to create config directory {}", .path.display())]
    ConfigDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to save client_secrets.json to {}", .path.display())]
    SaveCredentials {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Too many failed attempts to provide client_secrets.json")]
    CredentialAttemptsExhausted,

    #[error("Too many invalid upload paths")]
    PathAttemptsExhausted,

    #[error("Failed to read input")]
    Prompt(#[source] io::Error),

    #[error("Input closed before the setup was complete")]
    InputClosed,

    #[error("Unable to determine executable path")]
    ExecutablePath(#[source] io::Error),

    #[error("The uploader is missing at {}. Please reinstall Godrive.", .0.display())]
    UploaderMissing(PathBuf),

    #[error("Upload failed! Ensure the uploader is installed and retry.")]
    UploadFailed,

    #[error("Cancelled")]
    Cancelled,
}

impl WizardError {
    /// Process exit status for this error. Cancellation is a normal exit.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cancelled => 0,
            _ => 1,
        }
    }
}
