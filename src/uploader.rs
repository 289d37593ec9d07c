use std::env;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use crate::error::WizardError;
use crate::models::upload::UploadRequest;

pub const UPLOADER_NAME: &str = "godrive_upload";

/// Performs the actual transfer of an [`UploadRequest`].
pub trait Uploader {
    fn upload(
        &self,
        request: &UploadRequest,
    ) -> impl Future<Output = io::Result<ExitStatus>> + Send;
}

/// The `godrive_upload` executable installed next to this binary.
#[derive(Debug, Clone)]
pub struct SiblingUploader {
    program: PathBuf,
}

impl SiblingUploader {
    /// Use the uploader at `program`, which must exist.
    pub fn at(program: impl Into<PathBuf>) -> Result<Self, WizardError> {
        let program = program.into();
        if !program.exists() {
            tracing::warn!(program = %program.display(), "uploader not found");
            return Err(WizardError::UploaderMissing(program));
        }
        Ok(Self { program })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Uploader for SiblingUploader {
    async fn upload(&self, request: &UploadRequest) -> io::Result<ExitStatus> {
        tracing::info!(
            program = %self.program.display(),
            source = %request.source().display(),
            original_name = request.keeps_original_name(),
            "starting uploader"
        );

        Command::new(&self.program)
            .arg(request.source())
            .arg(&request.display_name)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
    }
}

/// Where the uploader is expected for an executable at `exe`.
pub fn sibling_path(exe: &Path) -> PathBuf {
    exe.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(uploader_file_name())
}

pub fn uploader_file_name() -> String {
    format!("{UPLOADER_NAME}{}", env::consts::EXE_SUFFIX)
}

/// Run the uploader and collapse every kind of failure into [`WizardError::UploadFailed`].
pub async fn dispatch(
    uploader: &impl Uploader,
    request: &UploadRequest,
) -> Result<(), WizardError> {
    match uploader.upload(request).await {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => {
            tracing::warn!(%status, "uploader exited unsuccessfully");
            Err(WizardError::UploadFailed)
        }
        Err(e) => {
            tracing::warn!(error = %e, "uploader could not be started");
            Err(WizardError::UploadFailed)
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::io;
    use std::process::ExitStatus;
    use std::sync::Mutex;

    use super::Uploader;
    use crate::models::upload::UploadRequest;

    /// Records requests and answers with a fixed result.
    #[derive(Debug)]
    pub struct RecordingUploader {
        result: fn() -> io::Result<ExitStatus>,
        pub calls: Mutex<Vec<UploadRequest>>,
    }

    impl RecordingUploader {
        pub fn new(result: fn() -> io::Result<ExitStatus>) -> Self {
            Self {
                result,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<UploadRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Uploader for RecordingUploader {
        async fn upload(&self, request: &UploadRequest) -> io::Result<ExitStatus> {
            self.calls.lock().unwrap().push(request.clone());
            (self.result)()
        }
    }

    #[cfg(unix)]
    pub fn exited(code: i32) -> io::Result<ExitStatus> {
        use std::os::unix::process::ExitStatusExt;
        Ok(ExitStatus::from_raw(code << 8))
    }
}
