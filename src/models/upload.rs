use std::path::{Path, PathBuf};

/// What to hand to the uploader: an existing source path and an optional
/// display name (empty keeps the original file name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub source: PathBuf,
    pub display_name: String,
}

impl UploadRequest {
    pub fn new(source: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            display_name: display_name.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn keeps_original_name(&self) -> bool {
        self.display_name.is_empty()
    }
}
