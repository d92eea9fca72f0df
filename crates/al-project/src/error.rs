use std::path::PathBuf;

/// Project loading and lookup errors. Per-file parse failures are not errors;
/// they are counted in the load report.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("source root not found: {}", .path.display())]
    RootNotFound { path: PathBuf },

    #[error("file is not part of the loaded project: {}", .path.display())]
    UnknownFile { path: PathBuf },
}

impl ProjectError {
    pub fn is_retryable(&self) -> bool {
        false
    }
}
