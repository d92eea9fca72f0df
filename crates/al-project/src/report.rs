use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for [`crate::load_project`].
#[derive(Debug, Clone, Default)]
pub struct LoadConfig {
    /// Extra source roots (dependency sources, shared modules) that are
    /// loaded for resolution but are not project-local.
    pub library_roots: Vec<PathBuf>,
}

/// Reason why a file was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SkipReason {
    TooLarge,
    InvalidEncoding,
    Unsupported,
}

/// Report generated after loading a project.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub files_scanned: usize,
    pub files_loaded: usize,
    pub files_skipped: HashMap<SkipReason, usize>,
    pub files_failed: usize,
    /// `(path, reason)` for every failed file.
    pub failed_details: Vec<(String, String)>,
    pub total_classes: usize,
    pub duration: Duration,
}

impl LoadReport {
    pub fn total_skipped(&self) -> usize {
        self.files_skipped.values().sum()
    }
}
