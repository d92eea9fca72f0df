use std::path::{Path, PathBuf};

use al_parser::is_java_source;
use ignore::WalkBuilder;

/// Dependency and build-output directories to prune.
pub(crate) const SKIPPED_DIRS: &[&str] = &[
    "vendor",
    "node_modules",
    "third_party",
    "target",
    "build",
    "out",
];

/// Result of scanning a source root for Java files.
pub struct ScanResult {
    /// Paths relative to the scanned root.
    pub files: Vec<PathBuf>,
    /// Total entries seen (including skipped).
    pub total_entries: usize,
}

/// Scan a source root for `.java` files.
///
/// Uses the `ignore` crate for .gitignore-aware walking; hidden entries,
/// symlinks and [`SKIPPED_DIRS`] are pruned. Results are sorted so that
/// loading is deterministic.
pub fn scan_files(root: &Path) -> ScanResult {
    let mut files = Vec::new();
    let mut total_entries = 0usize;

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false)
        .follow_links(false)
        .filter_entry(|entry| {
            if entry.file_type().map_or(false, |ft| ft.is_dir()) {
                if let Some(name) = entry.file_name().to_str() {
                    return !SKIPPED_DIRS.contains(&name);
                }
            }
            true
        })
        .build();

    for entry in walker {
        // Permission errors and the like just drop the entry.
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        total_entries += 1;

        if !entry.file_type().map_or(false, |ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !is_java_source(path) {
            continue;
        }

        if let Ok(rel) = path.strip_prefix(root) {
            files.push(rel.to_path_buf());
        }
    }

    files.sort();
    ScanResult {
        files,
        total_entries,
    }
}
