use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use al_core::{Origin, SourceUnit};
use al_parser::error::ParserError;
use al_parser::parse_unit;

use crate::error::ProjectError;
use crate::project::Project;
use crate::report::{LoadConfig, LoadReport, SkipReason};
use crate::scanner::scan_files;

/// Outcome of attempting to load a single file.
enum FileOutcome {
    Parsed(SourceUnit),
    Skipped(SkipReason),
    Failed(String, String),
}

/// Load every Java source under `root` (and the configured library roots)
/// into an in-memory [`Project`].
///
/// Pipeline: scan → parallel read + parse (rayon) → index. Files that fail to
/// load are counted in the [`LoadReport`] and otherwise ignored.
#[tracing::instrument(skip(config))]
pub fn load_project(root: &Path, config: &LoadConfig) -> Result<(Project, LoadReport), ProjectError> {
    let start = Instant::now();

    let mut roots = vec![(root, Origin::Project)];
    roots.extend(config.library_roots.iter().map(|p| (p.as_path(), Origin::Library)));
    for (path, _) in &roots {
        if !path.is_dir() {
            return Err(ProjectError::RootNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    let mut units = Vec::new();
    let mut files_scanned = 0usize;
    let mut files_skipped: HashMap<SkipReason, usize> = HashMap::new();
    let mut files_failed = 0usize;
    let mut failed_details: Vec<(String, String)> = Vec::new();

    for (source_root, origin) in roots {
        let scan_result = scan_files(source_root);
        files_scanned += scan_result.files.len();
        tracing::debug!(root = %source_root.display(), ?origin, files = scan_result.files.len(), "scanned source root");

        let parent_span = tracing::Span::current();
        let outcomes: Vec<FileOutcome> = scan_result
            .files
            .par_iter()
            .map(|rel_path| {
                let _guard =
                    tracing::debug_span!(parent: &parent_span, "parse_file", path = %rel_path.display()).entered();
                // Project units are keyed relative to the project root; library
                // units keep their full path so they never collide with them.
                let unit_path = match origin {
                    Origin::Project => normalize_path(rel_path),
                    Origin::Library => normalize_path(&source_root.join(rel_path)),
                };
                load_file(&source_root.join(rel_path), unit_path, origin)
            })
            .collect();

        for outcome in outcomes {
            match outcome {
                FileOutcome::Parsed(unit) => units.push(unit),
                FileOutcome::Skipped(reason) => {
                    *files_skipped.entry(reason).or_insert(0) += 1;
                }
                FileOutcome::Failed(path, reason) => {
                    tracing::warn!(path = %path, reason = %reason, "failed to load file");
                    files_failed += 1;
                    failed_details.push((path, reason));
                }
            }
        }
    }

    let report = LoadReport {
        files_scanned,
        files_loaded: units.len(),
        files_skipped,
        files_failed,
        failed_details,
        total_classes: units.iter().map(|u| u.classes.len()).sum(),
        duration: start.elapsed(),
    };

    tracing::info!(
        files_loaded = report.files_loaded,
        files_skipped = report.total_skipped(),
        files_failed = report.files_failed,
        classes = report.total_classes,
        duration_ms = report.duration.as_millis() as u64,
        "project loaded"
    );

    Ok((Project::from_units(root, units), report))
}

fn load_file(abs_path: &Path, unit_path: String, origin: Origin) -> FileOutcome {
    let content = match fs::read(abs_path) {
        Ok(c) => c,
        Err(e) => return FileOutcome::Failed(unit_path, e.to_string()),
    };

    match parse_unit(&unit_path, &content, origin) {
        Ok(unit) => FileOutcome::Parsed(unit),
        Err(e) => match &e {
            ParserError::FileTooLarge { .. } => FileOutcome::Skipped(SkipReason::TooLarge),
            ParserError::InvalidEncoding { .. } => FileOutcome::Skipped(SkipReason::InvalidEncoding),
            ParserError::UnsupportedFile { .. } => FileOutcome::Skipped(SkipReason::Unsupported),
            ParserError::ParseFailed { .. } => FileOutcome::Failed(unit_path, e.to_string()),
        },
    }
}

/// Forward-slash form of a path, used as the unit key on every platform.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
