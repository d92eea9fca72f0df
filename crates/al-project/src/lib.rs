pub mod error;
mod loader;
mod project;
pub mod report;
mod resolver;
mod scanner;

pub use loader::load_project;
pub use project::{Caret, Project};
pub use report::{LoadConfig, LoadReport, SkipReason};
pub use scanner::{scan_files, ScanResult};
