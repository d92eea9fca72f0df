pub mod error;
mod file_check;
mod visitor;

pub use file_check::{check_file_size, is_binary, is_java_source};
pub use visitor::parse_unit;
