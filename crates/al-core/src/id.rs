use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_128;

/// Deterministic declaration identifier, computed as XXH3-128 of
/// `relative_path|qualified_name|byte_start|byte_end`.
///
/// Two parses of the same file yield the same IDs, which keeps the shape
/// expander's seen set stable across runs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeclId(pub u128);

impl DeclId {
    /// Generate a deterministic declaration ID from its identifying fields.
    pub fn generate(relative_path: &str, qualified_name: &str, byte_start: usize, byte_end: usize) -> Self {
        let input = format!("{}|{}|{}|{}", relative_path, qualified_name, byte_start, byte_end);
        Self(xxh3_128(input.as_bytes()))
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({:032x})", self.0)
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}
