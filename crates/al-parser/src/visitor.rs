use std::path::Path;

use al_core::{Origin, SourceUnit};

use crate::error::ParserError;
use crate::file_check::{check_file_size, is_binary, is_java_source};

mod body;
mod java;
mod syntax;

/// Parse a single Java source file into a [`SourceUnit`].
///
/// # Arguments
/// * `file_path` - Path relative to the source root (forward-slash normalized).
/// * `content` - Raw UTF-8 source bytes.
/// * `origin` - Whether the file belongs to the analyzed project.
pub fn parse_unit(file_path: &str, content: &[u8], origin: Origin) -> Result<SourceUnit, ParserError> {
    check_file_size(file_path, content.len() as u64)?;

    if !is_java_source(Path::new(file_path)) {
        return Err(ParserError::UnsupportedFile {
            path: file_path.to_string(),
        });
    }

    if is_binary(content) {
        return Err(ParserError::InvalidEncoding {
            path: file_path.to_string(),
        });
    }

    let source = std::str::from_utf8(content).map_err(|_| ParserError::InvalidEncoding {
        path: file_path.to_string(),
    })?;

    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| ParserError::ParseFailed {
            path: file_path.to_string(),
            reason: format!("failed to set language: {e}"),
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| ParserError::ParseFailed {
        path: file_path.to_string(),
        reason: "tree-sitter returned no tree".to_string(),
    })?;

    if tree.root_node().has_error() {
        tracing::debug!(path = file_path, "syntax errors present, extracting what parsed");
    }

    let ctx = VisitorContext { file_path, source };
    Ok(java::extract(&ctx, &tree, origin))
}

/// Shared context passed to the visitors.
pub(crate) struct VisitorContext<'a> {
    pub file_path: &'a str,
    pub source: &'a str,
}

impl<'a> VisitorContext<'a> {
    /// Extract the text of a tree-sitter node from source.
    pub fn node_text(&self, node: tree_sitter::Node<'_>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}
