use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use al_core::{ClassDecl, MethodRef, Origin, SourceUnit};

use crate::error::ProjectError;

/// Caret position inside a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caret {
    /// 1-based line number.
    Line(u32),
    /// Byte offset from the start of the file.
    Offset(usize),
}

impl Caret {
    /// Convert a 1-based line and column into a byte offset within `source`.
    /// Columns count characters; a column past the end of the line clamps to
    /// the line end.
    pub fn from_line_column(source: &str, line: u32, column: u32) -> Option<Caret> {
        if line == 0 || column == 0 {
            return None;
        }
        let mut offset = 0usize;
        for (index, text) in source.split_inclusive('\n').enumerate() {
            if index + 1 == line as usize {
                let content = text.trim_end_matches(['\n', '\r']);
                let within = content
                    .char_indices()
                    .nth(column as usize - 1)
                    .map(|(i, _)| i)
                    .unwrap_or(content.len());
                return Some(Caret::Offset(offset + within));
            }
            offset += text.len();
        }
        None
    }
}

/// Every source unit loaded for one analysis, indexed by qualified class name
/// and by file path.
///
/// When the same qualified name is declared both in the project and in a
/// library root, the project declaration wins.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    units: Vec<SourceUnit>,
    classes: HashMap<String, (usize, usize)>,
    units_by_path: HashMap<PathBuf, usize>,
}

impl Project {
    pub fn from_units(root: impl Into<PathBuf>, units: Vec<SourceUnit>) -> Self {
        let mut classes = HashMap::new();
        let mut units_by_path = HashMap::new();

        for pass in [Origin::Project, Origin::Library] {
            for (unit_idx, unit) in units.iter().enumerate().filter(|(_, u)| u.origin == pass) {
                units_by_path
                    .entry(normalize(&unit.path))
                    .or_insert(unit_idx);
                for (class_idx, class) in unit.classes.iter().enumerate() {
                    classes
                        .entry(class.qualified_name.clone())
                        .or_insert((unit_idx, class_idx));
                }
            }
        }

        Self {
            root: root.into(),
            units,
            classes,
            units_by_path,
        }
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Look up a class by fully qualified name (`com.acme.Outer.Inner`).
    pub fn class(&self, qualified_name: &str) -> Option<&ClassDecl> {
        let &(unit, class) = self.classes.get(qualified_name)?;
        self.units.get(unit)?.classes.get(class)
    }

    /// The unit declaring `class`.
    pub fn unit_of(&self, class: &ClassDecl) -> Option<&SourceUnit> {
        let &(unit, _) = self.classes.get(&class.qualified_name)?;
        self.units.get(unit)
    }

    /// The unit loaded from `path`, which is either absolute or relative to
    /// the project root.
    pub fn unit_at(&self, path: &Path) -> Option<&SourceUnit> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let idx = self.units_by_path.get(&normalize(relative))?;
        self.units.get(*idx)
    }

    /// Find the innermost method or constructor enclosing `caret` in `path`.
    ///
    /// Returns `Ok(None)` when the caret is outside every method, and
    /// [`ProjectError::UnknownFile`] when `path` was not loaded.
    pub fn method_at(&self, path: &Path, caret: Caret) -> Result<Option<MethodRef<'_>>, ProjectError> {
        let unit = self.unit_at(path).ok_or_else(|| ProjectError::UnknownFile {
            path: path.to_path_buf(),
        })?;

        let contains = |m: &al_core::MethodDecl| match caret {
            Caret::Line(line) => line > 0 && m.line_range.contains(&(line - 1)),
            Caret::Offset(offset) => m.byte_range.contains(&offset),
        };

        let found = unit
            .classes
            .iter()
            .flat_map(|class| class.methods.iter().map(move |method| MethodRef { class, method }))
            .filter(|r| contains(r.method))
            .min_by_key(|r| r.method.byte_range.len());

        tracing::debug!(
            path = %path.display(),
            ?caret,
            method = found.map(|r| r.method.name.as_str()),
            "caret lookup"
        );
        Ok(found)
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use al_parser::parse_unit;

    const SOURCE: &str = "package com.acme;\n\npublic class Outer {\n    void first() {\n        run();\n    }\n\n    static class Inner {\n        void second() {}\n    }\n}\n";

    fn project() -> Project {
        let unit = parse_unit("src/Outer.java", SOURCE.as_bytes(), Origin::Project).unwrap();
        Project::from_units("/work", vec![unit])
    }

    #[test]
    fn caret_by_line() {
        let project = project();
        let found = project.method_at(Path::new("src/Outer.java"), Caret::Line(5)).unwrap();
        assert_eq!(found.unwrap().method.name, "first");

        let found = project.method_at(Path::new("src/Outer.java"), Caret::Line(9)).unwrap();
        let found = found.unwrap();
        assert_eq!(found.method.name, "second");
        assert_eq!(found.class.qualified_name, "com.acme.Outer.Inner");
    }

    #[test]
    fn caret_outside_any_method() {
        let project = project();
        let found = project.method_at(Path::new("src/Outer.java"), Caret::Line(1)).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn caret_accepts_absolute_and_dotted_paths() {
        let project = project();
        assert!(project
            .method_at(Path::new("/work/src/Outer.java"), Caret::Line(4))
            .unwrap()
            .is_some());
        assert!(project
            .method_at(Path::new("./src/Outer.java"), Caret::Line(4))
            .unwrap()
            .is_some());
    }

    #[test]
    fn unknown_file_is_an_error() {
        let err = project().method_at(Path::new("src/Missing.java"), Caret::Line(1)).unwrap_err();
        assert!(matches!(err, ProjectError::UnknownFile { .. }));
    }

    #[test]
    fn line_column_to_offset() {
        let caret = Caret::from_line_column(SOURCE, 5, 9).unwrap();
        let Caret::Offset(offset) = caret else { panic!("expected offset") };
        assert!(SOURCE[offset..].starts_with("run()"));
        assert_eq!(Caret::from_line_column(SOURCE, 500, 1), None);
    }

    #[test]
    fn project_declaration_shadows_library() {
        let lib = parse_unit("lib/Outer.java", SOURCE.as_bytes(), Origin::Library).unwrap();
        let own = parse_unit("src/Outer.java", SOURCE.as_bytes(), Origin::Project).unwrap();
        let project = Project::from_units("/work", vec![lib, own]);
        let class = project.class("com.acme.Outer").unwrap();
        assert_eq!(class.file_path, PathBuf::from("src/Outer.java"));
        assert_eq!(project.unit_of(class).unwrap().origin, Origin::Project);
    }
}
