use std::ops::Range;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::body::{BodyNode, LocalVar};
use crate::id::DeclId;
use crate::qualified_name::QualifiedName;
use crate::types::TypeRef;

/// Where a source unit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Part of the analyzed codebase.
    Project,
    /// Dependency sources loaded for resolution only.
    Library,
}

/// One parsed source file. Owns every declaration it contains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Relative to the source root, forward-slash normalized.
    pub path: PathBuf,
    /// Empty for the default package.
    pub package: String,
    pub imports: Vec<Import>,
    pub origin: Origin,
    /// Top-level and nested classes, flattened in declaration order.
    pub classes: Vec<ClassDecl>,
}

impl SourceUnit {
    pub fn class(&self, qualified_name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|c| c.qualified_name == qualified_name)
    }
}

/// An `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// `com.acme.UserDto` for a single-type import, `com.acme` for `com.acme.*`.
    pub path: String,
    pub on_demand: bool,
    pub is_static: bool,
}

/// A source annotation such as `@GetMapping(value = "/{id}")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Name as written: `GetMapping` or a dot-qualified form.
    pub name: String,
    /// Attribute name → raw value text, in source order. A single unnamed
    /// argument is stored under `value`.
    pub attributes: Vec<(String, String)>,
}

impl Annotation {
    /// Raw source text of an attribute value, quotes included.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this annotation is `qualified` (e.g.
    /// `org.springframework.web.bind.annotation.GetMapping`), written either
    /// fully qualified or by simple name.
    pub fn is(&self, qualified: &str) -> bool {
        self.name == qualified || self.name == QualifiedName::simple_name(qualified)
    }
}

/// A `/** ... */` comment attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    pub raw: String,
}

impl DocComment {
    /// Comment body with delimiters and leading `*` stripped, lines joined
    /// by a single space.
    pub fn text(&self) -> String {
        let stripped = self
            .raw
            .strip_prefix("/**")
            .and_then(|s| s.strip_suffix("*/"))
            .unwrap_or(&self.raw);
        stripped
            .lines()
            .map(|line| line.trim().trim_start_matches('*').trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Record,
}

/// A class, interface, enum or record declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDecl {
    pub id: DeclId,
    pub name: String,
    /// Dot-separated, e.g. `com.acme.UserController` or `com.acme.Outer.Inner`.
    pub qualified_name: String,
    pub kind: ClassKind,
    /// Qualified name of the enclosing class for nested declarations.
    pub enclosing: Option<String>,
    pub annotations: Vec<Annotation>,
    pub doc_comment: Option<DocComment>,
    pub superclass: Option<TypeRef>,
    /// `implements` list for classes, `extends` list for interfaces.
    pub interfaces: Vec<TypeRef>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    /// Relative path of the declaring unit.
    pub file_path: PathBuf,
    pub byte_range: Range<usize>,
    /// 0-indexed, end-exclusive.
    pub line_range: Range<u32>,
}

impl ClassDecl {
    pub fn methods_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a MethodDecl> + 'n
    where
        'a: 'n,
    {
        self.methods.iter().filter(move |m| m.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A field, enum constant or record component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
    pub annotations: Vec<Annotation>,
    pub doc_comment: Option<DocComment>,
    pub is_static: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeRef,
    pub annotations: Vec<Annotation>,
    pub is_varargs: bool,
}

/// A method or constructor declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub id: DeclId,
    pub name: String,
    /// Qualified name of the declaring class.
    pub owner: String,
    pub annotations: Vec<Annotation>,
    pub doc_comment: Option<DocComment>,
    pub params: Vec<ParamDecl>,
    /// `None` for constructors; `void` methods carry `TypeRef::void()`.
    pub return_type: Option<TypeRef>,
    pub is_static: bool,
    /// Full declaration text, annotations and modifiers included.
    pub source: String,
    pub byte_range: Range<usize>,
    /// 0-indexed, end-exclusive.
    pub line_range: Range<u32>,
    /// Statements of the body; empty for abstract and interface methods.
    pub body: Vec<BodyNode>,
    /// Local variables declared anywhere in the body, in source order.
    pub locals: Vec<LocalVar>,
}

impl MethodDecl {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn param(&self, name: &str) -> Option<&ParamDecl> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Whether the method accepts `arg_count` arguments.
    pub fn accepts(&self, arg_count: usize) -> bool {
        match self.params.last() {
            Some(last) if last.is_varargs => arg_count + 1 >= self.params.len(),
            _ => arg_count == self.params.len(),
        }
    }
}
