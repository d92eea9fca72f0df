//! Field listing of parameter and return types.

use std::collections::HashSet;
use std::fmt;

use al_core::{ClassDecl, DeclId, FieldDecl, QualifiedName, SymbolResolver, TypeRef};
use serde::Serialize;

use crate::assembler::ExtractOptions;

/// One listed field. `depth` is 0 for fields of the expanded type itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLine {
    pub depth: usize,
    pub name: String,
    pub type_name: String,
    pub doc: Option<String>,
}

impl fmt::Display for FieldLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = 4 + 2 * self.depth;
        write!(f, "{:indent$}* field: {}, type: {}", "", self.name, self.type_name)?;
        if let Some(doc) = &self.doc {
            write!(f, ", doc: {doc}")?;
        }
        Ok(())
    }
}

/// List the fields of `ty` (written inside `from`) into `sink`, recursing into
/// each field's own type.
///
/// Unresolved and `java.*` types produce nothing. A field whose type is
/// already being expanded further up the same path is listed but not
/// descended into, which ends self- and mutually-referencing types. Sibling
/// fields of the same type are each expanded in full.
pub fn expand<R: SymbolResolver + ?Sized>(
    resolver: &R,
    ty: &TypeRef,
    from: &ClassDecl,
    options: &ExtractOptions,
    sink: &mut Vec<FieldLine>,
) {
    let mut path = HashSet::new();
    expand_into(resolver, ty, from, 0, options, &mut path, sink);
}

fn expand_into<R: SymbolResolver + ?Sized>(
    resolver: &R,
    ty: &TypeRef,
    from: &ClassDecl,
    depth: usize,
    options: &ExtractOptions,
    path: &mut HashSet<DeclId>,
    sink: &mut Vec<FieldLine>,
) {
    let Some(class) = expandable(resolver, ty, from, options) else {
        return;
    };
    if !path.insert(class.id) {
        return;
    }

    for (declaring, field) in all_fields(resolver, class) {
        sink.push(FieldLine {
            depth,
            name: field.name.clone(),
            type_name: field.ty.display_name().to_string(),
            doc: field.doc_comment.as_ref().map(|d| d.text()),
        });
        expand_into(resolver, &field.ty, declaring, depth + 1, options, path, sink);
    }
    path.remove(&class.id);
}

/// The project-side class `ty` denotes, if it should be expanded.
fn expandable<'a, R: SymbolResolver + ?Sized>(
    resolver: &'a R,
    ty: &TypeRef,
    from: &ClassDecl,
    options: &ExtractOptions,
) -> Option<&'a ClassDecl> {
    let direct = resolver
        .resolve_type(ty, from)
        .filter(|class| !QualifiedName::is_platform(&class.qualified_name));
    // `UserDto[]` is an array, not a `UserDto`.
    let direct = direct.filter(|_| !ty.is_array());
    if direct.is_some() || !options.unwrap_generic_elements {
        return direct;
    }
    let element = ty.element()?;
    expandable(resolver, &element, from, options)
}

/// Own fields, then those of the superclass chain, then interface constants.
fn all_fields<'a, R: SymbolResolver + ?Sized>(
    resolver: &'a R,
    class: &'a ClassDecl,
) -> Vec<(&'a ClassDecl, &'a FieldDecl)> {
    let mut visited = HashSet::new();
    let mut fields = Vec::new();
    let mut stack = vec![class];
    while let Some(next) = stack.pop() {
        if !visited.insert(next.id) {
            continue;
        }
        fields.extend(next.fields.iter().map(|f| (next, f)));
        stack.extend(resolver.supertypes(next).into_iter().rev());
    }
    fields
}
