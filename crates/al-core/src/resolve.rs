use crate::body::CallExpr;
use crate::decl::{ClassDecl, MethodDecl};
use crate::types::TypeRef;

/// A resolved method together with the class that declares it.
#[derive(Debug, Clone, Copy)]
pub struct MethodRef<'a> {
    pub class: &'a ClassDecl,
    pub method: &'a MethodDecl,
}

/// Resolves syntactic references to declarations of a loaded source tree.
///
/// `None` means the symbol is unresolvable from what was loaded (a JDK or
/// dependency type, a typo, an inferred lambda parameter, ...). Callers treat
/// it as "skip", never as an error.
pub trait SymbolResolver {
    /// Resolve a type written inside `from` (imports and nesting of the
    /// declaring unit apply).
    fn resolve_type<'a>(&'a self, ty: &TypeRef, from: &ClassDecl) -> Option<&'a ClassDecl>;

    /// Resolve a call expression appearing in `method` of class `from`.
    fn resolve_call<'a>(
        &'a self,
        call: &CallExpr,
        method: &MethodDecl,
        from: &ClassDecl,
    ) -> Option<MethodRef<'a>>;

    /// Whether `class` belongs to the analyzed project rather than to
    /// dependency sources.
    fn is_project_local(&self, class: &ClassDecl) -> bool;

    /// Direct supertypes of `class` that resolve: superclass first, then
    /// interfaces in declaration order.
    fn supertypes<'a>(&'a self, class: &ClassDecl) -> Vec<&'a ClassDecl> {
        class
            .superclass
            .iter()
            .chain(class.interfaces.iter())
            .filter_map(|ty| self.resolve_type(ty, class))
            .collect()
    }
}
