pub mod body;
mod decl;
mod id;
mod qualified_name;
mod resolve;
mod types;

pub use body::{walk, BodyNode, BodyVisitor, CallExpr, LocalVar, Receiver};
pub use decl::{
    Annotation, ClassDecl, ClassKind, DocComment, FieldDecl, Import, MethodDecl, Origin,
    ParamDecl, SourceUnit,
};
pub use id::DeclId;
pub use qualified_name::QualifiedName;
pub use resolve::{MethodRef, SymbolResolver};
pub use types::{normalize_type_text, TypeRef};
