//! Context extraction for a single Spring controller method.
//!
//! [`build_context`] renders the analysis request sent to the LLM: route and
//! verb from the mapping annotations, the method's own source, the fields of
//! its parameter and return types, and the source of every project method it
//! calls directly. All symbol lookups go through an
//! [`al_core::SymbolResolver`]; nothing here touches the filesystem.

mod assembler;
pub mod callees;
pub mod metadata;
pub mod shape;

#[cfg(test)]
mod test_support;

pub use assembler::{build_context, ExtractOptions, MethodContext, ParamShape, ReturnShape};
pub use callees::CalleeEntry;
pub use metadata::{full_route, http_verb, route_fragment, HttpVerb};
pub use shape::FieldLine;
