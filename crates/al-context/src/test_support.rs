use std::collections::HashSet;

use al_core::{CallExpr, ClassDecl, MethodDecl, MethodRef, Origin, SymbolResolver, TypeRef};

/// Name-based resolver over a handful of parsed snippets.
///
/// Types resolve by simple or qualified name; calls resolve to the first
/// method with a matching name and arity, looking in the calling class first.
pub(crate) struct StubResolver {
    classes: Vec<ClassDecl>,
    library: HashSet<String>,
}

impl StubResolver {
    pub fn from_sources(sources: &[&str]) -> Self {
        Self {
            classes: parse_all(sources, Origin::Project),
            library: HashSet::new(),
        }
    }

    /// Add classes that resolve but are not project-local.
    pub fn with_library(mut self, sources: &[&str]) -> Self {
        let classes = parse_all(sources, Origin::Library);
        self.library.extend(classes.iter().map(|c| c.qualified_name.clone()));
        self.classes.extend(classes);
        self
    }

    pub fn class(&self, name: &str) -> &ClassDecl {
        self.find(name).unwrap_or_else(|| panic!("no class {name}"))
    }

    fn find(&self, name: &str) -> Option<&ClassDecl> {
        self.classes
            .iter()
            .find(|c| c.qualified_name == name || c.name == name)
    }
}

fn parse_all(sources: &[&str], origin: Origin) -> Vec<ClassDecl> {
    sources
        .iter()
        .enumerate()
        .flat_map(|(i, source)| {
            let path = format!("Stub{i}.java");
            al_parser::parse_unit(&path, source.as_bytes(), origin)
                .expect("stub source parses")
                .classes
        })
        .collect()
}

impl SymbolResolver for StubResolver {
    fn resolve_type<'a>(&'a self, ty: &TypeRef, _from: &ClassDecl) -> Option<&'a ClassDecl> {
        self.find(&ty.base)
    }

    fn resolve_call<'a>(
        &'a self,
        call: &CallExpr,
        _method: &MethodDecl,
        from: &ClassDecl,
    ) -> Option<MethodRef<'a>> {
        let own = self.find(&from.qualified_name);
        own.into_iter()
            .chain(self.classes.iter())
            .find_map(|class| {
                class
                    .methods_named(&call.name)
                    .find(|m| m.accepts(call.arg_count))
                    .map(|method| MethodRef { class, method })
            })
    }

    fn is_project_local(&self, class: &ClassDecl) -> bool {
        !self.library.contains(&class.qualified_name)
    }
}
