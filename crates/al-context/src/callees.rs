use std::collections::HashSet;

use al_core::{walk, CallExpr, ClassDecl, MethodDecl, SymbolResolver};
use serde::Serialize;

/// A directly called, project-local method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalleeEntry {
    /// Simple name of the declaring class.
    pub declaring_type: String,
    pub declaring_qualified: String,
    pub method_name: String,
    /// Full declaration text, Javadoc included.
    pub source: String,
}

/// Collect the project-local methods `method` calls directly.
///
/// Calls are visited depth-first with receivers and arguments before the call
/// itself. Unresolved and non-project callees are skipped. Entries are unique
/// per declaring class and method name; the first occurrence is kept.
pub fn collect<R: SymbolResolver + ?Sized>(
    resolver: &R,
    method: &MethodDecl,
    class: &ClassDecl,
) -> Vec<CalleeEntry> {
    let mut emitted: HashSet<(String, String)> = HashSet::new();
    let mut entries = Vec::new();

    walk(&method.body, &mut |call: &CallExpr| {
        let Some(target) = resolver.resolve_call(call, method, class) else {
            return;
        };
        if !resolver.is_project_local(target.class) {
            tracing::trace!(call = %call.name, owner = %target.class.qualified_name, "skipping non-project callee");
            return;
        }
        let key = (
            target.class.qualified_name.clone(),
            target.method.name.clone(),
        );
        if emitted.insert(key) {
            entries.push(CalleeEntry {
                declaring_type: target.class.name.clone(),
                declaring_qualified: target.class.qualified_name.clone(),
                method_name: target.method.name.clone(),
                source: target.method.source.clone(),
            });
        }
    });

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubResolver;

    fn names(entries: &[CalleeEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| format!("{}#{}", e.declaring_type, e.method_name))
            .collect()
    }

    #[test]
    fn dedups_at_first_occurrence() {
        let resolver = StubResolver::from_sources(&[
            r#"class Controller {
    private UserService userService;
    Object get(Long id) {
        UserService alias = userService;
        audit(id);
        userService.find(id);
        alias.find(id);
        return userService.find(id);
    }
    void audit(Long id) {}
}"#,
            "class UserService {\n    Object find(Long id) { return null; }\n}",
        ]);
        let class = resolver.class("Controller");
        let entries = collect(&resolver, &class.methods[0], class);
        assert_eq!(names(&entries), ["Controller#audit", "UserService#find"]);
        assert!(entries[1].source.contains("Object find(Long id)"));
    }

    #[test]
    fn nested_calls_and_lambdas_are_walked() {
        let resolver = StubResolver::from_sources(&[
            r#"class Controller {
    void run(java.util.List<Long> ids) {
        ids.forEach(id -> save(load(id)));
    }
    Object load(Long id) { return null; }
    void save(Object o) {}
}"#,
        ]);
        let class = resolver.class("Controller");
        let entries = collect(&resolver, &class.methods[0], class);
        assert_eq!(names(&entries), ["Controller#load", "Controller#save"]);
    }

    #[test]
    fn library_and_unresolved_calls_are_skipped() {
        let resolver = StubResolver::from_sources(&[
            "class Controller {\n    void run() {\n        Strings.trim(\"x\");\n        System.out.println();\n        local();\n    }\n    void local() {}\n}",
        ])
        .with_library(&["class Strings {\n    static String trim(String s) { return s; }\n}"]);
        let class = resolver.class("Controller");
        let entries = collect(&resolver, &class.methods[0], class);
        assert_eq!(names(&entries), ["Controller#local"]);
    }

    #[test]
    fn empty_body_has_no_callees() {
        let resolver = StubResolver::from_sources(&["interface Api {\n    void ping();\n}"]);
        let class = resolver.class("Api");
        assert!(collect(&resolver, &class.methods[0], class).is_empty());
    }
}
