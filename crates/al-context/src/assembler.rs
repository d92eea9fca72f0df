use std::fmt;

use al_core::{ClassDecl, MethodDecl, SymbolResolver};
use serde::Serialize;

use crate::callees::{self, CalleeEntry};
use crate::metadata::{full_route, http_verb, HttpVerb};
use crate::shape::{self, FieldLine};

/// Knobs for [`MethodContext::extract`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Expand the element type of a collection, generic wrapper or array when
    /// the outer type itself has nothing to list (`List<UserDto>` lists the
    /// fields of `UserDto`).
    pub unwrap_generic_elements: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamShape {
    pub name: String,
    pub type_name: String,
    pub fields: Vec<FieldLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnShape {
    pub type_name: String,
    pub fields: Vec<FieldLine>,
}

/// Everything known about one endpoint method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodContext {
    /// Qualified name of the owning class.
    pub class_name: String,
    pub method_name: String,
    pub route: String,
    pub verb: HttpVerb,
    pub doc_comment: Option<String>,
    pub source: String,
    pub params: Vec<ParamShape>,
    /// `None` for constructors.
    pub returns: Option<ReturnShape>,
    pub callees: Vec<CalleeEntry>,
}

impl MethodContext {
    /// Extract the context of `method`, declared in `class`.
    ///
    /// Pure with respect to the resolver: the same tree always yields the same
    /// context.
    #[tracing::instrument(skip_all, fields(class = %class.qualified_name, method = %method.name))]
    pub fn extract<R: SymbolResolver + ?Sized>(
        resolver: &R,
        method: &MethodDecl,
        class: &ClassDecl,
        options: &ExtractOptions,
    ) -> Self {
        let params = method
            .params
            .iter()
            .map(|param| {
                let mut fields = Vec::new();
                shape::expand(resolver, &param.ty, class, options, &mut fields);
                ParamShape {
                    name: param.name.clone(),
                    type_name: param.ty.display_name().to_string(),
                    fields,
                }
            })
            .collect();

        let returns = method.return_type.as_ref().map(|ty| {
            let mut fields = Vec::new();
            shape::expand(resolver, ty, class, options, &mut fields);
            ReturnShape {
                type_name: ty.display_name().to_string(),
                fields,
            }
        });

        let callees = callees::collect(resolver, method, class);
        tracing::debug!(callees = callees.len(), "context extracted");

        Self {
            class_name: class.qualified_name.clone(),
            method_name: method.name.clone(),
            route: full_route(class, method),
            verb: http_verb(&method.annotations),
            doc_comment: method.doc_comment.as_ref().map(|d| d.text()),
            source: method.source.clone(),
            params,
            returns,
            callees,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MethodContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Analysis request: HTTP endpoint")?;
        writeln!(f, "Controller class: {}", self.class_name)?;
        writeln!(f, "Method: {}", self.method_name)?;
        let route = if self.route.is_empty() { "/" } else { self.route.as_str() };
        writeln!(f, "Full route: {route}")?;
        writeln!(f, "HTTP method: {}", self.verb)?;
        if let Some(doc) = &self.doc_comment {
            writeln!(f, "Doc comment: {doc}")?;
        }
        writeln!(f, "Source:\n{}\n", self.source)?;

        writeln!(f, "Parameters:")?;
        for param in &self.params {
            writeln!(f, " - name: {}, type: {}", param.name, param.type_name)?;
            for line in &param.fields {
                writeln!(f, "{line}")?;
            }
        }

        if let Some(returns) = &self.returns {
            writeln!(f, "Return type ({}):", returns.type_name)?;
            for line in &returns.fields {
                writeln!(f, "{line}")?;
            }
        }

        writeln!(f, "\n=== Directly called methods ===")?;
        for callee in &self.callees {
            writeln!(f, "/* declared in: {} */", callee.declaring_type)?;
            writeln!(f, "{}\n", callee.source)?;
        }
        Ok(())
    }
}

/// Render the analysis request for `method` as text.
pub fn build_context<R: SymbolResolver + ?Sized>(
    resolver: &R,
    method: &MethodDecl,
    class: &ClassDecl,
    options: &ExtractOptions,
) -> String {
    MethodContext::extract(resolver, method, class, options).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubResolver;

    const CONTROLLER: &str = r#"package com.acme.web;

@RestController
@RequestMapping("/users")
public class UserController {
    private UserService userService;

    /** fetch user by id */
    @GetMapping(value = "/{id}")
    public UserDto getUser(@PathVariable Long id) {
        return userService.find(id);
    }

    @PostMapping
    public void create(java.time.Instant at) {}

    public UserController(UserService userService) {
        this.userService = userService;
    }
}
"#;

    fn resolver() -> StubResolver {
        StubResolver::from_sources(&[
            CONTROLLER,
            "package com.acme.service;\n\npublic class UserService {\n    public UserDto find(Long id) { return null; }\n}",
            "package com.acme.dto;\n\npublic class UserDto {\n    /** primary key */\n    private Long id;\n    private String name;\n}",
        ])
    }

    fn method<'a>(class: &'a ClassDecl, name: &str) -> &'a MethodDecl {
        class.methods.iter().find(|m| m.name == name).unwrap()
    }

    #[test]
    fn get_user_end_to_end() {
        let resolver = resolver();
        let class = resolver.class("com.acme.web.UserController");
        let ctx = MethodContext::extract(&resolver, method(class, "getUser"), class, &ExtractOptions::default());

        assert_eq!(ctx.route, "/users/{id}");
        assert_eq!(ctx.verb, HttpVerb::Get);
        assert_eq!(ctx.doc_comment.as_deref(), Some("fetch user by id"));
        assert_eq!(ctx.callees.len(), 1);
        assert_eq!(ctx.callees[0].method_name, "find");
        assert_eq!(ctx.callees[0].declaring_type, "UserService");

        let text = ctx.render();
        let expected_head = "### Analysis request: HTTP endpoint\n\
Controller class: com.acme.web.UserController\n\
Method: getUser\n\
Full route: /users/{id}\n\
HTTP method: GET\n\
Doc comment: fetch user by id\n\
Source:\n\
/** fetch user by id */\n";
        assert!(text.starts_with(expected_head), "{text}");
        assert!(text.contains("Parameters:\n - name: id, type: Long\nReturn type (UserDto):\n"));
        assert!(text.contains("    * field: id, type: Long, doc: primary key\n    * field: name, type: String\n"));
        assert!(text.contains(
            "\n=== Directly called methods ===\n/* declared in: UserService */\npublic UserDto find(Long id) { return null; }\n\n"
        ));
    }

    #[test]
    fn unmarked_method_routes_to_class_or_root() {
        let resolver = StubResolver::from_sources(&[
            "class Plain {\n    void ping() {}\n}",
            CONTROLLER,
        ]);
        let plain = resolver.class("Plain");
        let ctx = MethodContext::extract(&resolver, &plain.methods[0], plain, &ExtractOptions::default());
        assert_eq!(ctx.route, "/");
        assert_eq!(ctx.verb, HttpVerb::All);

        let controller = resolver.class("UserController");
        let ctx = MethodContext::extract(
            &resolver,
            method(controller, "create"),
            controller,
            &ExtractOptions::default(),
        );
        assert_eq!(ctx.route, "/users");
        assert_eq!(ctx.verb, HttpVerb::Post);
    }

    #[test]
    fn platform_parameter_has_only_its_own_line() {
        let resolver = resolver();
        let class = resolver.class("UserController");
        let text = build_context(&resolver, method(class, "create"), class, &ExtractOptions::default());
        assert!(text.contains("Parameters:\n - name: at, type: java.time.Instant\nReturn type (void):\n\n==="));
    }

    #[test]
    fn constructor_has_no_return_block() {
        let resolver = resolver();
        let class = resolver.class("UserController");
        let text = build_context(&resolver, method(class, "UserController"), class, &ExtractOptions::default());
        assert!(!text.contains("Return type"));
        assert!(text.contains(" - name: userService, type: UserService\n"));
    }

    #[test]
    fn repeated_builds_are_identical() {
        let resolver = resolver();
        let class = resolver.class("UserController");
        let target = method(class, "getUser");
        let first = build_context(&resolver, target, class, &ExtractOptions::default());
        let second = build_context(&resolver, target, class, &ExtractOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_to_json() {
        let resolver = resolver();
        let class = resolver.class("UserController");
        let ctx = MethodContext::extract(&resolver, method(class, "getUser"), class, &ExtractOptions::default());
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["verb"], "GET");
        assert_eq!(json["returns"]["fields"][0]["name"], "id");
        assert_eq!(json["callees"][0]["declaring_qualified"], "com.acme.service.UserService");
    }
}
