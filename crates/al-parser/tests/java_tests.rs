#[cfg(test)]
mod java_tests {
    use al_core::{walk, BodyNode, CallExpr, ClassKind, Origin, Receiver, SourceUnit};
    use al_parser::error::ParserError;
    use al_parser::parse_unit;

    fn parse(source: &str) -> SourceUnit {
        parse_unit("src/Main.java", source.as_bytes(), Origin::Project).expect("parse should succeed")
    }

    fn call_names(body: &[BodyNode]) -> Vec<String> {
        let mut names = Vec::new();
        walk(body, &mut |c: &CallExpr| names.push(c.name.clone()));
        names
    }

    const CONTROLLER: &str = r#"
package com.acme.web;

import com.acme.dto.UserDto;
import com.acme.service.*;
import org.springframework.web.bind.annotation.*;

@RestController
@RequestMapping("/users")
public class UserController {
    private final UserService userService;

    public UserController(UserService userService) {
        this.userService = userService;
    }

    /** fetch user by id */
    @GetMapping(value = "/{id}", produces = "application/json")
    public UserDto getUser(@PathVariable Long id) {
        return userService.find(id);
    }
}
"#;

    #[test]
    fn extracts_package_and_imports() {
        let unit = parse(CONTROLLER);
        assert_eq!(unit.package, "com.acme.web");
        assert_eq!(unit.imports.len(), 3);
        assert_eq!(unit.imports[0].path, "com.acme.dto.UserDto");
        assert!(!unit.imports[0].on_demand);
        assert_eq!(unit.imports[1].path, "com.acme.service");
        assert!(unit.imports[1].on_demand);
    }

    #[test]
    fn extracts_class_annotations() {
        let unit = parse(CONTROLLER);
        let class = unit.class("com.acme.web.UserController").expect("controller class");
        assert_eq!(class.kind, ClassKind::Class);
        let names: Vec<&str> = class.annotations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["RestController", "RequestMapping"]);
        assert_eq!(class.annotations[1].attribute("value"), Some("\"/users\""));
    }

    #[test]
    fn extracts_method_with_doc_and_params() {
        let unit = parse(CONTROLLER);
        let class = &unit.classes[0];
        let method = class.methods.iter().find(|m| m.name == "getUser").expect("getUser");

        assert_eq!(method.owner, "com.acme.web.UserController");
        assert_eq!(method.doc_comment.as_ref().map(|d| d.text()), Some("fetch user by id".to_string()));
        assert!(method.source.starts_with("/** fetch user by id */"));
        assert!(method.source.trim_end().ends_with('}'));
        assert_eq!(method.return_type.as_ref().map(|t| t.text.as_str()), Some("UserDto"));

        assert_eq!(method.params.len(), 1);
        assert_eq!(method.params[0].name, "id");
        assert_eq!(method.params[0].ty.text, "Long");
        assert_eq!(method.params[0].annotations[0].name, "PathVariable");

        let mapping = &method.annotations[0];
        assert_eq!(mapping.name, "GetMapping");
        assert_eq!(mapping.attribute("value"), Some("\"/{id}\""));
        assert_eq!(mapping.attribute("produces"), Some("\"application/json\""));
    }

    #[test]
    fn constructor_has_no_return_type() {
        let unit = parse(CONTROLLER);
        let ctor = unit.classes[0]
            .methods
            .iter()
            .find(|m| m.name == "UserController")
            .expect("constructor");
        assert!(ctor.is_constructor());
    }

    #[test]
    fn extracts_fields_with_docs() {
        let source = r#"
package com.acme.dto;

public class UserDto {
    /** primary key */
    private Long id;
    private String firstName, lastName;
    public static final long serialVersionUID = 1L;
}
"#;
        let unit = parse(source);
        let fields = &unit.classes[0].fields;
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "firstName", "lastName", "serialVersionUID"]);
        assert_eq!(fields[0].doc_comment.as_ref().map(|d| d.text()), Some("primary key".to_string()));
        assert!(fields[1].doc_comment.is_none());
        assert!(fields[3].is_static);
    }

    #[test]
    fn extracts_generic_and_array_types() {
        let source = r#"
public class Page {
    private java.util.List<UserDto> items;
    private Map<String, List<Long>> index;
    private byte[] blob;
}
"#;
        let unit = parse(source);
        let fields = &unit.classes[0].fields;

        assert_eq!(fields[0].ty.base, "java.util.List");
        assert_eq!(fields[0].ty.args[0].base, "UserDto");

        assert_eq!(fields[1].ty.text, "Map<String, List<Long>>");
        assert_eq!(fields[1].ty.args.len(), 2);
        assert_eq!(fields[1].ty.args[1].args[0].base, "Long");

        assert_eq!(fields[2].ty.base, "byte");
        assert_eq!(fields[2].ty.array_dims, 1);
    }

    #[test]
    fn default_package_qualified_name() {
        let unit = parse("public class Main {}\n");
        assert_eq!(unit.package, "");
        assert_eq!(unit.classes[0].qualified_name, "Main");
    }

    #[test]
    fn nested_classes_are_flattened() {
        let source = r#"
package test;

public class Outer {
    public static class Inner {
        public void method() {}
    }
}
"#;
        let unit = parse(source);
        assert_eq!(unit.classes.len(), 2);
        assert_eq!(unit.classes[0].qualified_name, "test.Outer");
        assert_eq!(unit.classes[1].qualified_name, "test.Outer.Inner");
        assert_eq!(unit.classes[1].enclosing.as_deref(), Some("test.Outer"));
    }

    #[test]
    fn enum_constants_become_fields() {
        let source = "package test;\n\npublic enum Status {\n    ACTIVE, LOCKED;\n    private int code;\n}\n";
        let unit = parse(source);
        let class = &unit.classes[0];
        assert_eq!(class.kind, ClassKind::Enum);
        let names: Vec<&str> = class.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["ACTIVE", "LOCKED", "code"]);
        assert_eq!(class.fields[0].ty.text, "Status");
    }

    #[test]
    fn record_components_become_fields() {
        let source = "package test;\n\npublic record Point(int x, int y) {}\n";
        let unit = parse(source);
        let class = &unit.classes[0];
        assert_eq!(class.kind, ClassKind::Record);
        assert_eq!(class.fields.len(), 2);
        assert_eq!(class.fields[1].name, "y");
    }

    #[test]
    fn extracts_heritage() {
        let source = "package test;\n\npublic class Admin extends BaseUser implements Serializable, Comparable<Admin> {}\n";
        let unit = parse(source);
        let class = &unit.classes[0];
        assert_eq!(class.superclass.as_ref().map(|t| t.base.as_str()), Some("BaseUser"));
        let ifaces: Vec<&str> = class.interfaces.iter().map(|t| t.base.as_str()).collect();
        assert_eq!(ifaces, ["Serializable", "Comparable"]);
    }

    #[test]
    fn body_calls_in_walk_order() {
        let source = r#"
public class Main {
    public void run() {
        audit(load());
        items.forEach(i -> process(i));
        this.repo.save(new Entity(build()));
    }
}
"#;
        let unit = parse(source);
        let method = &unit.classes[0].methods[0];
        assert_eq!(
            call_names(&method.body),
            ["load", "audit", "process", "forEach", "build", "save"]
        );
    }

    #[test]
    fn call_receivers_are_classified() {
        let source = r#"
public class Main {
    public void run() {
        helper();
        this.helper();
        super.toString();
        service.find(1, 2);
        this.service.find(1);
        factory().create();
    }
}
"#;
        let unit = parse(source);
        let mut calls = Vec::new();
        walk(&unit.classes[0].methods[0].body, &mut |c: &CallExpr| calls.push(c.clone()));

        assert_eq!(calls[0].receiver, Receiver::Implicit);
        assert_eq!(calls[1].receiver, Receiver::This);
        assert_eq!(calls[2].receiver, Receiver::Super);
        assert_eq!(calls[3].receiver, Receiver::Name("service".to_string()));
        assert_eq!(calls[3].arg_count, 2);
        assert!(matches!(
            &calls[4].receiver,
            Receiver::Field { base, name } if **base == Receiver::This && name == "service"
        ));
        // `factory()` is visited before `create()`.
        assert_eq!(calls[5].name, "factory");
        assert!(matches!(&calls[6].receiver, Receiver::Call(inner) if inner.name == "factory"));
    }

    #[test]
    fn locals_record_declared_types() {
        let source = r#"
public class Main {
    public void run(List<Order> orders) {
        OrderService svc = lookup();
        var repo = new OrderRepository();
        for (Order o : orders) {
            svc.handle(o);
        }
    }
}
"#;
        let unit = parse(source);
        let locals = &unit.classes[0].methods[0].locals;
        let pairs: Vec<(&str, &str)> = locals.iter().map(|l| (l.name.as_str(), l.ty.base.as_str())).collect();
        assert_eq!(pairs, [("svc", "OrderService"), ("repo", "OrderRepository"), ("o", "Order")]);
        assert!(locals[0].offset < locals[1].offset);
    }

    #[test]
    fn lambda_parameters_and_resources_are_scoped() {
        let source = r#"
public class Main {
    public void run(List<Order> orders) {
        try (Reader in = open()) {
            orders.forEach(o -> in.read(o));
        }
        orders.stream().map((Order x) -> x.total());
    }
}
"#;
        let unit = parse(source);
        let locals = &unit.classes[0].methods[0].locals;
        let pairs: Vec<(&str, &str)> = locals.iter().map(|l| (l.name.as_str(), l.ty.base.as_str())).collect();
        assert_eq!(pairs, [("in", "Reader"), ("o", ""), ("x", "Order")]);

        let after_try = source.find("orders.stream").unwrap();
        assert!(locals[0].visible_at(source.find("in.read").unwrap()));
        assert!(!locals[0].visible_at(after_try));
        assert!(!locals[1].visible_at(after_try));
        assert!(locals[2].visible_at(source.find("x.total").unwrap()));
    }

    #[test]
    fn varargs_parameter() {
        let source = "public class Main {\n    void log(String fmt, Object... args) {}\n}\n";
        let unit = parse(source);
        let method = &unit.classes[0].methods[0];
        assert!(method.params[1].is_varargs);
        assert_eq!(method.params[1].ty.text, "Object...");
        assert!(method.accepts(1));
        assert!(method.accepts(4));
        assert!(!method.accepts(0));
    }

    #[test]
    fn rejects_non_java_file() {
        let err = parse_unit("build.gradle", b"plugins {}", Origin::Project).unwrap_err();
        assert!(matches!(err, ParserError::UnsupportedFile { .. }));
    }

    #[test]
    fn rejects_binary_content() {
        let err = parse_unit("src/A.java", b"class A {\x00}", Origin::Project).unwrap_err();
        assert!(matches!(err, ParserError::InvalidEncoding { .. }));
    }
}
