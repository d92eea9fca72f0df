use std::path::PathBuf;

use al_core::{
    ClassDecl, ClassKind, DeclId, FieldDecl, Import, MethodDecl, Origin, ParamDecl,
    QualifiedName, SourceUnit, TypeRef,
};

use crate::visitor::body::MethodBody;
use crate::visitor::syntax::{doc_comment, doc_comment_node, modifiers, type_ref};
use crate::visitor::VisitorContext;

pub(crate) fn extract(ctx: &VisitorContext<'_>, tree: &tree_sitter::Tree, origin: Origin) -> SourceUnit {
    let root = tree.root_node();
    let package = extract_package_name(ctx, root);
    let mut imports = Vec::new();
    let mut classes = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "import_declaration" => {
                if let Some(import) = extract_import(ctx, child) {
                    imports.push(import);
                }
            }
            kind if is_type_declaration(kind) => {
                extract_type(ctx, child, &package, None, &mut classes);
            }
            _ => {}
        }
    }

    SourceUnit {
        path: PathBuf::from(ctx.file_path),
        package,
        imports,
        origin,
        classes,
    }
}

fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration" | "interface_declaration" | "enum_declaration" | "record_declaration"
    )
}

/// Extract a class-like declaration and, recursively, its nested types.
/// The class is pushed before its nested types.
fn extract_type(
    ctx: &VisitorContext<'_>,
    node: tree_sitter::Node<'_>,
    scope: &str,
    enclosing: Option<&str>,
    classes: &mut Vec<ClassDecl>,
) {
    let name = match node.child_by_field_name("name") {
        Some(n) => ctx.node_text(n),
        None => return,
    };
    if name.is_empty() {
        return;
    }

    let kind = match node.kind() {
        "interface_declaration" => ClassKind::Interface,
        "enum_declaration" => ClassKind::Enum,
        "record_declaration" => ClassKind::Record,
        _ => ClassKind::Class,
    };

    let qname = QualifiedName::join(&[scope, name]);
    let mods = modifiers(ctx, node);
    let (superclass, interfaces) = extract_heritage(ctx, node);

    let span_start = doc_comment_node(ctx, node).unwrap_or(node);
    let mut class = ClassDecl {
        id: DeclId::generate(ctx.file_path, &qname, node.start_byte(), node.end_byte()),
        name: name.to_string(),
        qualified_name: qname.clone(),
        kind,
        enclosing: enclosing.map(str::to_string),
        annotations: mods.annotations,
        doc_comment: doc_comment(ctx, node),
        superclass,
        interfaces,
        fields: Vec::new(),
        methods: Vec::new(),
        file_path: PathBuf::from(ctx.file_path),
        byte_range: span_start.start_byte()..node.end_byte(),
        line_range: span_start.start_position().row as u32..node.end_position().row as u32 + 1,
    };

    if kind == ClassKind::Record {
        if let Some(params) = node.child_by_field_name("parameters") {
            class.fields.extend(extract_params(ctx, params).into_iter().map(|p| FieldDecl {
                name: p.name,
                ty: p.ty,
                annotations: p.annotations,
                doc_comment: None,
                is_static: false,
            }));
        }
    }

    let mut nested = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        extract_body(ctx, body, &mut class, &mut nested);
    }

    classes.push(class);
    for child in nested {
        extract_type(ctx, child, &qname, Some(&qname), classes);
    }
}

/// Members of a class, interface, enum or record body. Nested type nodes are
/// returned through `nested` so the caller can flatten them after the
/// enclosing class.
fn extract_body<'t>(
    ctx: &VisitorContext<'_>,
    body: tree_sitter::Node<'t>,
    class: &mut ClassDecl,
    nested: &mut Vec<tree_sitter::Node<'t>>,
) {
    let mut cursor = body.walk();
    for child in body.children(&mut cursor) {
        match child.kind() {
            "method_declaration" | "constructor_declaration" => {
                if let Some(method) = extract_method(ctx, child, &class.qualified_name) {
                    class.methods.push(method);
                }
            }
            "field_declaration" | "constant_declaration" => {
                let is_constant = child.kind() == "constant_declaration";
                extract_field(ctx, child, is_constant, &mut class.fields);
            }
            "enum_constant" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    let mods = modifiers(ctx, child);
                    class.fields.push(FieldDecl {
                        name: ctx.node_text(name_node).to_string(),
                        ty: TypeRef::simple(&class.name),
                        annotations: mods.annotations,
                        doc_comment: doc_comment(ctx, child),
                        is_static: true,
                    });
                }
            }
            "enum_body_declarations" => extract_body(ctx, child, class, nested),
            kind if is_type_declaration(kind) => nested.push(child),
            _ => {}
        }
    }
}

fn extract_method(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>, owner: &str) -> Option<MethodDecl> {
    let name = ctx.node_text(node.child_by_field_name("name")?);
    if name.is_empty() {
        return None;
    }

    let qname = QualifiedName::join(&[owner, name]);
    let mods = modifiers(ctx, node);
    let params = node
        .child_by_field_name("parameters")
        .map(|p| extract_params(ctx, p))
        .unwrap_or_default();

    let return_type = if node.kind() == "constructor_declaration" {
        None
    } else {
        Some(
            node.child_by_field_name("type")
                .map(|t| type_ref(ctx, t))
                .unwrap_or_else(TypeRef::void),
        )
    };

    // The declaration text runs from its Javadoc (if any) to the closing brace.
    let span_start = doc_comment_node(ctx, node).unwrap_or(node);
    let byte_range = span_start.start_byte()..node.end_byte();

    let mut method_body = MethodBody::default();
    if let Some(body) = node.child_by_field_name("body") {
        method_body.extend_from(ctx, body);
    }

    Some(MethodDecl {
        id: DeclId::generate(ctx.file_path, &qname, node.start_byte(), node.end_byte()),
        name: name.to_string(),
        owner: owner.to_string(),
        annotations: mods.annotations,
        doc_comment: doc_comment(ctx, node),
        params,
        return_type,
        is_static: mods.is_static,
        source: ctx.source[byte_range.clone()].to_string(),
        byte_range,
        line_range: span_start.start_position().row as u32..node.end_position().row as u32 + 1,
        body: method_body.nodes,
        locals: method_body.locals,
    })
}

pub(super) fn extract_params(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> Vec<ParamDecl> {
    let mut params = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "formal_parameter" => {
                let name = child.child_by_field_name("name").map(|n| ctx.node_text(n));
                let ty = child.child_by_field_name("type").map(|t| type_ref(ctx, t));
                if let (Some(name), Some(ty)) = (name, ty) {
                    params.push(ParamDecl {
                        name: name.to_string(),
                        ty,
                        annotations: modifiers(ctx, child).annotations,
                        is_varargs: false,
                    });
                }
            }
            "spread_parameter" => {
                // `String... names`: the type node is the first non-modifier child.
                let mut inner = child.walk();
                let mut ty = None;
                let mut name = None;
                for part in child.named_children(&mut inner) {
                    match part.kind() {
                        "modifiers" => {}
                        "variable_declarator" => {
                            name = part.child_by_field_name("name").map(|n| ctx.node_text(n));
                        }
                        _ if ty.is_none() => ty = Some(type_ref(ctx, part)),
                        _ => {}
                    }
                }
                if let (Some(name), Some(element)) = (name, ty) {
                    let text = format!("{}...", element.text);
                    params.push(ParamDecl {
                        name: name.to_string(),
                        ty: TypeRef {
                            text,
                            base: element.base,
                            args: element.args,
                            array_dims: element.array_dims + 1,
                        },
                        annotations: modifiers(ctx, child).annotations,
                        is_varargs: true,
                    });
                }
            }
            _ => {}
        }
    }
    params
}

fn extract_field(
    ctx: &VisitorContext<'_>,
    node: tree_sitter::Node<'_>,
    is_constant: bool,
    fields: &mut Vec<FieldDecl>,
) {
    let Some(type_node) = node.child_by_field_name("type") else {
        return;
    };
    let ty = type_ref(ctx, type_node);
    let mods = modifiers(ctx, node);
    let doc = doc_comment(ctx, node);

    let mut cursor = node.walk();
    for child in node.children_by_field_name("declarator", &mut cursor) {
        if let Some(name_node) = child.child_by_field_name("name") {
            let name = ctx.node_text(name_node);
            if !name.is_empty() {
                fields.push(FieldDecl {
                    name: name.to_string(),
                    ty: ty.clone(),
                    annotations: mods.annotations.clone(),
                    doc_comment: doc.clone(),
                    is_static: mods.is_static || is_constant,
                });
            }
        }
    }
}

fn extract_heritage(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> (Option<TypeRef>, Vec<TypeRef>) {
    let mut superclass = None;
    let mut interfaces = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "superclass" => {
                let mut inner = child.walk();
                superclass = child
                    .named_children(&mut inner)
                    .find(|c| !c.is_extra())
                    .map(|t| type_ref(ctx, t));
            }
            "super_interfaces" | "extends_interfaces" => {
                collect_type_list(ctx, child, &mut interfaces);
            }
            _ => {}
        }
    }

    (superclass, interfaces)
}

fn collect_type_list(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>, out: &mut Vec<TypeRef>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "type_list" => collect_type_list(ctx, child, out),
            "type_identifier" | "scoped_type_identifier" | "generic_type" => {
                out.push(type_ref(ctx, child));
            }
            _ => {}
        }
    }
}

fn extract_import(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> Option<Import> {
    // import [static] a.b.C;  |  import [static] a.b.*;
    let mut path = None;
    let mut on_demand = false;
    let mut is_static = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "scoped_identifier" | "identifier" => path = Some(ctx.node_text(child).to_string()),
            "asterisk" => on_demand = true,
            "static" => is_static = true,
            _ => {}
        }
    }
    path.map(|path| Import {
        path,
        on_demand,
        is_static,
    })
}

fn extract_package_name(ctx: &VisitorContext<'_>, root: tree_sitter::Node<'_>) -> String {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "package_declaration" {
            let mut inner = child.walk();
            for pkg_child in child.children(&mut inner) {
                if pkg_child.kind() == "scoped_identifier" || pkg_child.kind() == "identifier" {
                    return ctx.node_text(pkg_child).to_string();
                }
            }
        }
    }
    // Default package.
    String::new()
}
