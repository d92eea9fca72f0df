use al_core::{normalize_type_text, Annotation, DocComment, TypeRef};

use crate::visitor::VisitorContext;

/// Modifier keywords and annotations attached to a declaration.
#[derive(Default)]
pub(crate) struct Modifiers {
    pub annotations: Vec<Annotation>,
    pub is_static: bool,
}

/// Read the `modifiers` child of a declaration node.
pub(crate) fn modifiers(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> Modifiers {
    let mut out = Modifiers::default();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "modifiers" {
            continue;
        }
        let mut inner = child.walk();
        for modifier in child.children(&mut inner) {
            match modifier.kind() {
                "static" => out.is_static = true,
                "marker_annotation" | "annotation" => {
                    if let Some(ann) = annotation(ctx, modifier) {
                        out.annotations.push(ann);
                    }
                }
                _ => {}
            }
        }
    }
    out
}

/// `@Name`, `@Name("x")` or `@Name(key = value, ...)`.
fn annotation(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> Option<Annotation> {
    let name = ctx.node_text(node.child_by_field_name("name")?).to_string();
    let mut attributes = Vec::new();

    if let Some(args) = node.child_by_field_name("arguments") {
        let mut cursor = args.walk();
        for arg in args.named_children(&mut cursor) {
            if arg.is_extra() {
                continue;
            }
            if arg.kind() == "element_value_pair" {
                let key = arg.child_by_field_name("key").map(|k| ctx.node_text(k));
                let value = arg.child_by_field_name("value").map(|v| ctx.node_text(v));
                if let (Some(key), Some(value)) = (key, value) {
                    attributes.push((key.to_string(), value.to_string()));
                }
            } else {
                attributes.push(("value".to_string(), ctx.node_text(arg).to_string()));
            }
        }
    }

    Some(Annotation { name, attributes })
}

/// Build a [`TypeRef`] from any type node.
pub(crate) fn type_ref(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> TypeRef {
    let text = normalize_type_text(ctx.node_text(node));
    match node.kind() {
        "array_type" => {
            let element = node
                .child_by_field_name("element")
                .map(|e| type_ref(ctx, e))
                .unwrap_or_else(|| TypeRef::simple(&text));
            let dims = node
                .child_by_field_name("dimensions")
                .map(|d| ctx.node_text(d).matches('[').count() as u32)
                .unwrap_or(1);
            TypeRef {
                text,
                base: element.base,
                args: element.args,
                array_dims: element.array_dims + dims,
            }
        }
        "generic_type" => {
            let mut base = String::new();
            let mut args = Vec::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "type_identifier" | "scoped_type_identifier" => {
                        base = normalize_type_text(ctx.node_text(child));
                    }
                    "type_arguments" => args = type_arguments(ctx, child),
                    _ => {}
                }
            }
            TypeRef {
                text,
                base,
                args,
                array_dims: 0,
            }
        }
        "annotated_type" => {
            // `@NotNull UserDto`: the annotation is not part of the type.
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .filter(|c| !matches!(c.kind(), "marker_annotation" | "annotation"))
                .last();
            match inner {
                Some(inner) => type_ref(ctx, inner),
                None => TypeRef::simple(&text),
            }
        }
        _ => TypeRef {
            base: text.clone(),
            text,
            args: Vec::new(),
            array_dims: 0,
        },
    }
}

fn type_arguments(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> Vec<TypeRef> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .map(|arg| {
            if arg.kind() == "wildcard" {
                // `? extends UserDto` is shown as written, but its bound is
                // the type that matters for unwrapping.
                let mut inner = arg.walk();
                let bound = arg
                    .named_children(&mut inner)
                    .filter(|c| !matches!(c.kind(), "marker_annotation" | "annotation"))
                    .last();
                match bound {
                    Some(bound) => type_ref(ctx, bound),
                    None => TypeRef::simple("?"),
                }
            } else {
                type_ref(ctx, arg)
            }
        })
        .collect()
}

/// The `/** ... */` comment directly preceding `node`, if any.
///
/// Any other comment in between detaches the Javadoc, matching javac.
pub(crate) fn doc_comment(ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> Option<DocComment> {
    doc_comment_node(ctx, node).map(|prev| DocComment {
        raw: ctx.node_text(prev).to_string(),
    })
}

/// The preceding Javadoc node, also used to extend a declaration's span.
pub(crate) fn doc_comment_node<'t>(
    ctx: &VisitorContext<'_>,
    node: tree_sitter::Node<'t>,
) -> Option<tree_sitter::Node<'t>> {
    let prev = node.prev_sibling()?;
    if prev.kind() != "block_comment" {
        return None;
    }
    let text = ctx.node_text(prev);
    (text.starts_with("/**") && text != "/**/").then_some(prev)
}
