use al_core::{BodyNode, CallExpr, LocalVar, Receiver, TypeRef};

use crate::visitor::java::extract_params;
use crate::visitor::syntax::type_ref;
use crate::visitor::VisitorContext;

/// Syntax tree and local variables of one method body.
#[derive(Default)]
pub(crate) struct MethodBody {
    pub nodes: Vec<BodyNode>,
    pub locals: Vec<LocalVar>,
}

impl MethodBody {
    /// Convert the statements of a `block` / `constructor_body`.
    pub fn extend_from(&mut self, ctx: &VisitorContext<'_>, body: tree_sitter::Node<'_>) {
        let nodes = self.children(ctx, body);
        self.nodes.extend(nodes);
    }

    fn children(&mut self, ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> Vec<BodyNode> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.is_extra() {
                continue;
            }
            if let Some(converted) = self.convert(ctx, child) {
                out.push(converted);
            }
        }
        out
    }

    /// Convert one node; leaves without calls collapse to `None`.
    fn convert(&mut self, ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> Option<BodyNode> {
        match node.kind() {
            "method_invocation" => Some(BodyNode::Call(self.call(ctx, node))),
            "object_creation_expression" => {
                let (ty, args) = self.creation(ctx, node);
                Some(BodyNode::New { ty, args })
            }
            "lambda_expression" => {
                if let Some(params) = node.child_by_field_name("parameters") {
                    self.declare_lambda_params(ctx, params, node.end_byte());
                }
                let body = node.child_by_field_name("body")?;
                let nodes = if body.kind() == "block" {
                    self.children(ctx, body)
                } else {
                    self.convert(ctx, body).into_iter().collect()
                };
                Some(BodyNode::Lambda(nodes))
            }
            "block" => Some(BodyNode::Block(self.children(ctx, node))),
            "local_variable_declaration" => {
                self.declare_locals(ctx, node);
                non_empty(self.children(ctx, node))
            }
            "resource" => {
                self.declare_resource(ctx, node);
                non_empty(self.children(ctx, node))
            }
            "enhanced_for_statement" => {
                let name = node.child_by_field_name("name").map(|n| ctx.node_text(n));
                let ty = node.child_by_field_name("type").map(|t| type_ref(ctx, t));
                if let (Some(name), Some(ty)) = (name, ty) {
                    self.declare(name, ty, node.start_byte(), node.end_byte());
                }
                non_empty(self.children(ctx, node))
            }
            "catch_formal_parameter" => {
                self.declare_catch_param(ctx, node);
                None
            }
            _ => non_empty(self.children(ctx, node)),
        }
    }

    fn call(&mut self, ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> CallExpr {
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.node_text(n))
            .unwrap_or("")
            .to_string();
        let receiver = match node.child_by_field_name("object") {
            Some(object) => self.receiver(ctx, object),
            None => Receiver::Implicit,
        };
        let args = node
            .child_by_field_name("arguments")
            .map(|a| self.children(ctx, a))
            .unwrap_or_default();
        CallExpr {
            name,
            receiver,
            arg_count: node.child_by_field_name("arguments").map(count_args).unwrap_or(0),
            args,
            offset: node.start_byte(),
            line: node.start_position().row as u32,
        }
    }

    fn receiver(&mut self, ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> Receiver {
        match node.kind() {
            "this" => Receiver::This,
            "super" => Receiver::Super,
            "identifier" => Receiver::Name(ctx.node_text(node).to_string()),
            "field_access" => {
                let base = node
                    .child_by_field_name("object")
                    .map(|o| self.receiver(ctx, o))
                    .unwrap_or(Receiver::Unknown(Vec::new()));
                let name = node
                    .child_by_field_name("field")
                    .map(|f| ctx.node_text(f))
                    .unwrap_or("");
                Receiver::Field {
                    base: Box::new(base),
                    name: name.to_string(),
                }
            }
            "method_invocation" => Receiver::Call(Box::new(self.call(ctx, node))),
            "object_creation_expression" => {
                let (ty, args) = self.creation(ctx, node);
                Receiver::New { ty, args }
            }
            "parenthesized_expression" => {
                let mut cursor = node.walk();
                let inner = node.named_children(&mut cursor).find(|c| !c.is_extra());
                match inner {
                    Some(inner) => self.receiver(ctx, inner),
                    None => Receiver::Unknown(Vec::new()),
                }
            }
            _ => Receiver::Unknown(self.children(ctx, node)),
        }
    }

    fn creation(&mut self, ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) -> (TypeRef, Vec<BodyNode>) {
        let ty = node
            .child_by_field_name("type")
            .map(|t| type_ref(ctx, t))
            .unwrap_or_else(|| TypeRef::simple("Object"));
        let mut args = node
            .child_by_field_name("arguments")
            .map(|a| self.children(ctx, a))
            .unwrap_or_default();
        // Anonymous class bodies are walked like any other nested code.
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "class_body" {
                args.extend(self.children(ctx, child));
            }
        }
        (ty, args)
    }

    fn declare(&mut self, name: &str, ty: TypeRef, offset: usize, visible_until: usize) {
        self.locals.push(LocalVar {
            name: name.to_string(),
            ty,
            offset,
            visible_until,
        });
    }

    fn declare_locals(&mut self, ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) {
        let Some(type_node) = node.child_by_field_name("type") else {
            return;
        };
        let declared = type_ref(ctx, type_node);
        // Visible to the end of the enclosing block (or `for` statement).
        let scope_end = node.parent().map_or(node.end_byte(), |p| p.end_byte());
        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            let ty = inferred_type(ctx, &declared, declarator.child_by_field_name("value"));
            self.declare(ctx.node_text(name), ty, declarator.start_byte(), scope_end);
        }
    }

    /// `try (Res r = open()) { ... }`; the resource is visible up to the end
    /// of the try statement. Bare `try (existing)` resources declare nothing.
    fn declare_resource(&mut self, ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) {
        let (Some(type_node), Some(name)) = (node.child_by_field_name("type"), node.child_by_field_name("name"))
        else {
            return;
        };
        let declared = type_ref(ctx, type_node);
        let ty = inferred_type(ctx, &declared, node.child_by_field_name("value"));
        let scope_end = node
            .parent()
            .and_then(|spec| spec.parent())
            .map_or(node.end_byte(), |stmt| stmt.end_byte());
        self.declare(ctx.node_text(name), ty, node.start_byte(), scope_end);
    }

    /// `x -> ..`, `(x, y) -> ..` and `(Dto d) -> ..`. Inferred parameters get
    /// an empty type so they hide fields of the same name without resolving.
    fn declare_lambda_params(&mut self, ctx: &VisitorContext<'_>, params: tree_sitter::Node<'_>, scope_end: usize) {
        match params.kind() {
            "identifier" => {
                self.declare(ctx.node_text(params), TypeRef::simple(""), params.start_byte(), scope_end);
            }
            "formal_parameters" => {
                for param in extract_params(ctx, params) {
                    self.declare(&param.name, param.ty, params.start_byte(), scope_end);
                }
            }
            _ => {
                let mut cursor = params.walk();
                for child in params.named_children(&mut cursor) {
                    if child.kind() == "identifier" {
                        self.declare(ctx.node_text(child), TypeRef::simple(""), child.start_byte(), scope_end);
                    }
                }
            }
        }
    }

    fn declare_catch_param(&mut self, ctx: &VisitorContext<'_>, node: tree_sitter::Node<'_>) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let mut cursor = node.walk();
        let first_type = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "catch_type")
            .and_then(|catch_type| {
                let mut inner = catch_type.walk();
                let first = catch_type.named_children(&mut inner).find(|c| !c.is_extra());
                first
            });
        if let Some(ty) = first_type {
            let scope_end = node.parent().map_or(node.end_byte(), |clause| clause.end_byte());
            self.declare(ctx.node_text(name), type_ref(ctx, ty), node.start_byte(), scope_end);
        }
    }
}

/// `var x = new T(...)` is the one inference we can do syntactically.
fn inferred_type(ctx: &VisitorContext<'_>, declared: &TypeRef, value: Option<tree_sitter::Node<'_>>) -> TypeRef {
    if declared.base != "var" {
        return declared.clone();
    }
    value
        .filter(|v| v.kind() == "object_creation_expression")
        .and_then(|v| v.child_by_field_name("type"))
        .map(|t| type_ref(ctx, t))
        .unwrap_or_else(|| declared.clone())
}

fn non_empty(children: Vec<BodyNode>) -> Option<BodyNode> {
    (!children.is_empty()).then_some(BodyNode::Other(children))
}

fn count_args(arguments: tree_sitter::Node<'_>) -> usize {
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .count()
}
