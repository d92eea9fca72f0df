//! Method body syntax tree.
//!
//! Only the constructs the call-site collector cares about are modelled;
//! every other expression or statement becomes an [`BodyNode::Other`]
//! holding whatever nested nodes it contains, so no call is lost.

use serde::{Deserialize, Serialize};

use crate::types::TypeRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyNode {
    Block(Vec<BodyNode>),
    Lambda(Vec<BodyNode>),
    Call(CallExpr),
    /// `new T(args)`; constructor invocations are not method calls.
    New { ty: TypeRef, args: Vec<BodyNode> },
    Other(Vec<BodyNode>),
}

/// A method invocation such as `userService.find(id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub name: String,
    pub receiver: Receiver,
    pub args: Vec<BodyNode>,
    pub arg_count: usize,
    /// Byte offset of the invocation within the file.
    pub offset: usize,
    /// 0-indexed.
    pub line: u32,
}

/// What a call is invoked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Receiver {
    /// `find(id)`
    Implicit,
    /// `this.find(id)`
    This,
    /// `super.find(id)`
    Super,
    /// `userService.find(id)`; a local, parameter, field or type name.
    Name(String),
    /// `this.userService.find(id)` or `Outer.Inner.run()`.
    Field { base: Box<Receiver>, name: String },
    /// `repo().find(id)`
    Call(Box<CallExpr>),
    /// `new UserService().find(id)`
    New { ty: TypeRef, args: Vec<BodyNode> },
    /// Anything else (casts, array access, ternaries, ...). Nested nodes are
    /// kept so calls inside are still visited.
    Unknown(Vec<BodyNode>),
}

/// A name declared inside a method body: locals, loop and catch variables,
/// lambda parameters and try resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalVar {
    pub name: String,
    /// For `var x = new T()` this is `T`. Untyped lambda parameters have an
    /// empty base and never resolve.
    pub ty: TypeRef,
    /// Byte offset of the declaration.
    pub offset: usize,
    /// End byte of the declaring scope (block, loop, lambda or try statement).
    pub visible_until: usize,
}

impl LocalVar {
    /// Whether the name is in scope at byte `offset`.
    pub fn visible_at(&self, offset: usize) -> bool {
        self.offset <= offset && offset < self.visible_until
    }
}

/// Callback interface for [`walk`].
pub trait BodyVisitor {
    fn visit_call(&mut self, call: &CallExpr);
}

impl<F: FnMut(&CallExpr)> BodyVisitor for F {
    fn visit_call(&mut self, call: &CallExpr) {
        self(call)
    }
}

/// Depth-first walk over `nodes` in source order.
///
/// A call's receiver and arguments are visited before the call itself, so
/// `a.find(b.load())` reports `load` then `find`.
pub fn walk<V: BodyVisitor + ?Sized>(nodes: &[BodyNode], visitor: &mut V) {
    for node in nodes {
        walk_node(node, visitor);
    }
}

fn walk_node<V: BodyVisitor + ?Sized>(node: &BodyNode, visitor: &mut V) {
    match node {
        BodyNode::Block(children) | BodyNode::Lambda(children) | BodyNode::Other(children) => {
            walk(children, visitor)
        }
        BodyNode::New { args, .. } => walk(args, visitor),
        BodyNode::Call(call) => walk_call(call, visitor),
    }
}

fn walk_call<V: BodyVisitor + ?Sized>(call: &CallExpr, visitor: &mut V) {
    walk_receiver(&call.receiver, visitor);
    walk(&call.args, visitor);
    visitor.visit_call(call);
}

fn walk_receiver<V: BodyVisitor + ?Sized>(receiver: &Receiver, visitor: &mut V) {
    match receiver {
        Receiver::Call(inner) => walk_call(inner, visitor),
        Receiver::New { args, .. } | Receiver::Unknown(args) => walk(args, visitor),
        Receiver::Field { base, .. } => walk_receiver(base, visitor),
        Receiver::Implicit | Receiver::This | Receiver::Super | Receiver::Name(_) => {}
    }
}
