use std::collections::HashSet;

use al_core::{
    CallExpr, ClassDecl, FieldDecl, MethodDecl, MethodRef, Origin, QualifiedName, Receiver,
    SourceUnit, SymbolResolver, TypeRef,
};

use crate::project::Project;

impl SymbolResolver for Project {
    fn resolve_type<'a>(&'a self, ty: &TypeRef, from: &ClassDecl) -> Option<&'a ClassDecl> {
        if ty.is_primitive() || ty.base.is_empty() {
            return None;
        }
        let unit = self.unit_of(from);
        self.lookup_type_name(&ty.base, &from.qualified_name, unit)
    }

    fn resolve_call<'a>(
        &'a self,
        call: &CallExpr,
        method: &MethodDecl,
        from: &ClassDecl,
    ) -> Option<MethodRef<'a>> {
        let from = self.class(&from.qualified_name)?;
        let resolved = match &call.receiver {
            Receiver::Implicit => self.resolve_implicit(call, from),
            Receiver::This => self.find_method(from, &call.name, call.arg_count),
            Receiver::Super => self
                .supertypes(from)
                .into_iter()
                .find_map(|s| self.find_method(s, &call.name, call.arg_count)),
            receiver => {
                let target = self.receiver_class(receiver, method, from, call.offset)?;
                self.find_method(target, &call.name, call.arg_count)
            }
        };
        if resolved.is_none() {
            tracing::trace!(call = %call.name, line = call.line + 1, "call not resolved");
        }
        resolved
    }

    fn is_project_local(&self, class: &ClassDecl) -> bool {
        self.unit_of(class)
            .map_or(false, |unit| unit.origin == Origin::Project)
    }
}

impl Project {
    /// Resolve a (possibly dotted) type name as written inside `scope`.
    ///
    /// Lookup order: fully qualified name, types nested in the scope or an
    /// enclosing class, single-type imports, same package, on-demand imports,
    /// default package.
    fn lookup_type_name<'a>(
        &'a self,
        name: &str,
        scope: &str,
        unit: Option<&SourceUnit>,
    ) -> Option<&'a ClassDecl> {
        let (head, rest) = match name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };

        if rest.is_some() {
            if let Some(class) = self.class(name) {
                return Some(class);
            }
        }

        // `Outer.Inner` written relative to the scope: resolve `Outer` first.
        let head_class = self.lookup_simple_name(head, scope, unit)?;
        match rest {
            None => Some(head_class),
            Some(rest) => self.class(&QualifiedName::join(&[head_class.qualified_name.as_str(), rest])),
        }
    }

    fn lookup_simple_name<'a>(
        &'a self,
        name: &str,
        scope: &str,
        unit: Option<&SourceUnit>,
    ) -> Option<&'a ClassDecl> {
        // Nested in the scope or any enclosing class.
        let mut current = Some(scope.to_string());
        while let Some(outer) = current {
            if let Some(class) = self.class(&QualifiedName::join(&[outer.as_str(), name])) {
                return Some(class);
            }
            current = self.class(&outer).and_then(|c| c.enclosing.clone());
        }

        let unit = unit?;
        let imports = unit.imports.iter().filter(|i| !i.is_static || i.on_demand);

        for import in imports.clone().filter(|i| !i.on_demand) {
            if QualifiedName::simple_name(&import.path) == name {
                if let Some(class) = self.class(&import.path) {
                    return Some(class);
                }
            }
        }

        if let Some(class) = self.class(&QualifiedName::join(&[unit.package.as_str(), name])) {
            return Some(class);
        }

        for import in imports.filter(|i| i.on_demand) {
            if let Some(class) = self.class(&QualifiedName::join(&[import.path.as_str(), name])) {
                return Some(class);
            }
        }

        self.class(name)
    }

    /// Unqualified call: the class hierarchy, then enclosing classes, then
    /// statically imported members.
    fn resolve_implicit<'a>(&'a self, call: &CallExpr, from: &'a ClassDecl) -> Option<MethodRef<'a>> {
        let mut current = Some(from);
        while let Some(class) = current {
            if let Some(found) = self.find_method(class, &call.name, call.arg_count) {
                return Some(found);
            }
            current = class.enclosing.as_deref().and_then(|q| self.class(q));
        }

        let unit = self.unit_of(from)?;
        unit.imports
            .iter()
            .filter(|i| i.is_static)
            .filter_map(|i| {
                if i.on_demand {
                    self.class(&i.path)
                } else if QualifiedName::simple_name(&i.path) == call.name {
                    self.class(QualifiedName::qualifier(&i.path))
                } else {
                    None
                }
            })
            .find_map(|owner| self.find_method(owner, &call.name, call.arg_count))
    }

    /// The class a receiver expression evaluates to.
    fn receiver_class<'a>(
        &'a self,
        receiver: &Receiver,
        method: &MethodDecl,
        from: &'a ClassDecl,
        offset: usize,
    ) -> Option<&'a ClassDecl> {
        match receiver {
            Receiver::Implicit | Receiver::This => Some(from),
            Receiver::Super => self.supertypes(from).into_iter().next(),
            Receiver::Name(name) => self.name_class(name, method, from, offset),
            Receiver::Field { base, name } => {
                let owner = match base.as_ref() {
                    Receiver::This => Some(from),
                    other => self.receiver_class(other, method, from, offset),
                };
                let via_field = owner.and_then(|owner| {
                    let (declaring, field) = self.find_field(owner, name)?;
                    self.resolve_type(&field.ty, declaring)
                });
                // `com.acme.Util.call()` parses as a field chain.
                via_field.or_else(|| {
                    let dotted = dotted_name(receiver)?;
                    self.lookup_type_name(&dotted, &from.qualified_name, self.unit_of(from))
                })
            }
            Receiver::Call(inner) => {
                let target = self.resolve_call(inner, method, from)?;
                let returns = target.method.return_type.as_ref()?;
                self.resolve_type(returns, target.class)
            }
            Receiver::New { ty, .. } => self.resolve_type(ty, from),
            Receiver::Unknown(_) => None,
        }
    }

    /// A bare identifier: local in scope at the call, parameter, field, then
    /// a type name (static call). A local that does not resolve still hides
    /// a field of the same name.
    fn name_class<'a>(
        &'a self,
        name: &str,
        method: &MethodDecl,
        from: &'a ClassDecl,
        offset: usize,
    ) -> Option<&'a ClassDecl> {
        let local = method
            .locals
            .iter()
            .filter(|l| l.name == name && l.visible_at(offset))
            .max_by_key(|l| l.offset);
        if let Some(local) = local {
            return self.resolve_type(&local.ty, from);
        }
        if let Some(param) = method.param(name) {
            return self.resolve_type(&param.ty, from);
        }

        let mut current = Some(from);
        while let Some(class) = current {
            if let Some((declaring, field)) = self.find_field(class, name) {
                return self.resolve_type(&field.ty, declaring);
            }
            current = class.enclosing.as_deref().and_then(|q| self.class(q));
        }

        self.lookup_type_name(name, &from.qualified_name, self.unit_of(from))
    }

    /// Walk `class` and its resolvable supertypes, superclass chain first.
    fn hierarchy<'a>(&'a self, class: &'a ClassDecl) -> Vec<&'a ClassDecl> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![class];
        while let Some(next) = stack.pop() {
            if !seen.insert(next.qualified_name.as_str()) {
                continue;
            }
            order.push(next);
            let supers = self.supertypes(next);
            stack.extend(supers.into_iter().rev());
        }
        order
    }

    fn find_field<'a>(&'a self, class: &'a ClassDecl, name: &str) -> Option<(&'a ClassDecl, &'a FieldDecl)> {
        self.hierarchy(class)
            .into_iter()
            .find_map(|c| c.field(name).map(|f| (c, f)))
    }

    /// Pick an overload by name and argument count; if none accepts the
    /// count, fall back to the only method with that name.
    fn find_method<'a>(&'a self, class: &'a ClassDecl, name: &str, arg_count: usize) -> Option<MethodRef<'a>> {
        let candidates: Vec<MethodRef<'a>> = self
            .hierarchy(class)
            .into_iter()
            .flat_map(|c| c.methods_named(name).map(move |m| MethodRef { class: c, method: m }))
            .filter(|r| !r.method.is_constructor())
            .collect();

        candidates
            .iter()
            .find(|r| r.method.accepts(arg_count))
            .copied()
            .or_else(|| match candidates.as_slice() {
                [only] => Some(*only),
                _ => None,
            })
    }
}

fn dotted_name(receiver: &Receiver) -> Option<String> {
    match receiver {
        Receiver::Name(name) => Some(name.clone()),
        Receiver::Field { base, name } => Some(format!("{}.{}", dotted_name(base)?, name)),
        _ => None,
    }
}
