use serde::{Deserialize, Serialize};

/// Java primitive type keywords, plus `void`.
const PRIMITIVES: &[&str] = &[
    "void", "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// A type as written at a declaration site.
///
/// `List<UserDto>[]` has `text = "List<UserDto>[]"`, `base = "List"`,
/// one argument and one array dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Source text with whitespace runs collapsed; used for display.
    pub text: String,
    /// Name without type arguments or dimensions; may be dot-qualified.
    pub base: String,
    pub args: Vec<TypeRef>,
    pub array_dims: u32,
}

impl TypeRef {
    /// A plain, non-generic, non-array type.
    pub fn simple(name: &str) -> Self {
        Self {
            text: name.to_string(),
            base: name.to_string(),
            args: Vec::new(),
            array_dims: 0,
        }
    }

    pub fn void() -> Self {
        Self::simple("void")
    }

    /// Human-readable name, e.g. `ResponseEntity<UserDto>`.
    pub fn display_name(&self) -> &str {
        &self.text
    }

    pub fn is_primitive(&self) -> bool {
        self.array_dims == 0 && PRIMITIVES.contains(&self.base.as_str())
    }

    pub fn is_array(&self) -> bool {
        self.array_dims > 0
    }

    /// The element type one level down: the component of an array, or the
    /// first type argument of a generic type.
    pub fn element(&self) -> Option<TypeRef> {
        if self.array_dims > 0 {
            let mut component = self.clone();
            component.array_dims -= 1;
            component.text = component
                .text
                .strip_suffix("[]")
                .unwrap_or(&component.text)
                .trim_end()
                .to_string();
            return Some(component);
        }
        self.args.first().cloned()
    }
}

/// Collapse whitespace runs so that `Map< String ,  Long >` displays as
/// `Map<String, Long>`.
pub fn normalize_type_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space
            && !out.is_empty()
            && !matches!(ch, '<' | '>' | ',' | '[' | ']' | '.')
            && !out.ends_with(['<', '.'])
        {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
        if ch == ',' {
            out.push(' ');
        }
    }
    out.replace(",  ", ", ")
}
