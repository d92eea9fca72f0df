//! Spring route and verb metadata read from mapping annotations.

use std::fmt;

use al_core::{Annotation, ClassDecl, MethodDecl};
use serde::Serialize;

const SPRING_WEB: &str = "org.springframework.web.bind.annotation";

/// Route markers in priority order: the generic mapping, then the four
/// verb-specific ones.
const ROUTE_MARKERS: [&str; 5] = [
    "RequestMapping",
    "GetMapping",
    "PostMapping",
    "PutMapping",
    "DeleteMapping",
];

const VERB_MARKERS: [(&str, HttpVerb); 4] = [
    ("GetMapping", HttpVerb::Get),
    ("PostMapping", HttpVerb::Post),
    ("PutMapping", HttpVerb::Put),
    ("DeleteMapping", HttpVerb::Delete),
];

/// HTTP verb an endpoint is mapped to. `All` is the catch-all of a bare
/// `@RequestMapping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    All,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn find_marker<'a>(annotations: &'a [Annotation], simple: &str) -> Option<&'a Annotation> {
    let qualified = format!("{SPRING_WEB}.{simple}");
    annotations.iter().find(|a| a.is(&qualified))
}

/// Route fragment declared by the first route marker carrying a `value`
/// (else `path`) attribute, with every `"` removed. Empty when none does.
pub fn route_fragment(annotations: &[Annotation]) -> String {
    ROUTE_MARKERS
        .iter()
        .filter_map(|marker| find_marker(annotations, marker))
        .find_map(|ann| ann.attribute("value").or_else(|| ann.attribute("path")))
        .map(|value| value.replace('"', ""))
        .unwrap_or_default()
}

/// First verb-specific marker present, in GET, POST, PUT, DELETE order.
pub fn http_verb(annotations: &[Annotation]) -> HttpVerb {
    VERB_MARKERS
        .iter()
        .find(|(marker, _)| find_marker(annotations, marker).is_some())
        .map(|(_, verb)| *verb)
        .unwrap_or(HttpVerb::All)
}

/// Class fragment joined to the method fragment. Separator runs collapse to
/// one `/`; an empty route is `/`.
pub fn full_route(class: &ClassDecl, method: &MethodDecl) -> String {
    let class_fragment = route_fragment(&class.annotations);
    let method_fragment = route_fragment(&method.annotations);
    let segments: Vec<&str> = [class_fragment.as_str(), method_fragment.as_str()]
        .into_iter()
        .flat_map(|fragment| fragment.split('/'))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}
