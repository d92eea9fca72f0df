/// Utilities for dot-separated Java qualified names.
pub struct QualifiedName;

impl QualifiedName {
    /// Join scope segments into a dot-separated qualified name, skipping
    /// empty segments (the default package contributes nothing).
    pub fn join(segments: &[&str]) -> String {
        segments
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Last segment of a qualified name: `com.acme.UserDto` → `UserDto`.
    pub fn simple_name(qualified: &str) -> &str {
        qualified.rsplit('.').next().unwrap_or(qualified)
    }

    /// Everything before the last segment, or `""` for an unqualified name.
    pub fn qualifier(qualified: &str) -> &str {
        qualified.rfind('.').map(|i| &qualified[..i]).unwrap_or("")
    }

    /// Whether the name lives under the Java platform (`java.*`).
    ///
    /// Platform classes are never expanded into field listings.
    pub fn is_platform(qualified: &str) -> bool {
        qualified.starts_with("java.")
    }
}
