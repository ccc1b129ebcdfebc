//! URI helpers for logical model identities
//!
//! Components are addressed as `parent/child`, their services, references,
//! producers and consumers as `component#name`.

/// Build a child URI under a composite
pub fn child_uri(parent: &str, name: &str) -> String {
    format!("{parent}/{name}")
}

/// Build the URI of a service, reference, producer or consumer of a component
pub fn member_uri(component: &str, name: &str) -> String {
    format!("{component}#{name}")
}

/// Split `component#member` into its component URI and member name
pub fn split_member(uri: &str) -> Option<(&str, &str)> {
    uri.split_once('#')
}

/// Parent URI of a component or channel URI
pub fn parent_uri(uri: &str) -> Option<&str> {
    let base = uri.split('#').next().unwrap_or(uri);
    base.rsplit_once('/').map(|(parent, _)| parent)
}

/// Returns true if the URI carries a scheme, e.g. `domain://channel`
pub fn is_absolute(uri: &str) -> bool {
    uri.split_once("://")
        .is_some_and(|(scheme, _)| !scheme.is_empty() && !scheme.contains('/'))
}

/// The authority of an absolute URI, `None` for relative URIs
pub fn authority(uri: &str) -> Option<&str> {
    let (_, rest) = uri.split_once("://")?;
    let end = rest.find(['/', '#', '?']).unwrap_or(rest.len());
    Some(&rest[..end])
}
