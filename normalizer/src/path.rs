use regex::Regex;

/// Strip the structural-diff root wrapper from a leaf path, turning
/// `root['tags.env']` into `tags.env`. Only the single top-level key is
/// unwrapped; anything that does not match passes through unchanged.
pub fn normalize_path(name: &str) -> String {
    let re = Regex::new(r"^root\['([^']*)'\]").unwrap();
    re.replace(name, "$1").into_owned()
}

/// Extend a dotted path with one more segment.
pub(crate) fn join_segment(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Wrap a dotted path in the diff tool's root-qualified convention.
pub(crate) fn root_qualified(inner: &str) -> String {
    format!("root['{inner}']")
}
