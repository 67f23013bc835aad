use std::collections::BTreeSet;

use serde_json::Value;

use crate::path::{join_segment, normalize_path, root_qualified};

/// Collect the normalized attribute names marked `true` in a sensitivity
/// or unknown marker tree. The marker tree mirrors the shape of the
/// value tree; only leaves that are exactly boolean true count. A true
/// at the root yields the empty prefix, which matches every attribute.
pub fn collect_marked(tree: Option<&Value>) -> BTreeSet<String> {
    let mut marked = BTreeSet::new();
    if let Some(tree) = tree {
        walk("", tree, &mut marked);
    }
    marked
}

fn walk(path: &str, node: &Value, marked: &mut BTreeSet<String>) {
    match node {
        Value::Bool(true) => {
            marked.insert(normalize_path(&root_qualified(path)));
        }
        Value::Object(map) => {
            for (key, child) in map {
                walk(&join_segment(path, key), child, marked);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(&join_segment(path, &index.to_string()), child, marked);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(tree: &Value) -> Vec<String> {
        collect_marked(Some(tree)).into_iter().collect()
    }

    #[test]
    fn test_flat_markers() {
        let tree = json!({"password": true, "username": false});
        assert_eq!(names(&tree), vec!["password"]);
    }

    #[test]
    fn test_nested_and_array_markers() {
        let tree = json!({
            "tags": {"secret": true, "public": false},
            "rules": [false, true],
        });
        assert_eq!(names(&tree), vec!["rules.1", "tags.secret"]);
    }

    #[test]
    fn test_non_boolean_truthy_leaves_are_ignored() {
        let tree = json!({"a": 1, "b": "true", "c": {"d": []}});
        assert!(collect_marked(Some(&tree)).is_empty());
    }

    #[test]
    fn test_root_marker_yields_empty_prefix() {
        let marked = collect_marked(Some(&json!(true)));
        assert_eq!(marked.into_iter().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_absent_tree_is_empty() {
        assert!(collect_marked(None).is_empty());
        assert!(collect_marked(Some(&json!({}))).is_empty());
        assert!(collect_marked(Some(&Value::Null)).is_empty());
    }
}
