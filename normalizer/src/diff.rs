use serde_json::Value;

use crate::path::{join_segment, root_qualified};

/// One leaf present on both sides with different values
#[derive(Debug, Clone, PartialEq)]
pub struct ChangedLeaf {
    pub path: String,
    pub old: Value,
    pub new: Value,
}

/// One leaf present on a single side
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub path: String,
    pub value: Value,
}

/// Categorized leaf-level differences between two nested value trees.
/// Paths use the root-qualified convention (`root['a.b']`) expected by
/// [`crate::normalize_path`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeDiff {
    pub changed: Vec<ChangedLeaf>,
    pub added: Vec<Leaf>,
    pub removed: Vec<Leaf>,
}

impl TreeDiff {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

/// Diff two value trees. An absent tree is treated as null, so a tree
/// appearing or disappearing wholesale reports a single changed leaf at
/// the root. Objects recurse per key; arrays and scalars compare whole.
pub fn diff_trees(before: Option<&Value>, after: Option<&Value>) -> TreeDiff {
    let mut diff = TreeDiff::default();
    let before = before.unwrap_or(&Value::Null);
    let after = after.unwrap_or(&Value::Null);
    if before != after {
        diff_value("", before, after, &mut diff);
    }
    diff
}

fn diff_value(path: &str, before: &Value, after: &Value, diff: &mut TreeDiff) {
    match (before, after) {
        (Value::Object(before_map), Value::Object(after_map)) => {
            for (key, before_val) in before_map {
                let child = join_segment(path, key);
                match after_map.get(key) {
                    Some(after_val) if before_val != after_val => {
                        diff_value(&child, before_val, after_val, diff);
                    }
                    Some(_) => {}
                    None => diff.removed.push(Leaf {
                        path: root_qualified(&child),
                        value: before_val.clone(),
                    }),
                }
            }
            for (key, after_val) in after_map {
                if !before_map.contains_key(key) {
                    diff.added.push(Leaf {
                        path: root_qualified(&join_segment(path, key)),
                        value: after_val.clone(),
                    });
                }
            }
        }
        _ if before != after => diff.changed.push(ChangedLeaf {
            path: root_qualified(path),
            old: before.clone(),
            new: after.clone(),
        }),
        _ => {}
    }
}
