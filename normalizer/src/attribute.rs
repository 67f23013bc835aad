use std::collections::BTreeSet;

use plan_defs::{is_truthy, AttributeChangeRecord};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::diff::TreeDiff;
use crate::path::normalize_path;

/// Prefix of every redaction token
pub const MASKED_NOTE: &str = "sensitive";
/// Sentinel for values not yet determined at plan time
pub const UNKNOWN_NOTE: &str = "(known after apply)";

/// Formats the attribute-level changes of one resource, applying
/// redaction and unknown-value tagging by attribute-name prefix.
#[derive(Debug, Clone)]
pub struct AttributeChanges {
    masked: BTreeSet<String>,
    unknown: BTreeSet<String>,
    change_id: Option<String>,
    changes: Vec<AttributeChangeRecord>,
}

impl AttributeChanges {
    pub fn new(
        masked: BTreeSet<String>,
        unknown: BTreeSet<String>,
        change_id: Option<String>,
    ) -> Self {
        Self {
            masked,
            unknown,
            change_id,
            changes: Vec::new(),
        }
    }

    /// Replace a value with its redaction token when it must be hashed.
    /// Falsy values pass through so empty markers stay readable.
    fn hash_value(&self, value: &Value, should: bool) -> Value {
        if should && is_truthy(value) {
            let digest = Sha256::digest(value.to_string().as_bytes());
            Value::String(format!("{MASKED_NOTE}:{}", hex::encode(digest)))
        } else {
            value.clone()
        }
    }

    /// Build one attribute-change record. A null on either side counts
    /// as absent, so a value dropped to null under an unknown prefix
    /// still receives the sentinel.
    pub fn format(
        &self,
        name: &str,
        old: Option<&Value>,
        new: Option<&Value>,
    ) -> AttributeChangeRecord {
        let attribute = normalize_path(name);
        let should_hash = self
            .masked
            .iter()
            .any(|prefix| attribute.starts_with(prefix.as_str()));
        let old = old
            .filter(|value| !value.is_null())
            .map(|value| self.hash_value(value, should_hash));
        let mut new = new
            .filter(|value| !value.is_null())
            .map(|value| self.hash_value(value, should_hash));
        if new.is_none()
            && self
                .unknown
                .iter()
                .any(|prefix| attribute.starts_with(prefix.as_str()))
        {
            new = Some(Value::String(UNKNOWN_NOTE.to_string()));
        }
        AttributeChangeRecord {
            attribute,
            old,
            new,
            change_id: self.change_id.clone(),
        }
    }

    /// Format every leaf of a diff result, in category order
    /// changed, added, removed. Reprocessing replaces the accumulated
    /// records rather than appending.
    pub fn process(&mut self, diff: &TreeDiff) {
        self.changes.clear();
        for leaf in &diff.changed {
            let record = self.format(&leaf.path, Some(&leaf.old), Some(&leaf.new));
            self.changes.push(record);
        }
        for leaf in &diff.added {
            let record = self.format(&leaf.path, None, Some(&leaf.value));
            self.changes.push(record);
        }
        for leaf in &diff.removed {
            let record = self.format(&leaf.path, Some(&leaf.value), None);
            self.changes.push(record);
        }
    }

    pub fn records(&self) -> &[AttributeChangeRecord] {
        &self.changes
    }

    pub fn into_records(self) -> Vec<AttributeChangeRecord> {
        self.changes
    }
}
