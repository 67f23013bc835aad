use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;

use crate::resource::{FormatOptions, ResourceChange};

/// Ordered set of normalized changes from one plan, with read-during-apply
/// and true no-op entries filtered out.
#[derive(Debug, Clone)]
pub struct PlanChanges {
    changes: Vec<ResourceChange>,
}

impl PlanChanges {
    /// Process an already-parsed plan document. A missing
    /// `resource_changes` key yields an empty set.
    pub fn from_value(plan: &Value, options: &FormatOptions) -> Result<Self> {
        let entries = plan
            .get("resource_changes")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut changes = Vec::new();
        for entry in entries {
            let actions: Vec<&str> = entry
                .get("change")
                .and_then(|change| change.get("actions"))
                .and_then(Value::as_array)
                .map(|list| list.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            let address = entry
                .get("address")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>");
            if actions == ["read"] {
                debug!("skipping read-during-apply entry {address}");
                continue;
            }
            let has_rename = entry
                .get("previous_address")
                .and_then(Value::as_str)
                .is_some_and(|previous| !previous.is_empty());
            if actions == ["no-op"] && !has_rename {
                debug!("skipping unchanged entry {address}");
                continue;
            }
            changes.push(ResourceChange::from_plan_entry(entry, options)?);
        }
        Ok(Self { changes })
    }

    /// Parse and process a plan JSON stream
    pub fn from_reader(reader: impl Read, options: &FormatOptions) -> Result<Self> {
        let plan: Value = serde_json::from_reader(reader).context("failed to parse plan JSON")?;
        Self::from_value(&plan, options)
    }

    /// Load and process a plan JSON file
    pub fn from_file(path: impl AsRef<Path>, options: &FormatOptions) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("failed to open plan file {}", path.as_ref().display()))?;
        Self::from_reader(BufReader::new(file), options)
    }

    pub fn changes(&self) -> &[ResourceChange] {
        &self.changes
    }

    /// All resource summaries, in input order
    pub fn resources(&self) -> Vec<Value> {
        self.changes.iter().map(ResourceChange::resource).collect()
    }

    /// All attribute lists, positionally aligned with `resources()`
    pub fn attributes(&self) -> Vec<Value> {
        self.changes
            .iter()
            .map(ResourceChange::attributes)
            .collect()
    }

    /// All consolidated (resource, attributes) pairs
    pub fn records(&self) -> Vec<Value> {
        self.changes.iter().map(ResourceChange::record).collect()
    }
}
