use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use plan_defs::{RecordShape, ResourceMode, StateResourceRecord};
use serde_json::Value;

use crate::resource::FormatOptions;

/// Flat, ordered view of the resources in a state snapshot. Modules are
/// traversed depth-first, each module's resources before its children.
#[derive(Debug, Clone)]
pub struct State {
    resources: Vec<StateResourceRecord>,
    shape: RecordShape,
}

impl State {
    /// Process an already-parsed state document
    pub fn from_value(state: &Value, options: &FormatOptions) -> Result<Self> {
        let root = state
            .get("values")
            .and_then(|values| values.get("root_module"))
            .context("state missing values.root_module")?;
        let state_id = options.change_id.materialize();
        let mut resources = Vec::new();
        load_module(root, state_id.as_deref(), &mut resources)?;
        Ok(Self {
            resources,
            shape: options.shape,
        })
    }

    /// Parse and process a state JSON stream
    pub fn from_reader(reader: impl Read, options: &FormatOptions) -> Result<Self> {
        let state: Value = serde_json::from_reader(reader).context("failed to parse state JSON")?;
        Self::from_value(&state, options)
    }

    /// Load and process a state JSON file
    pub fn from_file(path: impl AsRef<Path>, options: &FormatOptions) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("failed to open state file {}", path.as_ref().display()))?;
        Self::from_reader(BufReader::new(file), options)
    }

    pub fn records(&self) -> &[StateResourceRecord] {
        &self.resources
    }

    /// All resource summaries in the configured output shape
    pub fn resources(&self) -> Vec<Value> {
        self.resources
            .iter()
            .map(|resource| resource.to_shaped(self.shape))
            .collect()
    }
}

fn load_module(
    module: &Value,
    state_id: Option<&str>,
    out: &mut Vec<StateResourceRecord>,
) -> Result<()> {
    if let Some(resources) = module.get("resources").and_then(Value::as_array) {
        for resource in resources {
            out.push(format_resource(resource, state_id)?);
        }
    }
    if let Some(children) = module.get("child_modules").and_then(Value::as_array) {
        for child in children {
            load_module(child, state_id, out)?;
        }
    }
    Ok(())
}

fn format_resource(resource: &Value, state_id: Option<&str>) -> Result<StateResourceRecord> {
    let mode: ResourceMode = serde_json::from_value(
        resource
            .get("mode")
            .cloned()
            .context("state resource missing mode")?,
    )
    .context("state resource has invalid mode")?;
    let index = match resource.get("index") {
        None | Some(Value::Null) => None,
        Some(Value::String(index)) if index.is_empty() => None,
        Some(Value::String(index)) => Some(index.clone()),
        Some(other) => Some(other.to_string()),
    };
    Ok(StateResourceRecord {
        address: require_str(resource, "address")?,
        mode,
        provider: require_str(resource, "provider_name")?,
        resource_type: require_str(resource, "type")?,
        name: require_str(resource, "name")?,
        index,
        state_id: state_id.map(str::to_string),
    })
}

fn require_str(resource: &Value, key: &str) -> Result<String> {
    resource
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .with_context(|| format!("state resource missing {key}"))
}
