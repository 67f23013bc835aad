use anyhow::{Context, Result};
use log::warn;
use plan_defs::{
    is_truthy, AttributeChangeRecord, RecordShape, ResourceAction, ResourceChangeRecord,
};
use serde_json::Value;
use uuid::Uuid;

use crate::attribute::AttributeChanges;
use crate::diff::diff_trees;
use crate::sensitive::collect_marked;

/// Correlation-id handling for one processing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChangeIdMode {
    #[default]
    Off,
    /// Generate a fresh UUID-v4
    Generate,
    /// Use a caller-supplied token
    Fixed(String),
}

impl ChangeIdMode {
    pub(crate) fn materialize(&self) -> Option<String> {
        match self {
            ChangeIdMode::Off => None,
            ChangeIdMode::Generate => Some(Uuid::new_v4().to_string()),
            ChangeIdMode::Fixed(id) => Some(id.clone()),
        }
    }
}

/// Formatting flags shared by plan and state processing
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub change_id: ChangeIdMode,
    /// Keep the full before/after trees on the resource record
    pub full: bool,
    pub shape: RecordShape,
}

/// One normalized resource change: the resource-level summary plus,
/// for update/replace actions, the attribute-level change list.
#[derive(Debug, Clone)]
pub struct ResourceChange {
    resource: ResourceChangeRecord,
    attributes: Option<Vec<AttributeChangeRecord>>,
    shape: RecordShape,
}

impl ResourceChange {
    /// Normalize one entry of a plan's `resource_changes` sequence.
    pub fn from_plan_entry(entry: &Value, options: &FormatOptions) -> Result<Self> {
        let address = entry
            .get("address")
            .and_then(Value::as_str)
            .context("resource change entry missing address")?
            .to_string();
        let change = entry
            .get("change")
            .with_context(|| format!("resource change for {address} missing change block"))?;
        let actions: Vec<String> = change
            .get("actions")
            .and_then(Value::as_array)
            .with_context(|| format!("resource change for {address} missing actions"))?
            .iter()
            .filter_map(|action| action.as_str().map(str::to_string))
            .collect();

        let change_id = options.change_id.materialize();
        let mut reason = entry
            .get("action_reason")
            .and_then(Value::as_str)
            .map(str::to_string);
        let action = ResourceAction::resolve(&actions);
        match &action {
            ResourceAction::Replace => {
                // The synthesized reason keeps the original action pair visible
                let joined = actions.join("-");
                reason = Some(
                    format!("{joined} {}", reason.as_deref().unwrap_or(""))
                        .trim_end()
                        .to_string(),
                );
            }
            ResourceAction::Other(joined) => {
                warn!("unexpected action list '{joined}' for {address}");
            }
            _ => {}
        }
        if let Some(paths) = change
            .get("replace_paths")
            .filter(|paths| is_truthy(paths))
        {
            reason = Some(
                format!("{} {paths}", reason.as_deref().unwrap_or(""))
                    .trim()
                    .to_string(),
            );
        }

        let before = change.get("before").filter(|value| !value.is_null());
        let after = change.get("after").filter(|value| !value.is_null());

        let attributes = if matches!(action, ResourceAction::Update | ResourceAction::Replace) {
            let mut masked = collect_marked(change.get("before_sensitive"));
            masked.extend(collect_marked(change.get("after_sensitive")));
            let unknown = collect_marked(change.get("after_unknown"));
            let mut formatter = AttributeChanges::new(masked, unknown, change_id.clone());
            formatter.process(&diff_trees(before, after));
            Some(formatter.into_records())
        } else {
            None
        };

        let resource = ResourceChangeRecord {
            address,
            action,
            rename_from: entry
                .get("previous_address")
                .and_then(Value::as_str)
                .map(str::to_string),
            reason,
            deposed: entry.get("deposed").map(is_truthy).unwrap_or(false),
            before: if options.full { before.cloned() } else { None },
            after: if options.full { after.cloned() } else { None },
            change_id,
        };
        Ok(Self {
            resource,
            attributes,
            shape: options.shape,
        })
    }

    pub fn resource_record(&self) -> &ResourceChangeRecord {
        &self.resource
    }

    /// Attribute records, None for actions that carry none
    pub fn attribute_records(&self) -> Option<&[AttributeChangeRecord]> {
        self.attributes.as_deref()
    }

    /// Resource summary in the configured output shape
    pub fn resource(&self) -> Value {
        self.resource.to_shaped(self.shape)
    }

    /// Attribute list in the configured output shape; null (not an
    /// empty list) when the action produces no attribute records.
    pub fn attributes(&self) -> Value {
        match &self.attributes {
            Some(records) => Value::Array(
                records
                    .iter()
                    .map(|record| record.to_shaped(self.shape))
                    .collect(),
            ),
            None => Value::Null,
        }
    }

    /// Consolidated (resource, attributes) pair
    pub fn record(&self) -> Value {
        Value::Array(vec![self.resource(), self.attributes()])
    }
}
