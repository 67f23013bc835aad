use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::{ResourceAction, ResourceMode};

/// Output shape for emitted records. The shape is a serialization concern
/// only; the normalization logic never branches on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    /// Keyed maps with explicit field names
    #[default]
    Structured,
    /// Positional arrays, correlation id appended last only when present
    Flat,
}

/// True for values that carry content: non-null, non-zero, non-empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Resource-level summary of one planned change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceChangeRecord {
    /// Full resource address (e.g., "module.s3bucket.aws_s3_bucket.example")
    pub address: String,
    /// Resolved action, with create+delete pairs merged into replace
    pub action: ResourceAction,
    /// Previous address when the plan carries a rename
    pub rename_from: Option<String>,
    /// Action reason; synthesized from the joined action list for replace
    pub reason: Option<String>,
    #[serde(default)]
    pub deposed: bool,
    /// Full before tree, kept only when requested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub before: Option<Value>,
    /// Full after tree, kept only when requested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub after: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub change_id: Option<String>,
}

impl ResourceChangeRecord {
    pub fn to_shaped(&self, shape: RecordShape) -> Value {
        match shape {
            RecordShape::Structured => {
                let mut record = Map::new();
                record.insert("address".to_string(), json!(self.address));
                record.insert("action".to_string(), json!(self.action.as_str()));
                record.insert("rename_from".to_string(), json!(self.rename_from));
                record.insert("reason".to_string(), json!(self.reason));
                record.insert("deposed".to_string(), json!(self.deposed));
                if let Some(before) = &self.before {
                    record.insert("before".to_string(), before.clone());
                }
                if let Some(after) = &self.after {
                    record.insert("after".to_string(), after.clone());
                }
                if let Some(change_id) = &self.change_id {
                    record.insert("change_id".to_string(), json!(change_id));
                }
                Value::Object(record)
            }
            RecordShape::Flat => {
                let mut row = vec![
                    json!(self.address),
                    json!(self.action.as_str()),
                    json!(self.rename_from),
                    json!(self.reason),
                    json!(self.deposed),
                ];
                if let Some(before) = &self.before {
                    row.push(before.clone());
                    row.push(self.after.clone().unwrap_or(Value::Null));
                }
                if let Some(change_id) = &self.change_id {
                    row.push(json!(change_id));
                }
                Value::Array(row)
            }
        }
    }
}

/// One attribute-level change, already normalized and redacted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeChangeRecord {
    /// Normalized attribute name (dotted path)
    pub attribute: String,
    /// Previous value, redacted when sensitive; absent for additions
    pub old: Option<Value>,
    /// Planned value, redacted when sensitive or replaced by the
    /// unknown-after-apply sentinel; absent for removals
    pub new: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub change_id: Option<String>,
}

impl AttributeChangeRecord {
    pub fn to_shaped(&self, shape: RecordShape) -> Value {
        match shape {
            RecordShape::Structured => {
                let mut record = Map::new();
                record.insert("attribute".to_string(), json!(self.attribute));
                record.insert("old".to_string(), json!(self.old));
                record.insert("new".to_string(), json!(self.new));
                if let Some(change_id) = &self.change_id {
                    record.insert("change_id".to_string(), json!(change_id));
                }
                Value::Object(record)
            }
            RecordShape::Flat => {
                let mut row = vec![json!(self.attribute), json!(self.old), json!(self.new)];
                if let Some(change_id) = &self.change_id {
                    row.push(json!(change_id));
                }
                Value::Array(row)
            }
        }
    }
}

/// Summary of one deployed resource instance from a state snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateResourceRecord {
    pub address: String,
    pub mode: ResourceMode,
    pub provider: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    /// Stringified count/for_each index; None when absent or empty
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state_id: Option<String>,
}

impl StateResourceRecord {
    pub fn to_shaped(&self, shape: RecordShape) -> Value {
        match shape {
            RecordShape::Structured => {
                let mut record = Map::new();
                record.insert("address".to_string(), json!(self.address));
                record.insert("mode".to_string(), json!(self.mode.as_str()));
                record.insert("provider".to_string(), json!(self.provider));
                record.insert("type".to_string(), json!(self.resource_type));
                record.insert("name".to_string(), json!(self.name));
                record.insert("index".to_string(), json!(self.index));
                if let Some(state_id) = &self.state_id {
                    record.insert("state_id".to_string(), json!(state_id));
                }
                Value::Object(record)
            }
            RecordShape::Flat => {
                let mut row = vec![
                    json!(self.address),
                    json!(self.mode.as_str()),
                    json!(self.provider),
                    json!(self.resource_type),
                    json!(self.name),
                    json!(self.index),
                ];
                if let Some(state_id) = &self.state_id {
                    row.push(json!(state_id));
                }
                Value::Array(row)
            }
        }
    }
}
