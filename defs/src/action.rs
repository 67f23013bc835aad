use serde::{Deserialize, Serialize};

/// Resource mode indicating how Terraform manages the resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    #[default]
    Managed,
    Data,
}

impl ResourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceMode::Managed => "managed",
            ResourceMode::Data => "data",
        }
    }
}

/// Resolved action for a resource change.
/// Action lists outside the five known verbs and the two replace pairs
/// pass through verbatim, joined with `-`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ResourceAction {
    NoOp,
    Create,
    Update,
    Delete,
    Replace,
    Other(String),
}

impl ResourceAction {
    /// Merge a raw action list into a single resolved action.
    /// Exactly the create/delete pair, in either order, means replace.
    pub fn resolve(actions: &[String]) -> Self {
        let joined = actions.join("-");
        match joined.as_str() {
            "create-delete" | "delete-create" => ResourceAction::Replace,
            _ => ResourceAction::from(joined.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResourceAction::NoOp => "no-op",
            ResourceAction::Create => "create",
            ResourceAction::Update => "update",
            ResourceAction::Delete => "delete",
            ResourceAction::Replace => "replace",
            ResourceAction::Other(other) => other,
        }
    }
}

impl From<&str> for ResourceAction {
    fn from(value: &str) -> Self {
        match value {
            "no-op" => ResourceAction::NoOp,
            "create" => ResourceAction::Create,
            "update" => ResourceAction::Update,
            "delete" => ResourceAction::Delete,
            "replace" => ResourceAction::Replace,
            other => ResourceAction::Other(other.to_string()),
        }
    }
}

impl From<String> for ResourceAction {
    fn from(value: String) -> Self {
        ResourceAction::from(value.as_str())
    }
}

impl From<ResourceAction> for String {
    fn from(value: ResourceAction) -> Self {
        value.as_str().to_string()
    }
}
