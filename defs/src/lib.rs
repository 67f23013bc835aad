mod action;
mod record;

pub use action::{ResourceAction, ResourceMode};
pub use record::{
    is_truthy, AttributeChangeRecord, RecordShape, ResourceChangeRecord, StateResourceRecord,
};
