pub mod attribute;
pub mod diff;
pub mod path;
pub mod plan;
pub mod resource;
pub mod sensitive;
pub mod state;

pub use attribute::AttributeChanges;
pub use diff::{diff_trees, TreeDiff};
pub use path::normalize_path;
pub use plan::PlanChanges;
pub use resource::{ChangeIdMode, FormatOptions, ResourceChange};
pub use sensitive::collect_marked;
pub use state::State;
