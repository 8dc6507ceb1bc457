pub mod catalog;
pub mod edit;
pub mod error;
pub mod id;
pub mod lint;
pub mod model;
pub mod naming;
pub mod selection;
pub mod transform;
pub mod tree;

pub use catalog::{PrimitiveCatalog, PrimitiveInfo};
pub use edit::{Applied, Mutation, apply};
pub use error::EditError;
pub use id::NodeId;
pub use lint::{LintDiagnostic, LintSeverity, is_well_formed, lint_model};
pub use model::*;
pub use naming::{NameCategory, next_name};
pub use selection::Selection;

// Re-export glam types so downstream crates agree on the math types
pub use glam::{Mat4, Quat, Vec3};
