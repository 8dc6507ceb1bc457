//! Editor configuration.

use scenery_core::PrimitiveCatalog;
use serde::{Deserialize, Serialize};

/// Configuration for an `EditorSession`.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept. Oldest steps are dropped first.
    /// Default: **unbounded** (`None`).
    pub history_depth: Option<usize>,

    /// Primitive kinds offered to the user, with their default properties.
    pub catalog: PrimitiveCatalog,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: None,
            catalog: PrimitiveCatalog::builtin(),
        }
    }
}

impl EditorConfig {
    /// Load a configuration from JSON, falling back to defaults for missing
    /// fields.
    ///
    /// # Errors
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
