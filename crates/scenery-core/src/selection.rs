//! The currently highlighted node.
//!
//! Selection lives beside the model, not inside it, and is not part of undo
//! history. A selection whose node no longer exists reads as "nothing
//! selected".

use crate::id::NodeId;
use crate::model::Model;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NodeId>,
}

impl Selection {
    pub fn new(selected: Option<NodeId>) -> Self {
        Self { selected }
    }

    pub fn set(&mut self, selected: Option<NodeId>) {
        self.selected = selected;
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The stored id, without checking it against any model.
    pub fn raw(&self) -> Option<NodeId> {
        self.selected
    }

    /// The selected id if it exists in `model`.
    pub fn resolve(&self, model: &Model) -> Option<NodeId> {
        self.selected.filter(|id| model.contains(*id))
    }

    pub fn is_selected(&self, model: &Model, id: NodeId) -> bool {
        self.resolve(model) == Some(id)
    }
}
