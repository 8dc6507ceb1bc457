//! Undo/Redo history.
//!
//! History is a linear stack of whole-model snapshots. Snapshots share
//! untouched node records (see `scenery_core::model`), so each step costs a
//! map of handles rather than a deep copy of the scene.
//!
//! Selection is not recorded: undoing a delete brings the node
//! back but does not re-select it.

use scenery_core::edit::{Mutation, apply};
use scenery_core::{EditError, Model, NodeId};

/// A snapshot on one of the stacks, labelled with the command that leads
/// away from it (undo side) or back to it (redo side).
#[derive(Debug, Clone)]
struct Step {
    model: Model,
    description: String,
}

/// The four observable history states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// What a successful `execute` did, minus the model itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executed {
    pub created: Option<NodeId>,
    pub removed: Vec<NodeId>,
}

/// Current model plus undo and redo stacks.
pub struct CommandStack {
    current: Model,
    undo_stack: Vec<Step>,
    redo_stack: Vec<Step>,
    /// Maximum undo depth; `None` keeps every step.
    max_depth: Option<usize>,
}

impl CommandStack {
    pub fn new(initial: Model, max_depth: Option<usize>) -> Self {
        Self {
            current: initial,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// The model every reader should see.
    pub fn current(&self) -> &Model {
        &self.current
    }

    /// Make `next` current. The previous model goes on the undo stack and
    /// the redo branch is discarded.
    pub fn commit(&mut self, next: Model, description: &str) {
        let previous = std::mem::replace(&mut self.current, next);
        self.undo_stack.push(Step {
            model: previous,
            description: description.to_string(),
        });
        if let Some(max_depth) = self.max_depth
            && self.undo_stack.len() > max_depth
        {
            self.undo_stack.remove(0);
        }

        // Clear redo stack on new action
        self.redo_stack.clear();
        log::debug!("commit: {description} (undo depth {})", self.undo_stack.len());
    }

    /// Apply `mutation` to the current model and commit the result.
    ///
    /// # Errors
    /// Returns the engine's `EditError`; the model and both stacks are left
    /// exactly as they were.
    pub fn execute(&mut self, mutation: &Mutation) -> Result<Executed, EditError> {
        let applied = apply(&self.current, mutation).inspect_err(|err| {
            log::warn!("rejected \"{}\": {err}", mutation.description());
        })?;
        self.commit(applied.model, &mutation.description());
        Ok(Executed {
            created: applied.created,
            removed: applied.removed,
        })
    }

    /// Step back one snapshot. Returns the description of the undone command,
    /// or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<String> {
        let step = self.undo_stack.pop()?;
        let undone = std::mem::replace(&mut self.current, step.model);
        self.redo_stack.push(Step {
            model: undone,
            description: step.description.clone(),
        });
        log::debug!("undo: {}", step.description);
        Some(step.description)
    }

    /// Re-apply the last undone snapshot.
    pub fn redo(&mut self) -> Option<String> {
        let step = self.redo_stack.pop()?;
        let previous = std::mem::replace(&mut self.current, step.model);
        self.undo_stack.push(Step {
            model: previous,
            description: step.description.clone(),
        });
        log::debug!("redo: {}", step.description);
        Some(step.description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Label of the command `undo` would reverse.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|s| s.description.as_str())
    }

    /// Label of the command `redo` would re-apply.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|s| s.description.as_str())
    }
}
