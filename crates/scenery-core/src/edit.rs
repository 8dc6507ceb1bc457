//! The command/mutation engine.
//!
//! `apply` takes a model snapshot and one `Mutation` and returns a new
//! snapshot. Every precondition is checked against the input before the
//! copy is edited, so a rejected mutation returns an error and the caller's
//! model is untouched. Only this module creates or destroys nodes.

use crate::error::EditError;
use crate::id::NodeId;
use crate::model::{Color, Model, PrimitiveKind, PrimitiveProps, SceneNode, TransformPatch};
use crate::tree;

/// A single named, parameterized change to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Append a new primitive to `parent`'s children.
    AddPrimitive {
        parent: NodeId,
        kind: PrimitiveKind,
        name: String,
        props: PrimitiveProps,
        color: Color,
    },
    /// Append a new, empty assembly to `parent`'s children.
    AddAssembly { parent: NodeId, name: String },
    /// Remove a node and its whole subtree.
    Delete { id: NodeId },
    /// Re-parent a node, appending it to the end of `new_parent`'s children.
    Move { id: NodeId, new_parent: NodeId },
    Rename { id: NodeId, name: String },
    SetTransform { id: NodeId, patch: TransformPatch },
    SetVisibility { id: NodeId, visible: bool },
}

impl Mutation {
    /// Short label for history listings.
    pub fn description(&self) -> String {
        match self {
            Mutation::AddPrimitive { kind, name, .. } => format!("Add {} \"{name}\"", kind.as_str()),
            Mutation::AddAssembly { name, .. } => format!("Add assembly \"{name}\""),
            Mutation::Delete { id } => format!("Delete {id}"),
            Mutation::Move { id, new_parent } => format!("Move {id} to {new_parent}"),
            Mutation::Rename { id, name } => format!("Rename {id} to \"{name}\""),
            Mutation::SetTransform { id, .. } => format!("Transform {id}"),
            Mutation::SetVisibility { id, visible: true } => format!("Show {id}"),
            Mutation::SetVisibility { id, visible: false } => format!("Hide {id}"),
        }
    }

    /// Whether the mutation can change the shape of the tree.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Mutation::AddPrimitive { .. }
                | Mutation::AddAssembly { .. }
                | Mutation::Delete { .. }
                | Mutation::Move { .. }
        )
    }
}

/// The result of a successful `apply`.
#[derive(Debug, Clone)]
pub struct Applied {
    /// The new snapshot.
    pub model: Model,
    /// Id of the node created by an add.
    pub created: Option<NodeId>,
    /// Ids removed by a delete, the target first, then its descendants in
    /// pre-order.
    pub removed: Vec<NodeId>,
}

impl Applied {
    fn new(model: Model) -> Self {
        Self {
            model,
            created: None,
            removed: Vec::new(),
        }
    }
}

/// Apply one mutation to `model`, producing the next snapshot.
///
/// # Errors
/// Returns the `EditError` describing the first failed precondition; the
/// input model is never modified.
pub fn apply(model: &Model, mutation: &Mutation) -> Result<Applied, EditError> {
    let applied = match mutation {
        Mutation::AddPrimitive {
            parent,
            kind,
            name,
            props,
            color,
        } => {
            require_assembly(model, *parent)?;
            let mut next = model.clone();
            let id = next.fresh_id(kind.as_str());
            next.insert(SceneNode::primitive(id, name.as_str(), *kind, *props, *color));
            append_child(&mut next, *parent, id);
            Applied {
                created: Some(id),
                ..Applied::new(next)
            }
        }
        Mutation::AddAssembly { parent, name } => {
            require_assembly(model, *parent)?;
            let mut next = model.clone();
            let id = next.fresh_id("assembly");
            next.insert(SceneNode::assembly(id, name.as_str()));
            append_child(&mut next, *parent, id);
            Applied {
                created: Some(id),
                ..Applied::new(next)
            }
        }
        Mutation::Delete { id } => {
            if *id == model.root() {
                return Err(EditError::Forbidden {
                    id: *id,
                    action: "delete",
                });
            }
            require_node(model, *id)?;

            let mut removed = vec![*id];
            removed.extend(tree::descendants(model, *id));
            let parent = tree::find_parent(model, *id);

            let mut next = model.clone();
            if let Some(parent) = parent {
                detach_child(&mut next, parent, *id);
            }
            for gone in &removed {
                next.remove(*gone);
            }
            Applied {
                removed,
                ..Applied::new(next)
            }
        }
        Mutation::Move { id, new_parent } => {
            require_node(model, *id)?;
            require_node(model, *new_parent)?;
            if *id == model.root() {
                return Err(EditError::Forbidden {
                    id: *id,
                    action: "move",
                });
            }
            if !tree::validate_move(model, *id, *new_parent) {
                return Err(EditError::CycleRejected {
                    node: *id,
                    target: *new_parent,
                });
            }
            require_assembly(model, *new_parent)?;

            let mut next = model.clone();
            if let Some(old_parent) = tree::find_parent(model, *id) {
                detach_child(&mut next, old_parent, *id);
            }
            append_child(&mut next, *new_parent, *id);
            Applied::new(next)
        }
        Mutation::Rename { id, name } => {
            let mut next = model.clone();
            next.node_mut(*id).ok_or(EditError::NotFound(*id))?.name = name.clone();
            Applied::new(next)
        }
        Mutation::SetTransform { id, patch } => {
            let mut next = model.clone();
            let node = next.node_mut(*id).ok_or(EditError::NotFound(*id))?;
            patch.apply_to(&mut node.transform);
            Applied::new(next)
        }
        Mutation::SetVisibility { id, visible } => {
            let mut next = model.clone();
            next.node_mut(*id).ok_or(EditError::NotFound(*id))?.visible = *visible;
            Applied::new(next)
        }
    };

    if mutation.is_structural() {
        debug_assert!(
            crate::lint::is_well_formed(&applied.model),
            "{} broke a tree invariant",
            mutation.description()
        );
    }
    log::debug!("applied: {}", mutation.description());
    Ok(applied)
}

fn require_node(model: &Model, id: NodeId) -> Result<(), EditError> {
    if model.contains(id) {
        Ok(())
    } else {
        Err(EditError::NotFound(id))
    }
}

/// `id` must exist and be an assembly.
fn require_assembly(model: &Model, id: NodeId) -> Result<(), EditError> {
    if model.is_assembly(id) {
        Ok(())
    } else {
        Err(EditError::InvalidTarget(id))
    }
}

// Both helpers run after validation; the parent is known to be an assembly.
fn append_child(model: &mut Model, parent: NodeId, child: NodeId) {
    if let Some(children) = model.children_mut(parent) {
        children.push(child);
    }
}

fn detach_child(model: &mut Model, parent: NodeId, child: NodeId) {
    if let Some(children) = model.children_mut(parent) {
        children.retain(|c| *c != child);
    }
}
