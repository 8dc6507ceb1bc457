//! Pure queries over a `Model` snapshot.
//!
//! Parentage is derived from the assemblies' child lists on every call.
//! `find_parent` is a linear scan; callers that need many parent lookups in
//! one pass should build a `ParentIndex` once instead.

use crate::id::NodeId;
use crate::model::Model;
use std::collections::HashMap;

/// The assembly whose child list contains `id`, if any.
pub fn find_parent(model: &Model, id: NodeId) -> Option<NodeId> {
    model
        .nodes()
        .find(|node| node.children().contains(&id))
        .map(|node| node.id)
}

/// Direct children in order. Empty for primitives and unknown ids.
pub fn children(model: &Model, id: NodeId) -> &[NodeId] {
    model.get(id).map(|node| node.children()).unwrap_or(&[])
}

/// Every node reachable from `id` through child lists, in pre-order.
/// `id` itself is not included.
pub fn descendants(model: &Model, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = children(model, id).iter().rev().copied().collect();
    while let Some(next) = stack.pop() {
        out.push(next);
        stack.extend(children(model, next).iter().rev().copied());
    }
    out
}

/// Pre-order traversal of the whole tree, starting at the root.
pub fn flatten(model: &Model) -> Vec<NodeId> {
    let root = model.root();
    let mut out = vec![root];
    out.extend(descendants(model, root));
    out
}

/// Whether `node_id` may be re-parented under `new_parent` without creating
/// a cycle. Only the acyclicity rule is checked here; existence and
/// assembly-ness of the target are the engine's concern.
pub fn validate_move(model: &Model, node_id: NodeId, new_parent: NodeId) -> bool {
    if node_id == new_parent {
        return false;
    }
    !descendants(model, node_id).contains(&new_parent)
}

/// Children of the node's parent, including the node itself.
/// The root has no parent and is its own sole sibling.
pub fn siblings(model: &Model, id: NodeId) -> Vec<NodeId> {
    match find_parent(model, id) {
        Some(parent) => children(model, parent).to_vec(),
        None => vec![id],
    }
}

/// Ids from the root down to `id`, inclusive.
pub fn node_path(model: &Model, id: NodeId) -> Vec<NodeId> {
    let index = ParentIndex::build(model);
    let mut path = vec![id];
    let mut current = id;
    while let Some(parent) = index.parent(current) {
        // Bail out on malformed input rather than loop forever.
        if path.contains(&parent) {
            break;
        }
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Check if `ancestor` is a parent/grandparent/etc. of `descendant`.
pub fn is_ancestor_of(model: &Model, ancestor: NodeId, descendant: NodeId) -> bool {
    ancestor != descendant && descendants(model, ancestor).contains(&descendant)
}

/// Child → parent map built in one pass over the model.
///
/// Valid only for the snapshot it was built from.
#[derive(Debug, Clone, Default)]
pub struct ParentIndex {
    parents: HashMap<NodeId, NodeId>,
}

impl ParentIndex {
    pub fn build(model: &Model) -> Self {
        let mut parents = HashMap::with_capacity(model.len());
        for node in model.nodes() {
            for &child in node.children() {
                parents.entry(child).or_insert(node.id);
            }
        }
        Self { parents }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }
}
