//! Node tree → renderable scene graph.
//!
//! `SceneSync` keeps a `StableDiGraph` of render elements in step with the
//! editor's model. Each `sync` walks the model in pre-order, composes world
//! matrices, and then adds, updates or removes elements so that exactly the
//! nodes reachable from the root are present. Element indices stay stable
//! across syncs for nodes that survive, so renderer-side resources keyed by
//! `NodeIndex` can be reused.
//!
//! A hidden node keeps its element (marked not drawn) so that its children
//! are still positioned relative to it; each child's own flag decides
//! whether the child is drawn.

use crate::material::{EdgeStyle, Material};
use glam::Mat4;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use scenery_core::model::{NodeKind, PrimitiveKind, PrimitiveProps};
use scenery_core::{Model, NodeId, PrimitiveCatalog, Selection};
use std::collections::{HashMap, HashSet};

/// What an element draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    /// Transform-only container for an assembly.
    Group,
    /// Geometry for a primitive, with catalog defaults already applied.
    Mesh {
        kind: PrimitiveKind,
        props: PrimitiveProps,
        material: Material,
        edges: EdgeStyle,
    },
}

/// One renderable element, mirroring one model node.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderElement {
    pub id: NodeId,
    pub local: Mat4,
    pub world: Mat4,
    /// The node's own visibility flag.
    pub visible: bool,
    pub selected: bool,
    pub content: ElementContent,
}

impl RenderElement {
    /// Whether the renderer should emit geometry for this element.
    pub fn is_drawn(&self) -> bool {
        self.visible && matches!(self.content, ElementContent::Mesh { .. })
    }
}

/// Counts from one `sync` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub unchanged: usize,
}

/// Renderable mirror of the model. Edges go from parent → child.
pub struct SceneSync {
    graph: StableDiGraph<RenderElement, ()>,
    index: HashMap<NodeId, NodeIndex>,
    /// Element indices in model pre-order.
    order: Vec<NodeIndex>,
    catalog: PrimitiveCatalog,
}

impl SceneSync {
    pub fn new(catalog: PrimitiveCatalog) -> Self {
        Self {
            graph: StableDiGraph::new(),
            index: HashMap::new(),
            order: Vec::new(),
            catalog,
        }
    }

    /// Bring the scene graph in line with `model` and `selection`.
    pub fn sync(&mut self, model: &Model, selection: &Selection) -> SyncStats {
        let selected = selection.resolve(model);
        let mut stats = SyncStats::default();
        let mut seen = HashSet::with_capacity(model.len());
        let mut order = Vec::with_capacity(model.len());

        let mut stack: Vec<(NodeId, Option<NodeIndex>, Mat4)> =
            vec![(model.root(), None, Mat4::IDENTITY)];
        while let Some((id, parent_idx, parent_world)) = stack.pop() {
            let Some(node) = model.get(id) else { continue };
            if !seen.insert(id) {
                continue;
            }

            let local = node.transform.to_matrix();
            let world = parent_world * local;
            let is_selected = selected == Some(id);
            let content = match &node.kind {
                NodeKind::Assembly { .. } => ElementContent::Group,
                NodeKind::Primitive { kind, props, color } => ElementContent::Mesh {
                    kind: *kind,
                    props: self.catalog.resolve(*kind, props),
                    material: Material::for_node(*color, is_selected),
                    edges: EdgeStyle::for_node(is_selected),
                },
            };
            let element = RenderElement {
                id,
                local,
                world,
                visible: node.visible,
                selected: is_selected,
                content,
            };

            let idx = match self.index.get(&id).copied() {
                Some(idx) => {
                    let mut changed = self.relink(idx, parent_idx);
                    if self.graph[idx] != element {
                        self.graph[idx] = element;
                        changed = true;
                    }
                    if changed {
                        stats.updated += 1;
                        log::trace!("SYNC update {id}");
                    } else {
                        stats.unchanged += 1;
                    }
                    idx
                }
                None => {
                    let idx = self.graph.add_node(element);
                    if let Some(parent) = parent_idx {
                        self.graph.add_edge(parent, idx, ());
                    }
                    self.index.insert(id, idx);
                    stats.added += 1;
                    log::trace!("SYNC add {id}");
                    idx
                }
            };
            order.push(idx);

            stack.extend(node.children().iter().rev().map(|&child| (child, Some(idx), world)));
        }

        let stale: Vec<(NodeId, NodeIndex)> = self
            .index
            .iter()
            .filter(|(id, _)| !seen.contains(*id))
            .map(|(id, idx)| (*id, *idx))
            .collect();
        for (id, idx) in stale {
            self.graph.remove_node(idx);
            self.index.remove(&id);
            stats.removed += 1;
            log::trace!("SYNC remove {id}");
        }

        self.order = order;
        log::debug!(
            "scene sync: +{} ~{} -{} ={}",
            stats.added,
            stats.updated,
            stats.removed,
            stats.unchanged
        );
        stats
    }

    /// Point `idx`'s incoming edge at `parent`. Returns true if it moved.
    fn relink(&mut self, idx: NodeIndex, parent: Option<NodeIndex>) -> bool {
        let current = self.graph.neighbors_directed(idx, Direction::Incoming).next();
        if current == parent {
            return false;
        }
        if let Some(old) = current
            && let Some(edge) = self.graph.find_edge(old, idx)
        {
            self.graph.remove_edge(edge);
        }
        if let Some(new) = parent {
            self.graph.add_edge(new, idx, ());
        }
        true
    }

    pub fn element(&self, id: NodeId) -> Option<&RenderElement> {
        self.index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    /// Parent element's node id, read from the render graph.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.index_of(id)?;
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .map(|parent| self.graph[parent].id)
    }

    /// Every element in model pre-order.
    pub fn elements(&self) -> impl Iterator<Item = &RenderElement> {
        self.order.iter().map(|idx| &self.graph[*idx])
    }

    /// Meshes to draw this frame, in model pre-order.
    pub fn draw_list(&self) -> Vec<&RenderElement> {
        self.elements().filter(|e| e.is_drawn()).collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Default for SceneSync {
    fn default() -> Self {
        Self::new(PrimitiveCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenery_core::edit::{Mutation, apply};
    use scenery_core::model::Color;

    fn add_box(model: &Model, parent: NodeId) -> (Model, NodeId) {
        let applied = apply(
            model,
            &Mutation::AddPrimitive {
                parent,
                kind: PrimitiveKind::Box,
                name: "Mesh 1".into(),
                props: PrimitiveProps::default(),
                color: Color::WHITE,
            },
        )
        .unwrap();
        (applied.model, applied.created.unwrap())
    }

    #[test]
    fn first_sync_adds_everything() {
        let model = Model::new();
        let (model, leaf) = add_box(&model, model.root());
        let mut scene = SceneSync::default();
        let stats = scene.sync(&model, &Selection::default());
        assert_eq!(stats.added, 2);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.parent_of(leaf), Some(model.root()));

        // Defaults are filled in from the catalog.
        match &scene.element(leaf).unwrap().content {
            ElementContent::Mesh { props, .. } => assert_eq!(props.width, Some(1.0)),
            ElementContent::Group => panic!("expected mesh"),
        }
    }

    #[test]
    fn resync_without_changes_is_stable() {
        let model = Model::new();
        let (model, leaf) = add_box(&model, model.root());
        let mut scene = SceneSync::default();
        scene.sync(&model, &Selection::default());
        let idx = scene.index_of(leaf);

        let stats = scene.sync(&model, &Selection::default());
        assert_eq!(
            stats,
            SyncStats {
                unchanged: 2,
                ..Default::default()
            }
        );
        assert_eq!(scene.index_of(leaf), idx);
    }

    #[test]
    fn selection_switches_material() {
        let model = Model::new();
        let (model, leaf) = add_box(&model, model.root());
        let mut scene = SceneSync::default();
        scene.sync(&model, &Selection::default());
        let stats = scene.sync(&model, &Selection::new(Some(leaf)));
        assert_eq!(stats.updated, 1);

        let element = scene.element(leaf).unwrap();
        assert!(element.selected);
        match &element.content {
            ElementContent::Mesh { material, .. } => {
                assert_eq!(*material, Material::highlighted(Color::WHITE));
            }
            ElementContent::Group => panic!("expected mesh"),
        }
    }
}
