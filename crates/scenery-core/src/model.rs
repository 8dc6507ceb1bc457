//! Core node-tree data model.
//!
//! The scene is a tree of `SceneNode` values stored in a flat map keyed by
//! `NodeId`, plus the id of the root assembly. Parentage is implicit: an
//! assembly lists its children in order, and the parent of a node is found by
//! scanning those lists (see `crate::tree`). No back-pointers are stored.
//!
//! A `Model` is a value. Every command produces a new `Model`; node records
//! are held behind `Arc` so successive snapshots share every node they did not
//! touch.

use crate::id::NodeId;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self::rgba(
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            1.0,
        )
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let pair = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgba(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                    1.0,
                ))
            }
            6 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, 1.0)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (byte(self.r), byte(self.g), byte(self.b), byte(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Linear blend toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: Color, t: f32) -> Color {
        Color::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

// ─── Primitives ──────────────────────────────────────────────────────────

/// The closed set of primitive shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Box,
    Cylinder,
    Cone,
    Sphere,
    Torus,
    Pyramid,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Box,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Cone,
        PrimitiveKind::Sphere,
        PrimitiveKind::Torus,
        PrimitiveKind::Pyramid,
    ];

    /// Lowercase keyword, also used as the id prefix for new nodes.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Box => "box",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Cone => "cone",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Torus => "torus",
            PrimitiveKind::Pyramid => "pyramid",
        }
    }
}

/// Kind-specific shape properties. Absent values fall back to the catalog
/// defaults for the primitive's kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    /// Tube radius (torus only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tube: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<u32>,
}

impl PrimitiveProps {
    /// Fill every absent field from `defaults`, keeping explicit values.
    #[must_use]
    pub fn resolved(&self, defaults: &PrimitiveProps) -> PrimitiveProps {
        PrimitiveProps {
            width: self.width.or(defaults.width),
            height: self.height.or(defaults.height),
            depth: self.depth.or(defaults.depth),
            radius: self.radius.or(defaults.radius),
            tube: self.tube.or(defaults.tube),
            segments: self.segments.or(defaults.segments),
        }
    }
}

// ─── Transforms ──────────────────────────────────────────────────────────

/// Position / rotation (Euler XYZ, radians) / scale, relative to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// A partial transform update. Only `Some` components are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformPatch {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
}

impl TransformPatch {
    pub fn position(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn rotation(rotation: Vec3) -> Self {
        Self {
            rotation: Some(rotation),
            ..Default::default()
        }
    }

    pub fn scale(scale: Vec3) -> Self {
        Self {
            scale: Some(scale),
            ..Default::default()
        }
    }

    /// Merge the supplied components into `dst`.
    pub fn apply_to(&self, dst: &mut Transform) {
        if let Some(position) = self.position {
            dst.position = position;
        }
        if let Some(rotation) = self.rotation {
            dst.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            dst.scale = scale;
        }
    }
}

// ─── Scene Tree Nodes ────────────────────────────────────────────────────

/// The two node variants. They share only the fields on `SceneNode`.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Leaf geometry.
    Primitive {
        kind: PrimitiveKind,
        props: PrimitiveProps,
        color: Color,
    },

    /// Container. Child order is the traversal and render order.
    Assembly { children: SmallVec<[NodeId; 4]> },
}

/// A single node in the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Assigned at creation, never changes.
    pub id: NodeId,

    /// User-editable display name. Not required to be unique.
    pub name: String,

    /// Local transform, relative to the parent.
    pub transform: Transform,

    pub visible: bool,

    pub kind: NodeKind,
}

impl SceneNode {
    pub(crate) fn assembly(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transform: Transform::default(),
            visible: true,
            kind: NodeKind::Assembly {
                children: SmallVec::new(),
            },
        }
    }

    pub(crate) fn primitive(
        id: NodeId,
        name: impl Into<String>,
        kind: PrimitiveKind,
        props: PrimitiveProps,
        color: Color,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            transform: Transform::default(),
            visible: true,
            kind: NodeKind::Primitive { kind, props, color },
        }
    }

    pub fn is_assembly(&self) -> bool {
        matches!(self.kind, NodeKind::Assembly { .. })
    }

    /// Ordered child ids; empty for primitives.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Assembly { children } => children.as_slice(),
            NodeKind::Primitive { .. } => &[],
        }
    }

    /// "primitive" or "assembly", as shown in listings.
    pub fn type_label(&self) -> &'static str {
        match self.kind {
            NodeKind::Primitive { .. } => "primitive",
            NodeKind::Assembly { .. } => "assembly",
        }
    }
}

// ─── Model ───────────────────────────────────────────────────────────────

/// The whole scene: node map plus root id.
///
/// Cloning a `Model` copies the map of `Arc` handles, never the node records.
/// Mutation goes through `crate::edit`, which copies a record on first write.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    nodes: HashMap<NodeId, Arc<SceneNode>>,
    root: NodeId,
}

impl Model {
    /// A model holding only an empty root assembly.
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId::root();
        let mut nodes = HashMap::new();
        nodes.insert(root, Arc::new(SceneNode::assembly(root, "Root")));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn is_assembly(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(SceneNode::is_assembly)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a model built through `Model::new`; the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in unspecified order. Use `tree::flatten` for tree order.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values().map(Arc::as_ref)
    }

    /// True when both models hold the very same record for `id`.
    pub fn shares_node(&self, other: &Model, id: NodeId) -> bool {
        match (self.nodes.get(&id), other.nodes.get(&id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    // ─── Crate-internal mutation ─────────────────────────────────────────

    pub(crate) fn insert(&mut self, node: SceneNode) {
        self.nodes.insert(node.id, Arc::new(node));
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Arc<SceneNode>> {
        self.nodes.remove(&id)
    }

    /// Copy-on-write access to one record.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id).map(Arc::make_mut)
    }

    /// Mutable child list of an assembly; `None` for primitives or missing ids.
    pub(crate) fn children_mut(&mut self, id: NodeId) -> Option<&mut SmallVec<[NodeId; 4]>> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Assembly { children } => Some(children),
            NodeKind::Primitive { .. } => None,
        }
    }

    /// A prefixed id not yet present in this model.
    pub(crate) fn fresh_id(&self, prefix: &str) -> NodeId {
        loop {
            let id = NodeId::with_prefix(prefix);
            if !self.contains(id) {
                return id;
            }
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
