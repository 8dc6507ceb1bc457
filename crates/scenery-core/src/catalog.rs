//! Static metadata for primitive kinds: labels, default properties, colors.
//!
//! The core never computes these; they are supplied by configuration and
//! default to the built-in table below.

use crate::model::{Color, PrimitiveKind, PrimitiveProps};
use serde::{Deserialize, Serialize};

/// Metadata for one primitive kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveInfo {
    pub kind: PrimitiveKind,
    /// Human-readable name, e.g. "Cylinder".
    pub label: String,
    /// Values used for any property a node leaves unset.
    #[serde(default)]
    pub defaults: PrimitiveProps,
    /// Color given to newly added primitives of this kind.
    #[serde(default)]
    pub color: Color,
}

/// The set of primitive kinds offered to the user, in menu order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveCatalog {
    pub primitives: Vec<PrimitiveInfo>,
}

impl PrimitiveCatalog {
    /// The built-in table.
    pub fn builtin() -> Self {
        let info = |kind: PrimitiveKind, label: &str, defaults: PrimitiveProps| PrimitiveInfo {
            kind,
            label: label.to_string(),
            defaults,
            color: Color::WHITE,
        };
        let cuboid = PrimitiveProps {
            width: Some(1.0),
            height: Some(1.0),
            depth: Some(1.0),
            ..Default::default()
        };
        let round = PrimitiveProps {
            radius: Some(0.5),
            height: Some(1.0),
            segments: Some(32),
            ..Default::default()
        };

        Self {
            primitives: vec![
                info(PrimitiveKind::Box, "Box", cuboid),
                info(PrimitiveKind::Cylinder, "Cylinder", round),
                info(PrimitiveKind::Cone, "Cone", round),
                info(
                    PrimitiveKind::Sphere,
                    "Sphere",
                    PrimitiveProps {
                        radius: Some(0.5),
                        segments: Some(32),
                        ..Default::default()
                    },
                ),
                info(
                    PrimitiveKind::Torus,
                    "Torus",
                    PrimitiveProps {
                        radius: Some(0.5),
                        tube: Some(0.2),
                        segments: Some(32),
                        ..Default::default()
                    },
                ),
                info(PrimitiveKind::Pyramid, "Pyramid", cuboid),
            ],
        }
    }

    /// First entry for `kind`, if the catalog offers it.
    pub fn get(&self, kind: PrimitiveKind) -> Option<&PrimitiveInfo> {
        self.primitives.iter().find(|info| info.kind == kind)
    }

    /// Default properties for `kind`; empty when the kind is not listed.
    pub fn defaults(&self, kind: PrimitiveKind) -> PrimitiveProps {
        self.get(kind).map(|info| info.defaults).unwrap_or_default()
    }

    /// Node properties with the catalog defaults filled in.
    pub fn resolve(&self, kind: PrimitiveKind, props: &PrimitiveProps) -> PrimitiveProps {
        props.resolved(&self.defaults(kind))
    }

    pub fn color(&self, kind: PrimitiveKind) -> Color {
        self.get(kind).map(|info| info.color).unwrap_or_default()
    }

    pub fn label(&self, kind: PrimitiveKind) -> &str {
        self.get(kind)
            .map(|info| info.label.as_str())
            .unwrap_or(kind.as_str())
    }

    pub fn kinds(&self) -> impl Iterator<Item = PrimitiveKind> + '_ {
        self.primitives.iter().map(|info| info.kind)
    }
}

impl Default for PrimitiveCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
