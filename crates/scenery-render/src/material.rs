//! Surface and outline styles for primitive meshes.
//!
//! The selected node is tinted toward a light green and glows faintly. Every
//! other mesh uses its own color with a slight self-illumination.

use scenery_core::Color;

/// Light green used to tint and light the selected mesh.
pub const SELECTION_TINT: Color = Color::from_rgb(0x4ADE80);

/// Share of the tint mixed into the selected mesh's base color.
const SELECTION_MIX: f32 = 0.3;

/// PBR-style surface parameters handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
}

impl Material {
    /// Unselected surface.
    pub fn standard(base: Color) -> Self {
        Self {
            color: base,
            metalness: 0.3,
            roughness: 0.7,
            emissive: base,
            emissive_intensity: 0.1,
        }
    }

    /// Selected surface.
    pub fn highlighted(base: Color) -> Self {
        Self {
            color: base.lerp(SELECTION_TINT, SELECTION_MIX),
            metalness: 0.5,
            roughness: 0.5,
            emissive: SELECTION_TINT,
            emissive_intensity: 0.15,
        }
    }

    pub fn for_node(base: Color, selected: bool) -> Self {
        if selected {
            Self::highlighted(base)
        } else {
            Self::standard(base)
        }
    }
}

/// Outline drawn along a mesh's edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub color: Color,
    pub opacity: f32,
}

impl EdgeStyle {
    pub fn for_node(selected: bool) -> Self {
        if selected {
            Self {
                color: Color::from_rgb(0x10B981),
                opacity: 0.8,
            }
        } else {
            Self {
                color: Color::from_rgb(0x1F2937),
                opacity: 0.6,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_keeps_base_color() {
        let base = Color::from_rgb(0x336699);
        let m = Material::standard(base);
        assert_eq!(m.color, base);
        assert_eq!(m.emissive, base);
        assert_eq!(m.metalness, 0.3);
        assert_eq!(m.roughness, 0.7);
    }

    #[test]
    fn highlight_mixes_toward_tint() {
        let m = Material::highlighted(Color::WHITE);
        assert!((m.color.g - (1.0 + (SELECTION_TINT.g - 1.0) * 0.3)).abs() < 1e-6);
        assert_eq!(m.emissive.to_hex(), "#4ADE80");
        assert_eq!(m.emissive_intensity, 0.15);
    }

    #[test]
    fn edge_styles() {
        assert_eq!(EdgeStyle::for_node(true).color.to_hex(), "#10B981");
        assert_eq!(EdgeStyle::for_node(false).opacity, 0.6);
    }
}
