//! Local → world transform composition.
//!
//! A node's local matrix is `T · R · S`, with rotation given as intrinsic
//! XYZ Euler angles in radians. World matrices compose parent-to-child along
//! the path from the root.

use crate::id::NodeId;
use crate::model::{Model, Transform};
use crate::tree;
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::collections::HashMap;

impl Transform {
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// The local matrix `T · R · S`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }

    /// Decompose an affine matrix back into position / Euler rotation / scale.
    /// Shear introduced by non-uniform scale under rotation is lost.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            position,
            rotation: Vec3::new(x, y, z),
            scale,
        }
    }
}

/// World matrix of one node, composing every transform from the root down.
pub fn world_matrix(model: &Model, id: NodeId) -> Option<Mat4> {
    if !model.contains(id) {
        return None;
    }
    let world = tree::node_path(model, id)
        .into_iter()
        .filter_map(|step| model.get(step))
        .fold(Mat4::IDENTITY, |acc, node| acc * node.transform.to_matrix());
    Some(world)
}

/// World transform of one node, decomposed.
pub fn world_transform(model: &Model, id: NodeId) -> Option<Transform> {
    world_matrix(model, id).map(|m| Transform::from_matrix(&m))
}

/// World matrices of every node reachable from the root, in one pre-order pass.
pub fn world_matrices(model: &Model) -> HashMap<NodeId, Mat4> {
    let mut out = HashMap::with_capacity(model.len());
    let mut stack = vec![(model.root(), Mat4::IDENTITY)];
    while let Some((id, parent_world)) = stack.pop() {
        let Some(node) = model.get(id) else { continue };
        let world = parent_world * node.transform.to_matrix();
        out.insert(id, world);
        stack.extend(node.children().iter().rev().map(|&child| (child, world)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{Mutation, apply};
    use crate::model::{Color, PrimitiveKind, PrimitiveProps, TransformPatch};
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    /// root → group → leaf
    fn chain(group_patch: TransformPatch, leaf_patch: TransformPatch) -> (Model, NodeId, NodeId) {
        let model = Model::new();
        let applied = apply(
            &model,
            &Mutation::AddAssembly {
                parent: model.root(),
                name: "Assembly 1".into(),
            },
        )
        .unwrap();
        let group = applied.created.unwrap();
        let applied = apply(
            &applied.model,
            &Mutation::AddPrimitive {
                parent: group,
                kind: PrimitiveKind::Box,
                name: "Mesh 1".into(),
                props: PrimitiveProps::default(),
                color: Color::WHITE,
            },
        )
        .unwrap();
        let leaf = applied.created.unwrap();
        let model = apply(
            &applied.model,
            &Mutation::SetTransform {
                id: group,
                patch: group_patch,
            },
        )
        .unwrap()
        .model;
        let model = apply(
            &model,
            &Mutation::SetTransform {
                id: leaf,
                patch: leaf_patch,
            },
        )
        .unwrap()
        .model;
        (model, group, leaf)
    }

    fn world_position(model: &Model, id: NodeId) -> Vec3 {
        world_matrix(model, id).unwrap().w_axis.truncate()
    }

    #[test]
    fn translations_add_up() {
        let (model, _, leaf) = chain(
            TransformPatch::position(Vec3::new(1.0, 0.0, 0.0)),
            TransformPatch::position(Vec3::new(0.0, 2.0, 0.0)),
        );
        assert!(world_position(&model, leaf).abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), EPS));
    }

    #[test]
    fn parent_scale_stretches_child_offset() {
        let (model, _, leaf) = chain(
            TransformPatch::scale(Vec3::splat(2.0)),
            TransformPatch::position(Vec3::X),
        );
        assert!(world_position(&model, leaf).abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), EPS));
        let world = world_transform(&model, leaf).unwrap();
        assert!(world.scale.abs_diff_eq(Vec3::splat(2.0), EPS));
    }

    #[test]
    fn parent_rotation_swings_child() {
        let (model, _, leaf) = chain(
            TransformPatch::rotation(Vec3::new(0.0, 0.0, FRAC_PI_2)),
            TransformPatch::position(Vec3::X),
        );
        assert!(world_position(&model, leaf).abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn batch_matches_single_lookup() {
        let (model, group, leaf) = chain(
            TransformPatch {
                position: Some(Vec3::new(0.5, -1.0, 2.0)),
                rotation: Some(Vec3::new(0.3, 0.2, 0.1)),
                scale: Some(Vec3::new(1.0, 2.0, 1.0)),
            },
            TransformPatch::position(Vec3::new(1.0, 1.0, 1.0)),
        );
        let all = world_matrices(&model);
        assert_eq!(all.len(), model.len());
        for id in [model.root(), group, leaf] {
            assert!(all[&id].abs_diff_eq(world_matrix(&model, id).unwrap(), EPS));
        }
    }

    #[test]
    fn decompose_roundtrip() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.1, -0.4, 0.7),
            scale: Vec3::new(1.5, 1.5, 1.5),
        };
        let back = Transform::from_matrix(&t.to_matrix());
        assert!(back.position.abs_diff_eq(t.position, EPS));
        assert!(back.rotation.abs_diff_eq(t.rotation, EPS));
        assert!(back.scale.abs_diff_eq(t.scale, EPS));
    }

    #[test]
    fn missing_node_has_no_world_matrix() {
        assert!(world_matrix(&Model::new(), NodeId::intern("ghost")).is_none());
    }
}
