//! Integration tests: long command sequences keep the tree well-formed.
//!
//! Drives the engine with a deterministic pseudo-random mix of adds, deletes,
//! moves and edits, checking the structural invariants after every step.

use scenery_core::edit::{Mutation, apply};
use scenery_core::model::*;
use scenery_core::tree;
use scenery_core::{EditError, NodeId, is_well_formed};

/// Small linear congruential generator so runs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next() as usize) % items.len()]
    }
}

fn random_mutation(rng: &mut Lcg, model: &Model) -> Mutation {
    let all = tree::flatten(model);
    let target = rng.pick(&all);
    let other = rng.pick(&all);
    match rng.next() % 7 {
        0 | 1 => Mutation::AddPrimitive {
            parent: target,
            kind: rng.pick(&PrimitiveKind::ALL),
            name: "Mesh".into(),
            props: PrimitiveProps::default(),
            color: Color::WHITE,
        },
        2 => Mutation::AddAssembly {
            parent: target,
            name: "Assembly".into(),
        },
        3 => Mutation::Delete { id: target },
        4 | 5 => Mutation::Move {
            id: target,
            new_parent: other,
        },
        _ => Mutation::SetVisibility {
            id: target,
            visible: rng.next() % 2 == 0,
        },
    }
}

fn assert_invariants(model: &Model) {
    assert!(is_well_formed(model));

    for node in model.nodes() {
        // Acyclic: an assembly is never among its own descendants.
        assert!(!tree::descendants(model, node.id).contains(&node.id));

        // Every non-root node has exactly one parent that lists it.
        if node.id == model.root() {
            assert_eq!(tree::find_parent(model, node.id), None);
            continue;
        }
        let parent = tree::find_parent(model, node.id).expect("non-root node without parent");
        assert!(tree::children(model, parent).contains(&node.id));
        let holders = model
            .nodes()
            .filter(|n| n.children().contains(&node.id))
            .count();
        assert_eq!(holders, 1);
    }

    assert_eq!(tree::flatten(model).len(), model.len());
}

#[test]
fn random_command_sequences_preserve_invariants() {
    for seed in 1..=8 {
        let mut rng = Lcg(seed);
        let mut model = Model::new();
        for _ in 0..200 {
            let mutation = random_mutation(&mut rng, &model);
            let before = model.clone();
            match apply(&model, &mutation) {
                Ok(applied) => model = applied.model,
                Err(_) => {
                    // Rejections never leave a trace.
                    assert_eq!(model, before);
                }
            }
            assert_invariants(&model);
        }
    }
}

#[test]
fn validate_move_matches_descendant_rule() {
    let mut rng = Lcg(42);
    let mut model = Model::new();
    for _ in 0..60 {
        let mutation = random_mutation(&mut rng, &model);
        if let Ok(applied) = apply(&model, &mutation) {
            model = applied.model;
        }
    }

    let all = tree::flatten(&model);
    for &n in &all {
        let below = tree::descendants(&model, n);
        for &p in &all {
            let expected = p != n && !below.contains(&p);
            assert_eq!(tree::validate_move(&model, n, p), expected);
        }
    }
}

#[test]
fn rejected_move_reports_cycle() {
    let model = Model::new();
    let root = model.root();
    let a1 = apply(
        &model,
        &Mutation::AddAssembly {
            parent: root,
            name: "Assembly 1".into(),
        },
    )
    .unwrap();
    let assembly = a1.created.unwrap();
    let model = a1.model;

    let inner = apply(
        &model,
        &Mutation::AddAssembly {
            parent: assembly,
            name: "Assembly 2".into(),
        },
    )
    .unwrap();
    let nested = inner.created.unwrap();
    let model = inner.model;

    assert_eq!(
        apply(
            &model,
            &Mutation::Move {
                id: assembly,
                new_parent: nested
            }
        )
        .unwrap_err(),
        EditError::CycleRejected {
            node: assembly,
            target: nested
        }
    );
    assert!(!model.contains(NodeId::intern("never_created")));
}
