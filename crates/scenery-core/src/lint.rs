//! Structural diagnostics for a `Model`.
//!
//! Reports invariant violations without modifying the model. The engine only
//! ever produces well-formed trees; these checks back its debug assertions
//! and the property tests.

use crate::id::NodeId;
use crate::model::Model;
use crate::tree;
use std::collections::{HashMap, HashSet};

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// A tree invariant is broken.
    Warning,
    /// Allowed, but likely confusing to the user.
    Info,
}

/// A single lint diagnostic for a scene node.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// The node this diagnostic refers to.
    pub node_id: NodeId,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "dangling-child", "cycle").
    pub rule: &'static str,
}

impl LintDiagnostic {
    fn warning(node_id: NodeId, rule: &'static str, message: String) -> Self {
        Self {
            node_id,
            message,
            severity: LintSeverity::Warning,
            rule,
        }
    }
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the model and return diagnostics.
#[must_use]
pub fn lint_model(model: &Model) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_root(model, &mut diags);
    lint_dangling_children(model, &mut diags);
    lint_multiple_parents(model, &mut diags);
    lint_cycles(model, &mut diags);
    lint_unreachable(model, &mut diags);
    lint_duplicate_names(model, &mut diags);
    diags
}

/// True when no Warning-severity diagnostic is reported.
pub fn is_well_formed(model: &Model) -> bool {
    lint_model(model)
        .iter()
        .all(|d| d.severity != LintSeverity::Warning)
}

// ─── Rules ────────────────────────────────────────────────────────────────

/// The root must exist, be an assembly, and appear in no child list.
fn lint_root(model: &Model, diags: &mut Vec<LintDiagnostic>) {
    let root = model.root();
    match model.get(root) {
        None => diags.push(LintDiagnostic::warning(
            root,
            "missing-root",
            format!("Root {root} is not in the node map."),
        )),
        Some(node) if !node.is_assembly() => diags.push(LintDiagnostic::warning(
            root,
            "root-not-assembly",
            format!("Root {root} must be an assembly."),
        )),
        Some(_) => {}
    }
    if let Some(holder) = tree::find_parent(model, root) {
        diags.push(LintDiagnostic::warning(
            root,
            "root-has-parent",
            format!("Root {root} is listed as a child of {holder}."),
        ));
    }
}

/// Every id in a child list must exist.
fn lint_dangling_children(model: &Model, diags: &mut Vec<LintDiagnostic>) {
    for node in model.nodes() {
        for &child in node.children() {
            if !model.contains(child) {
                diags.push(LintDiagnostic::warning(
                    node.id,
                    "dangling-child",
                    format!("{} lists missing child {child}.", node.id),
                ));
            }
        }
    }
}

/// A node may appear in at most one child list, at most once.
fn lint_multiple_parents(model: &Model, diags: &mut Vec<LintDiagnostic>) {
    let mut holders: HashMap<NodeId, usize> = HashMap::new();
    for node in model.nodes() {
        for &child in node.children() {
            *holders.entry(child).or_default() += 1;
        }
    }
    for (child, count) in holders {
        if count > 1 {
            diags.push(LintDiagnostic::warning(
                child,
                "multiple-parents",
                format!("{child} is listed {count} times across child lists."),
            ));
        }
    }
}

/// No node may be its own descendant.
fn lint_cycles(model: &Model, diags: &mut Vec<LintDiagnostic>) {
    for node in model.nodes().filter(|n| n.is_assembly()) {
        if reaches(model, node.id, node.id) {
            diags.push(LintDiagnostic::warning(
                node.id,
                "cycle",
                format!("{} is its own descendant.", node.id),
            ));
        }
    }
}

/// Depth-first search from `from`'s children that tolerates cycles.
fn reaches(model: &Model, from: NodeId, target: NodeId) -> bool {
    let mut seen = HashSet::new();
    let mut stack: Vec<NodeId> = tree::children(model, from).to_vec();
    while let Some(next) = stack.pop() {
        if next == target {
            return true;
        }
        if seen.insert(next) {
            stack.extend_from_slice(tree::children(model, next));
        }
    }
    false
}

/// Every node must hang off the root.
fn lint_unreachable(model: &Model, diags: &mut Vec<LintDiagnostic>) {
    let reachable: HashSet<NodeId> = reachable_preorder(model).into_iter().collect();
    for node in model.nodes() {
        if !reachable.contains(&node.id) {
            diags.push(LintDiagnostic::warning(
                node.id,
                "unreachable",
                format!("{} (\"{}\") is not reachable from the root.", node.id, node.name),
            ));
        }
    }
}

/// Pre-order walk from the root that visits each id once, even on a
/// malformed model where `tree::flatten` would not terminate.
fn reachable_preorder(model: &Model) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![model.root()];
    while let Some(next) = stack.pop() {
        if !seen.insert(next) {
            continue;
        }
        order.push(next);
        stack.extend(tree::children(model, next).iter().rev().copied());
    }
    order
}

/// Info when two nodes share a display name.
fn lint_duplicate_names(model: &Model, diags: &mut Vec<LintDiagnostic>) {
    let mut seen: HashMap<&str, NodeId> = HashMap::new();
    for id in reachable_preorder(model) {
        let Some(node) = model.get(id) else { continue };
        if let Some(first) = seen.insert(node.name.as_str(), id) {
            diags.push(LintDiagnostic {
                node_id: id,
                message: format!(
                    "{id} shares the name \"{}\" with {first}; consider renaming it.",
                    node.name
                ),
                severity: LintSeverity::Info,
                rule: "duplicate-name",
            });
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
