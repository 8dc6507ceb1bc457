//! Command palette model.
//!
//! Builds the searchable list of palette entries from the current model.
//! Choosing an entry yields a `PaletteAction`, which `EditorSession` turns
//! into exactly one command or selection change.

use scenery_core::model::PrimitiveKind;
use scenery_core::{Model, NodeId, PrimitiveCatalog, Selection, tree};

/// Palette section headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteGroup {
    Nodes,
    AddPrimitive,
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAction {
    Select(NodeId),
    AddPrimitive(PrimitiveKind),
    AddAssembly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub group: PaletteGroup,
    pub label: String,
    pub action: PaletteAction,
}

/// All palette entries whose label contains `query` (ASCII case-insensitive).
/// Nodes come first in tree order, then one add entry per catalog kind, then
/// "Add Assembly".
pub fn palette_entries(model: &Model, catalog: &PrimitiveCatalog, query: &str) -> Vec<PaletteEntry> {
    let needle = query.trim().to_ascii_lowercase();
    let mut entries = Vec::new();

    for id in tree::flatten(model) {
        if id == model.root() {
            continue;
        }
        let Some(node) = model.get(id) else { continue };
        entries.push(PaletteEntry {
            group: PaletteGroup::Nodes,
            label: format!("{} ({})", node.name, node.type_label()),
            action: PaletteAction::Select(id),
        });
    }

    for kind in catalog.kinds() {
        entries.push(PaletteEntry {
            group: PaletteGroup::AddPrimitive,
            label: format!("Add {}", catalog.label(kind)),
            action: PaletteAction::AddPrimitive(kind),
        });
    }

    entries.push(PaletteEntry {
        group: PaletteGroup::Actions,
        label: "Add Assembly".to_string(),
        action: PaletteAction::AddAssembly,
    });

    if !needle.is_empty() {
        entries.retain(|e| e.label.to_ascii_lowercase().contains(&needle));
    }
    entries
}

/// Where newly added nodes go: the selected node if it is an assembly,
/// otherwise the selected primitive's parent, otherwise the root.
pub fn insertion_parent(model: &Model, selection: &Selection) -> NodeId {
    let root = model.root();
    let Some(selected) = selection.resolve(model) else {
        return root;
    };
    if model.is_assembly(selected) {
        selected
    } else {
        tree::find_parent(model, selected).unwrap_or(root)
    }
}
