//! Editor session: the single owner of the model history and the selection.
//!
//! Input sources (palette, shortcuts, viewport picks) never touch node
//! records. Each user action becomes exactly one engine command or one
//! selection change, applied synchronously in arrival order.

use crate::commands::{CommandStack, Executed};
use crate::config::EditorConfig;
use crate::palette::{self, PaletteAction, PaletteEntry};
use crate::shortcuts::ShortcutAction;
use scenery_core::edit::Mutation;
use scenery_core::model::PrimitiveKind;
use scenery_core::naming::{NameCategory, next_name};
use scenery_core::{EditError, Model, NodeId, Selection};

pub struct EditorSession {
    stack: CommandStack,
    selection: Selection,
    config: EditorConfig,
    palette_open: bool,
}

impl EditorSession {
    /// A session over an empty scene.
    pub fn new(config: EditorConfig) -> Self {
        let stack = CommandStack::new(Model::new(), config.history_depth);
        Self {
            stack,
            selection: Selection::default(),
            config,
            palette_open: false,
        }
    }

    pub fn model(&self) -> &Model {
        self.stack.current()
    }

    pub fn history(&self) -> &CommandStack {
        &self.stack
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The raw selection state, for readers that resolve it themselves.
    pub fn selection_state(&self) -> &Selection {
        &self.selection
    }

    /// The selected node, or `None` if nothing (or a deleted node) is selected.
    pub fn selected(&self) -> Option<NodeId> {
        self.selection.resolve(self.stack.current())
    }

    /// Change the selection. Never recorded in history.
    pub fn select(&mut self, id: Option<NodeId>) {
        self.selection.set(id);
    }

    /// Run one command through the engine and record it.
    ///
    /// # Errors
    /// Returns the engine's rejection; the scene and history are unchanged.
    pub fn execute(&mut self, mutation: Mutation) -> Result<Executed, EditError> {
        self.stack.execute(&mutation)
    }

    pub fn undo(&mut self) -> Option<String> {
        self.stack.undo()
    }

    pub fn redo(&mut self) -> Option<String> {
        self.stack.redo()
    }

    /// Parent for the next added node; see `palette::insertion_parent`.
    pub fn insertion_parent(&self) -> NodeId {
        palette::insertion_parent(self.stack.current(), &self.selection)
    }

    /// Add an auto-named primitive of `kind` with the catalog defaults.
    ///
    /// # Errors
    /// Propagates the engine's rejection.
    pub fn add_primitive(&mut self, kind: PrimitiveKind) -> Result<NodeId, EditError> {
        let parent = self.insertion_parent();
        let mutation = Mutation::AddPrimitive {
            parent,
            kind,
            name: next_name(self.stack.current(), NameCategory::Primitive),
            props: self.config.catalog.defaults(kind),
            color: self.config.catalog.color(kind),
        };
        self.created_by(parent, mutation)
    }

    /// Add an auto-named, empty assembly.
    ///
    /// # Errors
    /// Propagates the engine's rejection.
    pub fn add_assembly(&mut self) -> Result<NodeId, EditError> {
        let parent = self.insertion_parent();
        let mutation = Mutation::AddAssembly {
            parent,
            name: next_name(self.stack.current(), NameCategory::Assembly),
        };
        self.created_by(parent, mutation)
    }

    /// Run an add under `parent` and return the new node's id.
    fn created_by(&mut self, parent: NodeId, mutation: Mutation) -> Result<NodeId, EditError> {
        self.execute(mutation)?
            .created
            .ok_or(EditError::InvalidTarget(parent))
    }

    /// Delete the selected node and clear the selection.
    ///
    /// With nothing selected, or the root selected, this does nothing and
    /// returns `Ok(None)`.
    ///
    /// # Errors
    /// Propagates the engine's rejection.
    pub fn delete_selected(&mut self) -> Result<Option<Executed>, EditError> {
        let Some(id) = self.selected() else {
            return Ok(None);
        };
        if id == self.stack.current().root() {
            return Ok(None);
        }
        let executed = self.execute(Mutation::Delete { id })?;
        self.selection.clear();
        Ok(Some(executed))
    }

    pub fn palette_open(&self) -> bool {
        self.palette_open
    }

    /// Palette entries for the current model.
    pub fn palette(&self, query: &str) -> Vec<PaletteEntry> {
        palette::palette_entries(self.stack.current(), &self.config.catalog, query)
    }

    /// Carry out a palette choice and close the palette.
    ///
    /// # Errors
    /// Propagates the engine's rejection.
    pub fn run_palette(&mut self, action: PaletteAction) -> Result<(), EditError> {
        self.palette_open = false;
        match action {
            PaletteAction::Select(id) => self.select(Some(id)),
            PaletteAction::AddPrimitive(kind) => {
                self.add_primitive(kind)?;
            }
            PaletteAction::AddAssembly => {
                self.add_assembly()?;
            }
        }
        Ok(())
    }

    /// Carry out a keyboard shortcut.
    ///
    /// # Errors
    /// Propagates the engine's rejection of a delete.
    pub fn handle_shortcut(&mut self, action: ShortcutAction) -> Result<(), EditError> {
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Delete => {
                self.delete_selected()?;
            }
            ShortcutAction::Deselect => self.selection.clear(),
            ShortcutAction::TogglePalette => self.palette_open = !self.palette_open,
        }
        Ok(())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenery_core::model::NodeKind;
    use scenery_core::tree;

    #[test]
    fn add_primitive_uses_catalog_and_naming() {
        let mut session = EditorSession::default();
        let id = session.add_primitive(PrimitiveKind::Sphere).unwrap();
        let node = session.model().get(id).unwrap();
        assert_eq!(node.name, "Mesh 1");
        match &node.kind {
            NodeKind::Primitive { kind, props, .. } => {
                assert_eq!(*kind, PrimitiveKind::Sphere);
                assert_eq!(props.radius, Some(0.5));
            }
            NodeKind::Assembly { .. } => panic!("expected primitive"),
        }
        // Every kind shares the one "Mesh" sequence.
        let second = session.add_primitive(PrimitiveKind::Cone).unwrap();
        assert_eq!(session.model().get(second).unwrap().name, "Mesh 2");
    }

    #[test]
    fn adds_go_under_selected_assembly() {
        let mut session = EditorSession::default();
        let group = session.add_assembly().unwrap();
        session.select(Some(group));
        let leaf = session.add_primitive(PrimitiveKind::Box).unwrap();
        assert_eq!(tree::find_parent(session.model(), leaf), Some(group));

        // With a primitive selected, siblings are added next to it.
        session.select(Some(leaf));
        let sibling = session.add_primitive(PrimitiveKind::Box).unwrap();
        assert_eq!(tree::find_parent(session.model(), sibling), Some(group));
    }

    #[test]
    fn delete_selected_clears_selection() {
        let mut session = EditorSession::default();
        let id = session.add_assembly().unwrap();
        session.select(Some(id));
        let executed = session.delete_selected().unwrap().unwrap();
        assert_eq!(executed.removed, vec![id]);
        assert_eq!(session.selected(), None);
        assert!(!session.model().contains(id));
    }

    #[test]
    fn delete_with_root_or_nothing_selected_is_noop() {
        let mut session = EditorSession::default();
        assert!(session.delete_selected().unwrap().is_none());
        let root = session.model().root();
        session.select(Some(root));
        assert!(session.delete_selected().unwrap().is_none());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn undo_of_delete_does_not_restore_selection() {
        let mut session = EditorSession::default();
        let id = session.add_primitive(PrimitiveKind::Box).unwrap();
        session.select(Some(id));
        session.delete_selected().unwrap();
        session.undo();
        assert!(session.model().contains(id));
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn selection_degrades_after_undo_of_add() {
        let mut session = EditorSession::default();
        let id = session.add_primitive(PrimitiveKind::Box).unwrap();
        session.select(Some(id));
        session.undo();
        assert_eq!(session.selected(), None);
        session.redo();
        // The id comes back with the snapshot, and so does the selection.
        assert_eq!(session.selected(), Some(id));
    }

    #[test]
    fn shortcuts_dispatch() {
        let mut session = EditorSession::default();
        let id = session.add_assembly().unwrap();
        session.select(Some(id));

        session.handle_shortcut(ShortcutAction::Deselect).unwrap();
        assert_eq!(session.selected(), None);

        session.handle_shortcut(ShortcutAction::TogglePalette).unwrap();
        assert!(session.palette_open());

        session.handle_shortcut(ShortcutAction::Undo).unwrap();
        assert!(!session.model().contains(id));
        session.handle_shortcut(ShortcutAction::Redo).unwrap();
        assert!(session.model().contains(id));

        session.select(Some(id));
        session.handle_shortcut(ShortcutAction::Delete).unwrap();
        assert!(!session.model().contains(id));
    }

    #[test]
    fn palette_actions() {
        let mut session = EditorSession::default();
        session.handle_shortcut(ShortcutAction::TogglePalette).unwrap();
        session.run_palette(PaletteAction::AddAssembly).unwrap();
        assert!(!session.palette_open());

        let entries = session.palette("assembly 1");
        assert_eq!(entries.len(), 1);
        session.run_palette(entries[0].action).unwrap();
        let group = session.selected().unwrap();
        assert!(session.model().is_assembly(group));

        session.run_palette(PaletteAction::AddPrimitive(PrimitiveKind::Pyramid)).unwrap();
        assert_eq!(tree::children(session.model(), group).len(), 1);
    }

    #[test]
    fn adds_beside_selected_primitive() {
        let mut session = EditorSession::default();
        let group = session.add_assembly().unwrap();
        session.select(Some(group));
        let first = session.add_primitive(PrimitiveKind::Box).unwrap();
        session.select(Some(first));

        let second = session.add_assembly().unwrap();
        assert_eq!(tree::find_parent(session.model(), second), Some(group));
        assert_eq!(tree::children(session.model(), group), &[first, second]);
    }

    #[test]
    fn history_depth_comes_from_config() {
        let mut session = EditorSession::new(EditorConfig {
            history_depth: Some(2),
            ..Default::default()
        });
        for _ in 0..4 {
            session.add_assembly().unwrap();
        }
        assert!(session.undo().is_some());
        assert!(session.undo().is_some());
        assert!(session.undo().is_none());
    }
}
