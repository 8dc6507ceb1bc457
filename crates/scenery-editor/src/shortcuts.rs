//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The host UI is
//! responsible for not forwarding keys typed into text fields.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    /// Delete the selected node.
    Delete,
    Deselect,
    /// Open or close the command palette.
    TogglePalette,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        match (key, cmd, shift) {
            ("z" | "Z", true, false) => Some(ShortcutAction::Undo),
            ("z" | "Z", true, true) => Some(ShortcutAction::Redo),
            ("y" | "Y", true, _) => Some(ShortcutAction::Redo),
            ("k" | "K", true, _) => Some(ShortcutAction::TogglePalette),
            ("Delete" | "Backspace", false, _) => Some(ShortcutAction::Delete),
            ("Escape", _, _) => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
