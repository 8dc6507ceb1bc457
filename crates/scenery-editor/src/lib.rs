pub mod commands;
pub mod config;
pub mod palette;
pub mod session;
pub mod shortcuts;

pub use commands::{CommandStack, Executed, HistoryState};
pub use config::EditorConfig;
pub use palette::{PaletteAction, PaletteEntry, palette_entries};
pub use session::EditorSession;
pub use shortcuts::{ShortcutAction, ShortcutMap};
