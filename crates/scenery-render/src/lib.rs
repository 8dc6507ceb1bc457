pub mod material;
pub mod scene;

pub use material::{EdgeStyle, Material};
pub use scene::{ElementContent, RenderElement, SceneSync, SyncStats};
