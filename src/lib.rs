//! Raster image annotation engine
//!
//! Brush filters (blur, pixelate), burned-in overlays (redaction rectangles,
//! arrows, text) and snapshot-based undo/redo over a single RGBA surface.

pub mod capture;
pub mod config;
pub mod domain;
pub mod export;
pub mod history;
pub mod render;
pub mod script;
pub mod session;
pub mod surface;

pub use config::{EditorConfig, SaveLocation, ShapeColor, ToolConfig};
pub use domain::{Annotation, Gesture, Point, Region, Tool};
pub use history::{HistoryManager, HistoryState, Snapshot};
pub use session::{Editor, NoPrompt, ScriptedPrompt, TextPrompt};
pub use surface::{Buffer, EditSurface};
