//! Editing session
//!
//! - `editor`: gesture state machine over the edit surface and history
//! - `brush`: blur/pixelate strokes
//! - `prompt`: text prompt collaborator

pub mod brush;
pub mod editor;
pub mod prompt;

pub use brush::{BrushFilter, BrushStroke};
pub use editor::Editor;
pub use prompt::{NoPrompt, ScriptedPrompt, TextPrompt};
