//! Replayable editing sessions
//!
//! A session is a JSON document listing pointer and history events, e.g.
//!
//! ```json
//! {
//!   "texts": ["secret"],
//!   "steps": [
//!     { "tool": "rectangle" },
//!     { "down": { "x": 10, "y": 10 } },
//!     { "move": { "x": 80, "y": 40 } },
//!     "up",
//!     "undo"
//!   ]
//! }
//! ```
//!
//! `texts` answers the text tool's prompts in order.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::{ShapeColor, ToolConfig};
use crate::domain::{Point, Tool};
use crate::session::{Editor, ScriptedPrompt};

/// One recorded input event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Tool(Tool),
    BrushSize(u32),
    Color(ShapeColor),
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
    Undo,
    Redo,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub texts: Vec<String>,
    pub steps: Vec<Step>,
}

impl Session {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("parsing session")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading session {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading session {}", path.display()))
    }

    /// Feed every step to `editor`, starting from the `initial` tool settings
    ///
    /// Returns the tool settings in effect after the last step.
    pub fn replay(&self, editor: &mut Editor, initial: ToolConfig) -> anyhow::Result<ToolConfig> {
        let mut config = initial;
        let mut prompt = ScriptedPrompt::new(self.texts.iter().cloned());

        for (index, step) in self.steps.iter().enumerate() {
            log::trace!("Step {}: {:?}", index, step);
            match *step {
                Step::Tool(tool) => config.tool = tool,
                Step::BrushSize(size) => config.brush_size = size.max(1),
                Step::Color(color) => config.color = color,
                Step::Down { x, y } => editor
                    .pointer_down(Point::new(x, y), &config, &mut prompt)
                    .with_context(|| format!("step {}", index))?,
                Step::Move { x, y } => editor.pointer_move(Point::new(x, y)),
                Step::Up => editor
                    .pointer_up()
                    .with_context(|| format!("step {}", index))?,
                Step::Leave => editor
                    .pointer_leave()
                    .with_context(|| format!("step {}", index))?,
                Step::Undo => {
                    editor.undo();
                }
                Step::Redo => {
                    editor.redo();
                }
            }
        }

        if editor.is_drawing() {
            log::warn!("Session ended mid-gesture, committing it");
            editor.pointer_up()?;
        }
        if prompt.remaining() > 0 {
            log::warn!("{} text answers were not used", prompt.remaining());
        }
        Ok(config)
    }
}
