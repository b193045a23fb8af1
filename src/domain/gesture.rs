//! Tools and in-progress pointer gestures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Editing tool applied by a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Blur,
    Pixelate,
    Rectangle,
    Arrow,
    Text,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Blur,
        Tool::Pixelate,
        Tool::Rectangle,
        Tool::Arrow,
        Tool::Text,
    ];

    /// Name used in config files and session scripts
    pub fn name(self) -> &'static str {
        match self {
            Tool::Blur => "blur",
            Tool::Pixelate => "pixelate",
            Tool::Rectangle => "rectangle",
            Tool::Arrow => "arrow",
            Tool::Text => "text",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == lower)
            .ok_or_else(|| anyhow::anyhow!("unknown tool '{s}'"))
    }
}

/// One pointer-down → move → up interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub tool: Tool,
    pub start: Point,
    pub current: Point,
}

impl Gesture {
    /// Start a gesture at the pointer-down position
    pub fn begin(tool: Tool, at: Point) -> Self {
        Self {
            tool,
            start: at,
            current: at,
        }
    }

    /// Track the latest pointer position
    pub fn move_to(&mut self, at: Point) {
        self.current = at;
    }
}
