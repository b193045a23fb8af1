//! User settings for pixmark, read from a JSON file in the config directory

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ab_glyph::FontArc;
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::Tool;
use crate::history::DEFAULT_DEPTH;

/// Default brush diameter in pixels
pub const DEFAULT_BRUSH_SIZE: u32 = 30;

/// Stroke/fill color for arrows and text, stored as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::RED
    }
}

impl ShapeColor {
    pub const RED: ShapeColor = ShapeColor { r: 255, g: 0, b: 0 };
    pub const BLACK: ShapeColor = ShapeColor { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to image crate RGBA format (0-255), always opaque
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for ShapeColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("color '{s}' is not in #rrggbb form");
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).with_context(|| format!("bad hex in color '{s}'"))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl TryFrom<String> for ShapeColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShapeColor> for String {
    fn from(color: ShapeColor) -> Self {
        color.to_string()
    }
}

/// Tool settings handed to every editing operation
///
/// The engine never reads shared UI state; callers pass the settings that were
/// current when the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolConfig {
    pub tool: Tool,
    /// Brush diameter in pixels, also the text size
    pub brush_size: u32,
    pub color: ShapeColor,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            brush_size: DEFAULT_BRUSH_SIZE,
            color: ShapeColor::default(),
        }
    }
}

impl ToolConfig {
    pub fn with_tool(self, tool: Tool) -> Self {
        Self { tool, ..self }
    }

    pub fn with_brush_size(self, brush_size: u32) -> Self {
        Self { brush_size, ..self }
    }

    pub fn with_color(self, color: ShapeColor) -> Self {
        Self { color, ..self }
    }
}

/// Where downloaded images are written
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
    Directory(PathBuf),
}

impl SaveLocation {
    /// Resolve to a directory, falling back to folders under the home directory
    pub fn resolve(&self) -> Option<PathBuf> {
        match self {
            SaveLocation::Pictures => {
                dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            }
            SaveLocation::Documents => {
                dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            }
            SaveLocation::Directory(dir) => Some(dir.clone()),
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tool selected when a session starts
    pub tool: Tool,
    /// Brush diameter in pixels
    pub brush_size: u32,
    /// Color for arrows and text
    pub color: ShapeColor,
    /// Maximum number of snapshots kept for undo
    pub history_depth: usize,
    /// TrueType/OpenType font used by the text tool
    pub font_path: Option<PathBuf>,
    /// Where downloads are saved
    pub save_location: SaveLocation,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            brush_size: DEFAULT_BRUSH_SIZE,
            color: ShapeColor::default(),
            history_depth: DEFAULT_DEPTH,
            font_path: None,
            save_location: SaveLocation::default(),
        }
    }
}

impl EditorConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "pixmark";

    /// Default config file location
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Tool settings for the start of a session
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            tool: self.tool,
            brush_size: self.brush_size.max(1),
            color: self.color,
        }
    }

    /// Load the font named by `font_path`
    ///
    /// `None` when no font is configured or it cannot be read; the editor then
    /// uses a system font.
    pub fn load_font(&self) -> Option<FontArc> {
        let path = self.font_path.as_ref()?;
        let font = std::fs::read(path)
            .with_context(|| format!("reading font {}", path.display()))
            .and_then(|bytes| FontArc::try_from_vec(bytes).context("parsing font"));
        match font {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("Configured font unusable, using system font: {:?}", err);
                None
            }
        }
    }
}
