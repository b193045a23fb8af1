//! Overlay shapes burned into the raster
//!
//! All annotation types store coordinates in buffer pixel coordinates.

use crate::config::{ShapeColor, ToolConfig};

use super::geometry::Point;
use super::gesture::{Gesture, Tool};

/// Redaction annotation (translucent black rectangle) for hiding sensitive content
///
/// `start` and `end` are the gesture's anchor and release points; `end` may lie
/// above or left of `start`.
#[derive(Clone, Debug, PartialEq)]
pub struct RedactAnnotation {
    pub start: Point,
    pub end: Point,
}

/// Arrow annotation: straight shaft with a filled head at `end`
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowAnnotation {
    pub start: Point,
    pub end: Point,
    pub color: ShapeColor,
}

/// Text annotation with its baseline starting at `origin`
#[derive(Clone, Debug, PartialEq)]
pub struct TextAnnotation {
    pub origin: Point,
    pub text: String,
    /// Font size in pixels
    pub size: f32,
    pub color: ShapeColor,
}

/// Unified annotation type
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Redact(RedactAnnotation),
    Arrow(ArrowAnnotation),
    Text(TextAnnotation),
}

impl Annotation {
    /// Build the shape a rectangle or arrow gesture currently describes
    ///
    /// Returns `None` for tools that do not draw a dragged shape.
    pub fn from_gesture(gesture: &Gesture, config: &ToolConfig) -> Option<Annotation> {
        match gesture.tool {
            Tool::Rectangle => Some(Annotation::Redact(RedactAnnotation {
                start: gesture.start,
                end: gesture.current,
            })),
            Tool::Arrow => Some(Annotation::Arrow(ArrowAnnotation {
                start: gesture.start,
                end: gesture.current,
                color: config.color,
            })),
            Tool::Blur | Tool::Pixelate | Tool::Text => None,
        }
    }

    /// Text typed at a point, sized to the brush diameter
    pub fn text(origin: Point, text: impl Into<String>, config: &ToolConfig) -> Annotation {
        Annotation::Text(TextAnnotation {
            origin,
            text: text.into(),
            size: config.brush_size as f32,
            color: config.color,
        })
    }
}
