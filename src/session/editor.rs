//! Editing session: routes pointer gestures to brushes and overlays and keeps history
//!
//! Gesture protocol:
//! - brush and shape pointer-down freezes the committed image into the pre-stroke buffer
//! - brush tools dab on down and on every move
//! - shape tools redraw a preview over the restored pre-stroke content on every move
//! - pointer-up (or leaving the canvas) burns the shape in once and commits a snapshot
//! - the text tool prompts on pointer-down and commits immediately, no drag

use ab_glyph::FontArc;
use image::RgbaImage;

use super::brush::{BrushFilter, BrushStroke};
use super::prompt::TextPrompt;
use crate::config::ToolConfig;
use crate::domain::{Annotation, Gesture, Point, Tool};
use crate::history::{DEFAULT_DEPTH, HistoryManager, HistoryState};
use crate::render;
use crate::surface::EditSurface;

/// A gesture plus the settings captured when it started
#[derive(Debug)]
struct ActiveGesture {
    gesture: Gesture,
    config: ToolConfig,
    brush: Option<BrushStroke>,
}

/// The editing engine: surface, history and the gesture in progress
pub struct Editor {
    surface: EditSurface,
    history: HistoryManager,
    active: Option<ActiveGesture>,
    font: Option<FontArc>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("dimensions", &self.surface.dimensions())
            .field("undo", &self.history.undo_len())
            .field("redo", &self.history.redo_len())
            .field("active", &self.active)
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl Editor {
    /// Create an editor keeping at most `history_depth` undo snapshots
    pub fn new(history_depth: usize) -> Self {
        Self {
            surface: EditSurface::new(),
            history: HistoryManager::new(history_depth),
            active: None,
            font: None,
        }
    }

    /// Use `font` for the text tool instead of a system font
    pub fn with_font(mut self, font: Option<FontArc>) -> Self {
        self.font = font;
        self
    }

    pub fn surface(&self) -> &EditSurface {
        &self.surface
    }

    /// The committed image, as shown and exported
    pub fn image(&self) -> &RgbaImage {
        self.surface.committed()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    /// True while a pointer gesture is in progress
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// The gesture in progress, if any
    pub fn gesture(&self) -> Option<&Gesture> {
        self.active.as_ref().map(|active| &active.gesture)
    }

    /// Start a new session on a decoded bitmap
    ///
    /// History restarts with the loaded state as its only entry.
    pub fn load_image(&mut self, bitmap: &RgbaImage) -> anyhow::Result<()> {
        self.active = None;
        self.surface.load_image(bitmap);
        self.history.clear();
        self.commit()?;
        log::info!("Loaded {}x{} image", bitmap.width(), bitmap.height());
        Ok(())
    }

    /// Drop the image and all history
    pub fn reset(&mut self) {
        self.active = None;
        self.surface.clear();
        self.history.clear();
        log::debug!("Editor reset");
    }

    /// Pointer pressed at `at` with the current tool settings
    pub fn pointer_down(
        &mut self,
        at: Point,
        config: &ToolConfig,
        prompt: &mut dyn TextPrompt,
    ) -> anyhow::Result<()> {
        if !self.surface.is_loaded() {
            log::debug!("Ignoring pointer-down without an image");
            return Ok(());
        }
        if self.active.is_some() {
            log::trace!("Ignoring pointer-down during an active gesture");
            return Ok(());
        }

        let gesture = Gesture::begin(config.tool, at);
        log::debug!("Gesture start: {} at ({}, {})", config.tool, at.x, at.y);

        match config.tool {
            Tool::Blur | Tool::Pixelate => {
                let Some(filter) = BrushFilter::for_tool(config.tool) else {
                    return Ok(());
                };
                let mut brush = BrushStroke::begin(&mut self.surface, filter, config.brush_size);
                brush.dab(&mut self.surface, at);
                self.active = Some(ActiveGesture {
                    gesture,
                    config: *config,
                    brush: Some(brush),
                });
            }
            Tool::Rectangle | Tool::Arrow => {
                self.surface.freeze();
                self.active = Some(ActiveGesture {
                    gesture,
                    config: *config,
                    brush: None,
                });
            }
            Tool::Text => self.place_text(at, config, prompt)?,
        }
        Ok(())
    }

    /// Pointer moved; ignored when no gesture is active
    pub fn pointer_move(&mut self, at: Point) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.gesture.move_to(at);

        if let Some(brush) = active.brush.as_mut() {
            brush.dab(&mut self.surface, at);
            return;
        }

        if let Some(shape) = Annotation::from_gesture(&active.gesture, &active.config) {
            self.surface.restore_pre_stroke();
            render::image::draw_annotation(self.surface.committed_mut(), &shape, None);
        }
    }

    /// Pointer released: finish the gesture and commit it
    pub fn pointer_up(&mut self) -> anyhow::Result<()> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };

        if let Some(shape) = Annotation::from_gesture(&active.gesture, &active.config) {
            self.surface.restore_pre_stroke();
            render::image::draw_annotation(self.surface.committed_mut(), &shape, None);
        }
        if let Some(brush) = &active.brush {
            log::debug!("Brush stroke finished after {} dabs", brush.dabs());
        }
        log::debug!("Gesture end: {}", active.gesture.tool);
        self.commit()
    }

    /// Pointer left the canvas; commits exactly like a release
    pub fn pointer_leave(&mut self) -> anyhow::Result<()> {
        self.pointer_up()
    }

    /// Go back one committed state; returns false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        if self.active.is_some() {
            log::trace!("Ignoring undo during an active gesture");
            return false;
        }
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        if let Err(err) = self.surface.restore(snapshot) {
            log::error!("Failed to restore snapshot on undo: {:?}", err);
            return false;
        }
        log::debug!("Undo, {} states left", self.history.undo_len());
        true
    }

    /// Re-apply the last undone state; returns false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        if self.active.is_some() {
            log::trace!("Ignoring redo during an active gesture");
            return false;
        }
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        if let Err(err) = self.surface.restore(snapshot) {
            log::error!("Failed to restore snapshot on redo: {:?}", err);
            return false;
        }
        log::debug!("Redo, {} states left to redo", self.history.redo_len());
        true
    }

    fn place_text(
        &mut self,
        at: Point,
        config: &ToolConfig,
        prompt: &mut dyn TextPrompt,
    ) -> anyhow::Result<()> {
        let text = match prompt.request_text(at) {
            Some(text) if !text.is_empty() => text,
            _ => {
                log::debug!("Text prompt cancelled");
                return Ok(());
            }
        };

        if self.font.is_none() {
            self.font = render::text::system_font();
        }
        let annotation = Annotation::text(at, text, config);
        let drawn = render::image::draw_annotation(
            self.surface.committed_mut(),
            &annotation,
            self.font.as_ref(),
        );
        if !drawn {
            log::debug!("Text produced no glyphs, committing unchanged image");
        }
        self.commit()
    }

    fn commit(&mut self) -> anyhow::Result<()> {
        let snapshot = self.surface.snapshot_full_frame()?;
        self.history.commit(snapshot);
        Ok(())
    }
}
