//! Snapshot-based undo/redo
//!
//! Every finished gesture stores a PNG-encoded copy of the whole committed
//! surface. Undo and redo move snapshots between two stacks and hand back the
//! frame the surface should show; restoring it is the caller's job.

use std::collections::VecDeque;
use std::io;

use anyhow::Context;
use image::{ImageFormat, RgbaImage};

/// Default number of snapshots kept for undo
pub const DEFAULT_DEPTH: usize = 50;

/// Encoded full-frame copy of the committed surface
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.png.len())
            .finish()
    }
}

impl Snapshot {
    /// Encode an image as a lossless snapshot
    pub fn encode(image: &RgbaImage) -> anyhow::Result<Self> {
        let mut png = Vec::new();
        write_png(&mut png, image).context("encoding snapshot")?;
        Ok(Self {
            png,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Decode the snapshot back into pixels
    pub fn decode(&self) -> anyhow::Result<RgbaImage> {
        let image = image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .context("decoding snapshot")?
            .into_rgba8();
        Ok(image)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Write 8-bit RGBA PNG data
pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Undo/redo availability, for enabling toolbar buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Bounded undo stack plus redo stack of full-frame snapshots
///
/// The bottom of the undo stack is the state the image was loaded in; undo
/// never pops it. The top of the undo stack always matches the committed
/// surface after a commit, undo or redo.
#[derive(Debug)]
pub struct HistoryManager {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl HistoryManager {
    /// Create an empty history keeping at most `max_depth` undo snapshots
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record a new state, evicting the oldest when full and dropping redo history
    pub fn commit(&mut self, snapshot: Snapshot) {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.pop_front();
            log::debug!("History full ({}), evicted oldest snapshot", self.max_depth);
        }
        self.undo_stack.push_back(snapshot);
        if !self.redo_stack.is_empty() {
            log::debug!("Dropping {} redo snapshots", self.redo_stack.len());
            self.redo_stack.clear();
        }
        log::trace!("Committed snapshot, undo depth {}", self.undo_stack.len());
    }

    /// Step back one state
    ///
    /// Returns the snapshot the surface should now show, or `None` when only the
    /// initial state is left.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo_stack.len() <= 1 {
            log::trace!("Nothing to undo");
            return None;
        }
        let current = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        self.undo_stack.back()
    }

    /// Re-apply the most recently undone state
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let Some(snapshot) = self.redo_stack.pop() else {
            log::trace!("Nothing to redo");
            return None;
        };
        self.undo_stack.push_back(snapshot);
        self.undo_stack.back()
    }

    /// Snapshot matching the current committed surface
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Returns true if a state before the current one exists
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Returns true if there are undone states to re-apply
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Forget all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
