//! Edit surface: the committed image and its frozen pre-stroke copy

use image::RgbaImage;

use crate::domain::Region;
use crate::history::Snapshot;

/// Which of the two surface buffers an access targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Buffer {
    /// What the user sees and exports
    Committed,
    /// Copy frozen at gesture start; brushes read from it, previews restore from it
    PreStroke,
}

/// Owner of the live pixel buffer and the frozen scratch buffer
///
/// Both buffers always have the same dimensions. They are resized only by
/// [`EditSurface::load_image`], [`EditSurface::restore`] and
/// [`EditSurface::clear`].
#[derive(Clone, Debug, Default)]
pub struct EditSurface {
    committed: RgbaImage,
    pre_stroke: RgbaImage,
}

impl EditSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both buffers with a decoded bitmap
    pub fn load_image(&mut self, bitmap: &RgbaImage) {
        self.committed = bitmap.clone();
        self.pre_stroke = RgbaImage::new(bitmap.width(), bitmap.height());
        log::debug!(
            "Edit surface loaded: {}x{} pixels",
            bitmap.width(),
            bitmap.height()
        );
    }

    /// Drop the image, leaving an empty surface
    pub fn clear(&mut self) {
        self.committed = RgbaImage::new(0, 0);
        self.pre_stroke = RgbaImage::new(0, 0);
    }

    pub fn is_loaded(&self) -> bool {
        self.committed.width() > 0 && self.committed.height() > 0
    }

    pub fn width(&self) -> u32 {
        self.committed.width()
    }

    pub fn height(&self) -> u32 {
        self.committed.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.committed.dimensions()
    }

    /// Read-only view of the committed image, e.g. for export
    pub fn committed(&self) -> &RgbaImage {
        &self.committed
    }

    pub(crate) fn committed_mut(&mut self) -> &mut RgbaImage {
        &mut self.committed
    }

    pub fn buffer(&self, buffer: Buffer) -> &RgbaImage {
        match buffer {
            Buffer::Committed => &self.committed,
            Buffer::PreStroke => &self.pre_stroke,
        }
    }

    fn buffer_mut(&mut self, buffer: Buffer) -> &mut RgbaImage {
        match buffer {
            Buffer::Committed => &mut self.committed,
            Buffer::PreStroke => &mut self.pre_stroke,
        }
    }

    /// Copy the committed image into the pre-stroke buffer
    pub fn freeze(&mut self) {
        self.pre_stroke.clone_from(&self.committed);
    }

    /// Put the pre-stroke content back into the committed image
    pub fn restore_pre_stroke(&mut self) {
        self.committed.clone_from(&self.pre_stroke);
    }

    /// Copy the pixels of `region` out of a buffer
    ///
    /// The region is clipped to the surface; `None` if nothing of it is inside.
    pub fn get_region(&self, buffer: Buffer, region: Region) -> Option<RgbaImage> {
        let (width, height) = self.dimensions();
        let Some(region) = region.intersect(Region::full(width, height)) else {
            log::trace!("Region {:?} outside {}x{} surface", region, width, height);
            return None;
        };
        let view = image::imageops::crop_imm(
            self.buffer(buffer),
            region.x,
            region.y,
            region.width,
            region.height,
        );
        Some(view.to_image())
    }

    /// Write `pixels` into a buffer with their top-left corner at the region origin
    ///
    /// Anything falling outside the surface is dropped.
    pub fn put_region(&mut self, buffer: Buffer, region: Region, pixels: &RgbaImage) {
        let target = self.buffer_mut(buffer);
        image::imageops::replace(target, pixels, i64::from(region.x), i64::from(region.y));
    }

    /// Encode the committed image for the history stack
    pub fn snapshot_full_frame(&self) -> anyhow::Result<Snapshot> {
        Snapshot::encode(&self.committed)
    }

    /// Replace the committed image with a snapshot's content
    ///
    /// The pre-stroke buffer follows the snapshot's size so both stay equal.
    pub fn restore(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let image = snapshot.decode()?;
        anyhow::ensure!(
            image.dimensions() == snapshot.dimensions(),
            "snapshot decoded to {:?}, expected {:?}",
            image.dimensions(),
            snapshot.dimensions()
        );
        if image.dimensions() != self.pre_stroke.dimensions() {
            self.pre_stroke = RgbaImage::new(image.width(), image.height());
        }
        self.committed = image;
        Ok(())
    }
}
