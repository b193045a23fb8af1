//! Pixel and overlay rendering
//!
//! This module contains:
//! - Geometry constants shared by filters and overlays
//! - Brush filters (blur, pixelate) over a region image
//! - Overlay rendering using tiny-skia
//! - Text rasterization using ab_glyph

pub mod filters;
pub mod geometry;
pub mod image;
pub mod text;
