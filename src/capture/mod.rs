//! Image ingestion
//!
//! Decodes pasted or dropped image data into the RGBA bitmap the editor loads.

pub mod image;

pub use image::{decode_bytes, load_path};
