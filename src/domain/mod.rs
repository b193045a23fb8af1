//! Pure domain types with minimal dependencies
//!
//! Types here carry no rendering or IO concerns so that every layer of the
//! editor can share them.

pub mod annotation;
pub mod geometry;
pub mod gesture;

pub use annotation::*;
pub use geometry::*;
pub use gesture::*;
