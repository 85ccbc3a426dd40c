//! Procedural hourglass drawing
//!
//! `geometry` lays the glass and sand out from the widget size and minute
//! progress, `clip` holds the polygon helpers it needs, and `paint` turns
//! the result into rotated egui shapes.

pub mod clip;
pub mod geometry;
pub mod paint;

pub use paint::paint_hourglass;
