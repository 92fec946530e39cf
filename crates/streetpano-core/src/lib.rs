//! Core types and utilities for street-level panorama processing.
//!
//! This crate is intentionally small. It owns the RGB pixel buffer types that
//! flow between the tile stitcher and the projector, plus the compass-angle
//! helpers shared by every stage. It does *not* decode or encode any image
//! format.

mod angle;
mod image;
mod logger;

pub use angle::normalize_heading;
pub use image::{ImageError, RgbImage, RgbImageView, CHANNELS};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{default_directives, init_with_level, level_for_verbosity, stage_for_target};
