//! Perspective crops from equirectangular panoramas.
//!
//! ## Quickstart
//!
//! ```
//! use streetpano_core::RgbImage;
//! use streetpano_projection::{project, CropRequest};
//!
//! let pano = RgbImage::filled(64, 32, [90, 120, 200]).unwrap();
//! let crop = project(&pano.view(), &CropRequest::new(45.0, 10.0, 90.0, 16)).unwrap();
//! assert_eq!((crop.image.width, crop.image.height), (16, 16));
//! assert_eq!(crop.image.pixel(8, 8), [90, 120, 200]);
//! ```
//!
//! Algorithm (inverse mapping, one independent ray per output pixel):
//! 1. Focal length `f = (size / 2) / tan(fov / 2)` in output pixels.
//! 2. Camera ray `(u, v, f)` for the pixel offset `(u, v)` from the image
//!    centre, in an x=right, y=down, z=forward frame, normalized.
//! 3. Tilt by pitch about x (positive looks up), then turn by heading about
//!    y (positive looks right / clockwise from above).
//!    Scripts that rotate by `-pitch` in this y-down frame look down for
//!    positive pitch; negate their pitch when comparing output.
//! 4. Longitude `atan2(x, z)`, latitude `asin(y)`.
//! 5. Nearest source pixel on the equirectangular grid, clamped to its bounds.
//!
//! Rows of one crop and distinct crops are computed in parallel with `rayon`;
//! the output does not depend on scheduling.

mod error;
mod params;
mod plan;
mod projector;

pub use error::ProjectError;
pub use params::{CropParams, MAX_FOV_DEG, MIN_FOV_DEG};
pub use plan::{
    cardinal_headings, evenly_spaced_headings, overlap_percent, overlapping_headings, CropPlan,
};
pub use projector::{
    project, project_many, project_plan, CropRequest, PerspectiveCrop, MIN_EQUIRECT_ASPECT,
};
