//! High-level facade crate for the `streetpano-*` workspace.
//!
//! This crate provides:
//! - re-exports of the engine crates
//! - JSON config and report helpers (`io`)
//! - (feature-gated) file-level helpers that decode tiles and panoramas with
//!   the `image` crate, run the engines and write the results back out
//!
//! ## Quickstart
//!
//! ```no_run
//! use streetpano::pipeline;
//! use streetpano::projection::CropParams;
//!
//! # fn main() -> Result<(), streetpano::PipelineError> {
//! let pano = pipeline::stitch_dir("tiles/", 3)?;
//! let plan = CropParams::default().plan()?;
//! let crops = streetpano::projection::project_plan(&pano.view(), &plan)?;
//! println!("{} crops", crops.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `streetpano::core`: RGB buffers, heading normalization, logger setup.
//! - `streetpano::tiles`: tile grid geometry and stitching.
//! - `streetpano::projection`: equirectangular to perspective crops and crop plans.
//! - `streetpano::walk`: pano metadata, in-memory graphs and the street walker.
//! - `streetpano::io`: JSON load/write and the crop/walk reports.
//! - `streetpano::pipeline` (feature `image`): file-level stitching and cropping.

mod error;
pub mod io;
#[cfg(feature = "image")]
pub mod pipeline;

pub use streetpano_core as core;
pub use streetpano_projection as projection;
pub use streetpano_tiles as tiles;
pub use streetpano_walk as walk;

pub use error::PipelineError;
pub use streetpano_core::{RgbImage, RgbImageView};
pub use streetpano_projection::{CropParams, CropPlan, CropRequest, PerspectiveCrop};
pub use streetpano_walk::{PanoGraph, PanoNode, StreetWalker, Walk};
