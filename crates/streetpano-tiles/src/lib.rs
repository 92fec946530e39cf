//! Tile grid arithmetic and tile stitching for equirectangular panoramas.
//!
//! A panorama served at zoom `z` is cut into `2^z` columns spanning the full
//! 360° of heading and `max(1, 2^(z-1))` rows spanning 180° of latitude.
//! Column 0 starts at heading 0° (north) and columns advance clockwise.
//!
//! ## Quickstart
//!
//! ```
//! use streetpano_core::RgbImage;
//! use streetpano_tiles::{grid_dimensions, tile_column_for_heading, TileSet};
//!
//! let grid = grid_dimensions(1).unwrap();
//! assert_eq!((grid.columns, grid.rows), (2, 1));
//! assert_eq!(tile_column_for_heading(200.0, 1).unwrap(), 1);
//!
//! let mut tiles = TileSet::new(1).unwrap();
//! tiles.insert(0, 0, RgbImage::filled(4, 4, [255, 0, 0]).unwrap());
//! tiles.insert(1, 0, RgbImage::filled(4, 4, [0, 0, 255]).unwrap());
//! let pano = tiles.stitch().unwrap();
//! assert_eq!((pano.width, pano.height), (8, 4));
//! ```

mod error;
mod geometry;
mod stitch;

pub use error::TileError;
pub use geometry::{
    degrees_per_column, grid_dimensions, tile_column_for_heading, TileGrid, MAX_ZOOM,
};
pub use stitch::{stitch_grid, TileCoord, TileSet};
