use serde::{Deserialize, Serialize};
use streetpano_core::normalize_heading;

use crate::TileError;

/// Highest zoom whose column count still fits in a `u32`.
pub const MAX_ZOOM: u32 = 30;

/// Column/row counts of a panorama tile grid at one zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGrid {
    pub columns: u32,
    pub rows: u32,
}

impl TileGrid {
    /// Grid for the given zoom level. See [`grid_dimensions`].
    pub fn for_zoom(zoom: i32) -> Result<Self, TileError> {
        let z = checked_zoom(zoom)?;
        Ok(Self {
            columns: 1u32 << z,
            rows: if z == 0 { 1 } else { 1u32 << (z - 1) },
        })
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.columns && y < self.rows
    }

    /// Size in pixels of the stitched image for square tiles of `tile_edge`.
    pub fn pixel_size(&self, tile_edge: usize) -> Option<(usize, usize)> {
        let w = (self.columns as usize).checked_mul(tile_edge)?;
        let h = (self.rows as usize).checked_mul(tile_edge)?;
        Some((w, h))
    }
}

fn checked_zoom(zoom: i32) -> Result<u32, TileError> {
    match u32::try_from(zoom) {
        Ok(z) if z <= MAX_ZOOM => Ok(z),
        _ => Err(TileError::InvalidZoom {
            zoom,
            max: MAX_ZOOM,
        }),
    }
}

/// `(columns, rows)` of the tile grid at `zoom`: `2^zoom` columns and
/// `max(1, 2^(zoom-1))` rows, so a tile covers the same angle in both axes.
pub fn grid_dimensions(zoom: i32) -> Result<TileGrid, TileError> {
    TileGrid::for_zoom(zoom)
}

/// Angular width of one tile column at `zoom`.
pub fn degrees_per_column(zoom: i32) -> Result<f64, TileError> {
    let grid = TileGrid::for_zoom(zoom)?;
    Ok(360.0 / grid.columns as f64)
}

/// Tile column that contains compass `heading_deg` at `zoom`.
///
/// The heading is wrapped into `[0, 360)` first, so any finite value is
/// accepted. A NaN heading maps to column 0.
pub fn tile_column_for_heading(heading_deg: f64, zoom: i32) -> Result<u32, TileError> {
    let grid = TileGrid::for_zoom(zoom)?;
    let sector = 360.0 / grid.columns as f64;
    let heading = normalize_heading(heading_deg);
    // float-to-int `as` saturates and maps NaN to 0
    let column = (heading / sector).floor() as u32;
    Ok(column % grid.columns)
}
