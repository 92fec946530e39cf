use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use streetpano_core::{ImageError, RgbImage, CHANNELS};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{TileError, TileGrid};

/// Column/row address of a tile inside its zoom level's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

/// Decoded tiles of one panorama at one zoom level.
#[derive(Clone, Debug)]
pub struct TileSet {
    zoom: i32,
    grid: TileGrid,
    tiles: HashMap<TileCoord, RgbImage>,
}

impl TileSet {
    pub fn new(zoom: i32) -> Result<Self, TileError> {
        Ok(Self {
            zoom,
            grid: TileGrid::for_zoom(zoom)?,
            tiles: HashMap::new(),
        })
    }

    #[inline]
    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    #[inline]
    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    /// Add (or replace) the tile at `(x, y)`, returning the previous one.
    pub fn insert(&mut self, x: u32, y: u32, tile: RgbImage) -> Option<RgbImage> {
        self.tiles.insert(TileCoord { x, y }, tile)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&RgbImage> {
        self.tiles.get(&TileCoord { x, y })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// `true` once every cell of the zoom grid has a tile.
    pub fn is_complete(&self) -> bool {
        (0..self.grid.rows)
            .all(|y| (0..self.grid.columns).all(|x| self.tiles.contains_key(&TileCoord { x, y })))
    }

    /// Stitch the full grid of this zoom level into one equirectangular image.
    pub fn stitch(&self) -> Result<RgbImage, TileError> {
        stitch_grid(&self.tiles, self.grid)
    }
}

/// Assemble a `columns × rows` grid of square tiles into one image.
///
/// Tile `(x, y)` lands at pixel origin `(x * edge, y * edge)`, where `edge` is
/// the size of tile `(0, 0)`. Every grid cell must be present with exactly
/// that size; nothing is padded, resized or cropped.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(tiles), fields(columns = grid.columns, rows = grid.rows))
)]
pub fn stitch_grid(
    tiles: &HashMap<TileCoord, RgbImage>,
    grid: TileGrid,
) -> Result<RgbImage, TileError> {
    if let Some(outside) = tiles
        .keys()
        .filter(|c| !grid.contains(c.x, c.y))
        .min_by_key(|c| (c.y, c.x))
    {
        return Err(TileError::TileOutsideGrid {
            x: outside.x,
            y: outside.y,
            columns: grid.columns,
            rows: grid.rows,
        });
    }

    let first = tiles
        .get(&TileCoord { x: 0, y: 0 })
        .ok_or(TileError::IncompleteTileSet { x: 0, y: 0 })?;
    let edge = first.width;

    // Validate the whole grid before allocating the output.
    let mut ordered = Vec::with_capacity(grid.tile_count());
    for y in 0..grid.rows {
        for x in 0..grid.columns {
            let tile = tiles
                .get(&TileCoord { x, y })
                .ok_or(TileError::IncompleteTileSet { x, y })?;
            if tile.width != edge
                || tile.height != edge
                || tile.data.len() != tile.width * tile.height * CHANNELS
            {
                return Err(TileError::TileSizeMismatch {
                    x,
                    y,
                    expected: edge,
                    width: tile.width,
                    height: tile.height,
                });
            }
            ordered.push(tile);
        }
    }

    let (out_w, out_h) = grid.pixel_size(edge).ok_or(ImageError::TooLarge {
        width: edge,
        height: edge,
    })?;
    let mut out = RgbImage::filled(out_w, out_h, [0; CHANNELS])?;

    let out_stride = out_w * CHANNELS;
    let tile_stride = edge * CHANNELS;
    for (idx, tile) in ordered.iter().enumerate() {
        let tx = idx % grid.columns as usize;
        let ty = idx / grid.columns as usize;
        let origin_x = tx * tile_stride;
        let origin_y = ty * edge;
        let view = tile.view();
        for row in 0..edge {
            let start = (origin_y + row) * out_stride + origin_x;
            out.data[start..start + tile_stride].copy_from_slice(view.row(row));
        }
    }

    log::debug!(
        "stitched {}x{} tiles of {}px into {}x{}",
        grid.columns,
        grid.rows,
        edge,
        out_w,
        out_h
    );

    Ok(out)
}
