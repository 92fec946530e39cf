use streetpano_core::ImageError;

/// Errors returned by tile geometry and stitching.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TileError {
    #[error("invalid zoom level {zoom} (expected 0..={max})")]
    InvalidZoom { zoom: i32, max: u32 },
    #[error("tile set is incomplete: missing tile ({x}, {y})")]
    IncompleteTileSet { x: u32, y: u32 },
    #[error("tile ({x}, {y}) is {width}x{height}, expected a {expected}x{expected} square")]
    TileSizeMismatch {
        x: u32,
        y: u32,
        expected: usize,
        width: usize,
        height: usize,
    },
    #[error("tile ({x}, {y}) lies outside the {columns}x{rows} grid")]
    TileOutsideGrid {
        x: u32,
        y: u32,
        columns: u32,
        rows: u32,
    },
    #[error(transparent)]
    Image(#[from] ImageError),
}
