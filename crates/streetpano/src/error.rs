use std::path::PathBuf;

use streetpano_core::ImageError;
use streetpano_projection::ProjectError;
use streetpano_tiles::TileError;
use streetpano_walk::{GraphError, WalkError};

/// Errors produced by the file-level helpers and the CLI.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Buffer(#[from] ImageError),

    #[error(transparent)]
    Tile(#[from] TileError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Walk(#[from] WalkError<GraphError>),

    #[error("crops {first} and {second} would both be written to {file}")]
    DuplicateCropFile {
        file: String,
        first: usize,
        second: usize,
    },

    #[error("no zoom {zoom} tiles found in {}", dir.display())]
    NoTiles { dir: PathBuf, zoom: i32 },
}
