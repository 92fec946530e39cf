//! File-level helpers built on the `image` crate.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use streetpano_core::{ImageError, RgbImage, RgbImageView};
use streetpano_projection::{project_plan, CropPlan, PerspectiveCrop};
use streetpano_tiles::TileSet;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::io::{write_json, CropReport, CROP_REPORT_FILE};
use crate::PipelineError;

/// Borrow an `image::RgbImage` as the lightweight `streetpano-core` view type.
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Take ownership of an `image::RgbImage` buffer.
pub fn from_image(img: ::image::RgbImage) -> Result<RgbImage, ImageError> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    RgbImage::from_raw(width, height, img.into_raw())
}

/// Copy a `streetpano-core` image into an `image::RgbImage` for encoding.
pub fn to_image(img: &RgbImage) -> Result<::image::RgbImage, ImageError> {
    let too_large = || ImageError::TooLarge {
        width: img.width,
        height: img.height,
    };
    let width = u32::try_from(img.width).map_err(|_| too_large())?;
    let height = u32::try_from(img.height).map_err(|_| too_large())?;
    ::image::RgbImage::from_raw(width, height, img.data.clone()).ok_or(ImageError::BufferSize {
        expected: img.width * img.height * streetpano_core::CHANNELS,
        got: img.data.len(),
    })
}

/// Decode any supported image file into RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, PipelineError> {
    let decoded = ::image::open(path)?.to_rgb8();
    Ok(from_image(decoded)?)
}

/// Encode `img` with the format implied by the file extension.
pub fn save_rgb(img: &RgbImage, path: impl AsRef<Path>) -> Result<(), PipelineError> {
    to_image(img)?.save(path)?;
    Ok(())
}

/// Parse `z{zoom}_x{x}_y{y}.{png,jpg,jpeg}` into `(zoom, x, y)`.
pub fn parse_tile_name(name: &str) -> Option<(i32, u32, u32)> {
    let (stem, ext) = name.rsplit_once('.')?;
    if !matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg") {
        return None;
    }
    let mut parts = stem.split('_');
    let zoom = parts.next()?.strip_prefix('z')?.parse().ok()?;
    let x = parts.next()?.strip_prefix('x')?.parse().ok()?;
    let y = parts.next()?.strip_prefix('y')?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((zoom, x, y))
}

/// Path of tile `(x, y)` at `zoom` under `dir`, in the layout [`load_tile_dir`] reads.
pub fn tile_path(dir: impl AsRef<Path>, zoom: i32, x: u32, y: u32) -> PathBuf {
    dir.as_ref().join(format!("z{zoom}_x{x}_y{y}.png"))
}

/// Decode every tile of `zoom` found in `dir`. Other files are ignored.
pub fn load_tile_dir(dir: impl AsRef<Path>, zoom: i32) -> Result<TileSet, PipelineError> {
    let dir = dir.as_ref();
    let mut tiles = TileSet::new(zoom)?;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match parse_tile_name(name) {
            Some((z, x, y)) if z == zoom => {
                if tiles.insert(x, y, load_rgb(&path)?).is_some() {
                    log::warn!("tile ({x}, {y}) found twice, keeping {}", path.display());
                }
            }
            _ => log::debug!("skipping {}", path.display()),
        }
    }
    if tiles.is_empty() {
        return Err(PipelineError::NoTiles {
            dir: dir.to_path_buf(),
            zoom,
        });
    }
    log::debug!("loaded {} tiles for zoom {zoom} from {}", tiles.len(), dir.display());
    Ok(tiles)
}

/// Load and stitch the zoom-`zoom` tiles of one panorama.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(dir)))]
pub fn stitch_dir(dir: impl AsRef<Path>, zoom: i32) -> Result<RgbImage, PipelineError> {
    Ok(load_tile_dir(dir, zoom)?.stitch()?)
}

/// Cut every crop of `plan` from `pano` and write them plus a report into `out_dir`.
///
/// Fails before writing anything if two crops map to the same file name, which
/// happens when pitches or headings differ by less than a whole degree.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(pano, plan, out_dir),
        fields(width = pano.width, height = pano.height, crops = plan.len())
    )
)]
pub fn write_crops(
    source: &str,
    pano: &RgbImage,
    plan: &CropPlan,
    out_dir: impl AsRef<Path>,
) -> Result<CropReport, PipelineError> {
    let out_dir = out_dir.as_ref();
    let crops: Vec<PerspectiveCrop> = project_plan(&pano.view(), plan)?;

    let mut report = CropReport::new(source, [pano.width, pano.height], plan);
    let mut by_file: HashMap<String, usize> = HashMap::new();
    for crop in &crops {
        let record = report.push(crop);
        if let Some(&first) = by_file.get(&record.file) {
            return Err(PipelineError::DuplicateCropFile {
                file: record.file.clone(),
                first,
                second: record.index,
            });
        }
        by_file.insert(record.file.clone(), record.index);
    }

    fs::create_dir_all(out_dir)?;
    for (crop, record) in crops.iter().zip(&report.crops) {
        save_rgb(&crop.image, out_dir.join(&record.file))?;
        log::info!(
            "[{}/{}] heading={:5.1} pitch={:+5.1} -> {}",
            record.index + 1,
            crops.len(),
            record.heading_deg,
            record.pitch_deg,
            record.file
        );
    }
    write_json(&report, out_dir.join(CROP_REPORT_FILE))?;
    Ok(report)
}
