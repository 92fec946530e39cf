use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Rotation3, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use streetpano_core::{normalize_heading, RgbImage, RgbImageView, CHANNELS};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{CropPlan, ProjectError, MAX_FOV_DEG, MIN_FOV_DEG};

/// Sources narrower than this `width / height` are probably not full
/// 360°×180° panoramas. They are still projected, with a warning.
pub const MIN_EQUIRECT_ASPECT: f64 = 1.5;

/// Viewing direction and output size of one perspective crop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRequest {
    /// Compass heading, any finite value; wrapped into `[0, 360)`.
    pub heading_deg: f64,
    /// Elevation above the horizon; positive looks up.
    pub pitch_deg: f64,
    /// Horizontal (and vertical) field of view.
    pub fov_deg: f64,
    /// Edge of the square output, in pixels.
    pub out_size: usize,
}

impl CropRequest {
    pub fn new(heading_deg: f64, pitch_deg: f64, fov_deg: f64, out_size: usize) -> Self {
        Self {
            heading_deg,
            pitch_deg,
            fov_deg,
            out_size,
        }
    }

    fn validate(&self) -> Result<(), ProjectError> {
        if !self.heading_deg.is_finite() {
            return Err(ProjectError::NonFiniteAngle {
                name: "heading",
                value: self.heading_deg,
            });
        }
        if !self.pitch_deg.is_finite() {
            return Err(ProjectError::NonFiniteAngle {
                name: "pitch",
                value: self.pitch_deg,
            });
        }
        if !(MIN_FOV_DEG..=MAX_FOV_DEG).contains(&self.fov_deg) {
            return Err(ProjectError::InvalidFieldOfView {
                fov: self.fov_deg,
                min: MIN_FOV_DEG,
                max: MAX_FOV_DEG,
            });
        }
        if self.out_size == 0 {
            return Err(ProjectError::InvalidOutputSize);
        }
        Ok(())
    }
}

/// A square rectilinear view cut out of a panorama.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCrop {
    pub image: RgbImage,
    /// Heading actually used, wrapped into `[0, 360)`.
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub fov_deg: f64,
}

impl PerspectiveCrop {
    /// Short pitch label: `p00` at the horizon, `up20` above, `dn20` below.
    ///
    /// Degrees are truncated toward zero, so `-0.5` becomes `dn00`.
    pub fn pitch_tag(&self) -> String {
        let deg = self.pitch_deg.abs().trunc() as u32;
        if self.pitch_deg < 0.0 {
            format!("dn{deg:02}")
        } else if self.pitch_deg > 0.0 {
            format!("up{deg:02}")
        } else {
            "p00".to_string()
        }
    }
}

fn check_source(src: &RgbImageView<'_>) -> Result<(), ProjectError> {
    RgbImageView::new(src.width, src.height, src.data)?;
    let aspect = src.width as f64 / src.height as f64;
    if aspect < MIN_EQUIRECT_ASPECT {
        log::warn!(
            "source is {}x{} (aspect {:.2}:1), expected ~2:1 for an equirectangular panorama",
            src.width,
            src.height,
            aspect
        );
    }
    Ok(())
}

/// Extract one perspective crop from an equirectangular panorama.
///
/// Fails before allocating any output if the request or source is invalid.
/// Identical inputs always produce identical pixels.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(src),
        fields(width = src.width, height = src.height)
    )
)]
pub fn project(
    src: &RgbImageView<'_>,
    request: &CropRequest,
) -> Result<PerspectiveCrop, ProjectError> {
    request.validate()?;
    check_source(src)?;
    render(src, request)
}

/// Project several independent crops of the same panorama in parallel.
///
/// All requests are validated up front; on error no crop is returned.
/// Output order matches `requests`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(src, requests),
        fields(width = src.width, height = src.height, crops = requests.len())
    )
)]
pub fn project_many(
    src: &RgbImageView<'_>,
    requests: &[CropRequest],
) -> Result<Vec<PerspectiveCrop>, ProjectError> {
    for request in requests {
        request.validate()?;
    }
    check_source(src)?;

    let crops = requests
        .par_iter()
        .map(|request| render(src, request))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "projected {} crops from a {}x{} panorama",
        crops.len(),
        src.width,
        src.height
    );
    Ok(crops)
}

/// Run every request of `plan` against one panorama.
pub fn project_plan(
    src: &RgbImageView<'_>,
    plan: &CropPlan,
) -> Result<Vec<PerspectiveCrop>, ProjectError> {
    project_many(src, &plan.requests())
}

fn render(src: &RgbImageView<'_>, request: &CropRequest) -> Result<PerspectiveCrop, ProjectError> {
    let size = request.out_size;
    let heading_deg = normalize_heading(request.heading_deg);

    let half = size as f64 / 2.0;
    let focal = half / (request.fov_deg.to_radians() / 2.0).tan();

    // y points down, so a positive rotation about x swings the optical axis up.
    let tilt = Rotation3::from_axis_angle(&Vector3::x_axis(), request.pitch_deg.to_radians());
    let turn = Rotation3::from_axis_angle(&Vector3::y_axis(), heading_deg.to_radians());
    let rotation = turn * tilt;

    let src_w = src.width as f64;
    let src_h = src.height as f64;
    let max_x = src_w - 1.0;
    let max_y = src_h - 1.0;

    let mut out = RgbImage::filled(size, size, [0; CHANNELS])?;
    let stride = size * CHANNELS;

    out.data
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(row, out_row)| {
            let v = row as f64 - half;
            for (col, px) in out_row.chunks_exact_mut(CHANNELS).enumerate() {
                let u = col as f64 - half;
                let ray = rotation * Vector3::new(u, v, focal).normalize();

                let lon = ray.x.atan2(ray.z);
                let lat = ray.y.clamp(-1.0, 1.0).asin();

                let sx = ((lon / PI + 1.0) / 2.0 * src_w).clamp(0.0, max_x).round() as usize;
                let sy = ((lat / FRAC_PI_2 + 1.0) / 2.0 * src_h)
                    .clamp(0.0, max_y)
                    .round() as usize;

                px.copy_from_slice(&src.pixel(sx, sy));
            }
        });

    Ok(PerspectiveCrop {
        image: out,
        heading_deg,
        pitch_deg: request.pitch_deg,
        fov_deg: request.fov_deg,
    })
}
