use serde::{Deserialize, Serialize};

use crate::{CropPlan, ProjectError};

/// Narrowest accepted field of view.
pub const MIN_FOV_DEG: f64 = 1.0;
/// Widest accepted field of view; wider views drive the focal length to zero.
pub const MAX_FOV_DEG: f64 = 170.0;

/// Crop settings for sweeping one panorama with overlapping views.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CropParams {
    /// Field of view of every crop, in degrees.
    pub fov_deg: f64,
    /// Edge of the square output crops, in pixels.
    pub out_size: usize,
    /// Heading increment between neighbouring crops.
    ///
    /// With `fov_deg = 90` and a step of 45° neighbouring crops share half
    /// their width, see [`crate::overlap_percent`].
    pub heading_step_deg: f64,
    /// Pitches to sweep; each pitch gets a full ring of headings.
    pub pitches_deg: Vec<f64>,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            fov_deg: 90.0,
            out_size: 512,
            heading_step_deg: 45.0,
            pitches_deg: vec![-20.0, 0.0, 20.0],
        }
    }
}

impl CropParams {
    /// Expand into the full set of overlapping crops.
    pub fn plan(&self) -> Result<CropPlan, ProjectError> {
        CropPlan::overlapping(
            self.fov_deg,
            self.heading_step_deg,
            &self.pitches_deg,
            self.out_size,
        )
    }
}
