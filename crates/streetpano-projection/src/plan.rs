use serde::{Deserialize, Serialize};
use streetpano_core::normalize_heading;

use crate::{CropRequest, ProjectError};

/// Horizontal overlap between neighbouring crops, in percent.
///
/// `overlap_percent(90.0, 45.0) == 50.0`; steps wider than the field of view
/// leave gaps and report 0.
pub fn overlap_percent(fov_deg: f64, heading_step_deg: f64) -> f64 {
    ((fov_deg - heading_step_deg) / fov_deg * 100.0).max(0.0)
}

/// Headings `0, step, 2*step, ...` below 360°.
pub fn overlapping_headings(step_deg: f64) -> Result<Vec<f64>, ProjectError> {
    if !step_deg.is_finite() || step_deg <= 0.0 || step_deg > 360.0 {
        return Err(ProjectError::InvalidHeadingStep { step: step_deg });
    }
    Ok((0u32..)
        .map(|i| i as f64 * step_deg)
        .take_while(|h| *h < 360.0)
        .collect())
}

/// `count` headings spread evenly around the circle starting at `base_deg`.
pub fn evenly_spaced_headings(base_deg: f64, count: usize) -> Result<Vec<f64>, ProjectError> {
    if count == 0 {
        return Err(ProjectError::InvalidCropCount);
    }
    if !base_deg.is_finite() {
        return Err(ProjectError::NonFiniteAngle {
            name: "base heading",
            value: base_deg,
        });
    }
    let spacing = 360.0 / count as f64;
    Ok((0..count)
        .map(|i| normalize_heading(base_deg + i as f64 * spacing))
        .collect())
}

/// Forward, right, backward and left relative to a street direction.
pub fn cardinal_headings(street_heading_deg: f64) -> [f64; 4] {
    [0.0, 90.0, 180.0, 270.0].map(|offset| normalize_heading(street_heading_deg + offset))
}

/// A set of crops to cut from one panorama: every heading at every pitch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropPlan {
    pub fov_deg: f64,
    pub out_size: usize,
    pub headings_deg: Vec<f64>,
    pub pitches_deg: Vec<f64>,
}

impl CropPlan {
    /// Full ring of headings `heading_step_deg` apart at each pitch.
    pub fn overlapping(
        fov_deg: f64,
        heading_step_deg: f64,
        pitches_deg: &[f64],
        out_size: usize,
    ) -> Result<Self, ProjectError> {
        Ok(Self {
            fov_deg,
            out_size,
            headings_deg: overlapping_headings(heading_step_deg)?,
            pitches_deg: pitches_deg.to_vec(),
        })
    }

    /// `count` evenly spaced headings from `base_deg` at a single pitch.
    pub fn evenly_spaced(
        base_deg: f64,
        count: usize,
        fov_deg: f64,
        pitch_deg: f64,
        out_size: usize,
    ) -> Result<Self, ProjectError> {
        Ok(Self {
            fov_deg,
            out_size,
            headings_deg: evenly_spaced_headings(base_deg, count)?,
            pitches_deg: vec![pitch_deg],
        })
    }

    /// Forward/right/back/left views around a street direction at one pitch.
    pub fn cardinal(street_heading_deg: f64, fov_deg: f64, pitch_deg: f64, out_size: usize) -> Self {
        Self {
            fov_deg,
            out_size,
            headings_deg: cardinal_headings(street_heading_deg).to_vec(),
            pitches_deg: vec![pitch_deg],
        }
    }

    pub fn len(&self) -> usize {
        self.headings_deg.len() * self.pitches_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Requests in pitch-major order: every heading of the first pitch, then
    /// every heading of the next.
    pub fn requests(&self) -> Vec<CropRequest> {
        self.pitches_deg
            .iter()
            .flat_map(|&pitch| {
                self.headings_deg
                    .iter()
                    .map(move |&heading| CropRequest::new(heading, pitch, self.fov_deg, self.out_size))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ninety_degree_views_every_45_overlap_by_half() {
        assert_abs_diff_eq!(overlap_percent(90.0, 45.0), 50.0);
        assert_abs_diff_eq!(overlap_percent(90.0, 90.0), 0.0);
        assert_abs_diff_eq!(overlap_percent(60.0, 90.0), 0.0);
    }

    #[test]
    fn overlapping_headings_stop_below_full_turn() {
        assert_eq!(
            overlapping_headings(45.0).unwrap(),
            vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0]
        );
        assert_eq!(overlapping_headings(360.0).unwrap(), vec![0.0]);
        assert_eq!(overlapping_headings(100.0).unwrap().len(), 4);
    }

    #[test]
    fn rejects_degenerate_heading_steps() {
        for step in [0.0, -10.0, 400.0, f64::NAN] {
            assert!(matches!(
                overlapping_headings(step),
                Err(ProjectError::InvalidHeadingStep { .. })
            ));
        }
    }

    #[test]
    fn evenly_spaced_wraps_from_compass_angle() {
        let headings = evenly_spaced_headings(300.0, 6).unwrap();
        let expected = [300.0, 0.0, 60.0, 120.0, 180.0, 240.0];
        for (h, e) in headings.iter().zip(expected) {
            assert_abs_diff_eq!(*h, e, epsilon = 1e-9);
        }
        assert_eq!(
            evenly_spaced_headings(0.0, 0),
            Err(ProjectError::InvalidCropCount)
        );
    }

    #[test]
    fn cardinal_views_follow_the_street() {
        assert_eq!(cardinal_headings(119.0), [119.0, 209.0, 299.0, 29.0]);
    }

    #[test]
    fn requests_are_pitch_major() {
        let plan = CropPlan::overlapping(90.0, 180.0, &[-20.0, 20.0], 128).unwrap();
        let got: Vec<(f64, f64)> = plan
            .requests()
            .iter()
            .map(|r| (r.pitch_deg, r.heading_deg))
            .collect();
        assert_eq!(
            got,
            vec![(-20.0, 0.0), (-20.0, 180.0), (20.0, 0.0), (20.0, 180.0)]
        );
        assert!(plan.requests().iter().all(|r| r.out_size == 128));
    }

    #[test]
    fn plan_without_pitches_is_empty() {
        let plan = CropPlan::overlapping(90.0, 45.0, &[], 64).unwrap();
        assert!(plan.is_empty());
        assert!(plan.requests().is_empty());
    }

    #[test]
    fn cardinal_plan_has_four_views() {
        let plan = CropPlan::cardinal(10.0, 90.0, 0.0, 32);
        assert_eq!(plan.len(), 4);
        let plan = CropPlan::evenly_spaced(10.0, 3, 90.0, 5.0, 32).unwrap();
        assert_eq!(plan.pitches_deg, vec![5.0]);
        assert_eq!(plan.len(), 3);
    }
}
