//! JSON config loading and the reports written next to pipeline outputs.

use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use streetpano_core::normalize_heading;
use streetpano_projection::{overlap_percent, CropPlan, PerspectiveCrop};
use streetpano_tiles::TileError;
use streetpano_walk::{forward_tile_column, StopReason, Walk, WalkOutcome};

use crate::PipelineError;

/// File name of the crop report written next to the crops.
pub const CROP_REPORT_FILE: &str = "crop_metadata.json";

/// Load any JSON document from disk.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, PipelineError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write `value` to disk as pretty JSON.
pub fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// `h{heading}_{pitch tag}.png`, heading truncated to whole degrees.
pub fn crop_file_name(crop: &PerspectiveCrop) -> String {
    format!("h{:03}_{}.png", crop.heading_deg.trunc() as u32, crop.pitch_tag())
}

/// One written crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    pub index: usize,
    pub file: String,
    pub heading_deg: f64,
    pub pitch_deg: f64,
}

/// Summary of a crop run, written as `crop_metadata.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropReport {
    pub source: String,
    /// `[width, height]` of the source panorama.
    pub pano_size: [usize; 2],
    pub fov_deg: f64,
    pub out_size: usize,
    /// Overlap between neighbouring crops of one pitch ring, when the ring
    /// has at least two headings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap_percent: Option<f64>,
    pub crops: Vec<CropRecord>,
}

impl CropReport {
    pub fn new(source: impl Into<String>, pano_size: [usize; 2], plan: &CropPlan) -> Self {
        let overlap = match plan.headings_deg.as_slice() {
            [first, second, ..] => Some(overlap_percent(
                plan.fov_deg,
                normalize_heading(second - first),
            )),
            _ => None,
        };
        Self {
            source: source.into(),
            pano_size,
            fov_deg: plan.fov_deg,
            out_size: plan.out_size,
            overlap_percent: overlap,
            crops: Vec::new(),
        }
    }

    pub fn push(&mut self, crop: &PerspectiveCrop) -> &CropRecord {
        let record = CropRecord {
            index: self.crops.len(),
            file: crop_file_name(crop),
            heading_deg: crop.heading_deg,
            pitch_deg: crop.pitch_deg,
        };
        self.crops.push(record);
        &self.crops[self.crops.len() - 1]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkReportEntry {
    pub index: usize,
    pub pano_id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub links: usize,
    pub forward_heading_deg: f64,
    /// Tile column facing `forward_heading_deg` at the report zoom.
    pub forward_tile_column: u32,
}

/// Walk summary: visited panos in order plus how the walk ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkReport {
    pub start: String,
    pub zoom: i32,
    pub outcome: WalkOutcome,
    pub panos: Vec<WalkReportEntry>,
}

impl WalkReport {
    pub fn from_walk(start: impl Into<String>, walk: &Walk, zoom: i32) -> Result<Self, TileError> {
        let panos = walk
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                Ok(WalkReportEntry {
                    index,
                    pano_id: node.id.clone(),
                    lat: node.lat,
                    lng: node.lng,
                    date: node.date.clone(),
                    links: node.links.len(),
                    forward_heading_deg: node.forward_heading(),
                    forward_tile_column: forward_tile_column(node, zoom)?,
                })
            })
            .collect::<Result<Vec<_>, TileError>>()?;
        Ok(Self {
            start: start.into(),
            zoom,
            outcome: walk.outcome,
            panos,
        })
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self.outcome {
            WalkOutcome::Completed => None,
            WalkOutcome::Stopped(reason) => Some(reason),
        }
    }
}
