use serde::{Deserialize, Serialize};
use streetpano_tiles::{tile_column_for_heading, TileError};

/// Directed edge to a physically adjacent panorama.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanoLink {
    #[serde(alias = "panoId")]
    pub target_id: String,
    /// Compass bearing from the source pano toward the target.
    pub heading: f64,
}

impl PanoLink {
    pub fn new(target_id: impl Into<String>, heading: f64) -> Self {
        Self {
            target_id: target_id.into(),
            heading,
        }
    }
}

/// Metadata of one panorama as returned by the imagery provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanoNode {
    #[serde(alias = "pano_id", alias = "panoId")]
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    /// Default camera heading of the panorama.
    #[serde(default)]
    pub heading: f64,
    /// Adjacent panos in provider order; the first one is the main road direction.
    #[serde(default)]
    pub links: Vec<PanoLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "imageWidth")]
    pub image_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "imageHeight")]
    pub image_height: Option<u32>,
}

impl PanoNode {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64, heading: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            heading,
            links: Vec::new(),
            date: None,
            image_width: None,
            image_height: None,
        }
    }

    pub fn with_links(mut self, links: impl IntoIterator<Item = PanoLink>) -> Self {
        self.links.extend(links);
        self
    }

    /// Direction along the road: the first link's bearing, or the pano's own
    /// heading when it has no links.
    pub fn forward_heading(&self) -> f64 {
        self.links
            .first()
            .map_or(self.heading, |link| link.heading)
    }
}

/// Tile column that looks along the road from `node` at `zoom`.
pub fn forward_tile_column(node: &PanoNode, zoom: i32) -> Result<u32, TileError> {
    tile_column_for_heading(node.forward_heading(), zoom)
}
