//! Walk along a street by following panorama links.
//!
//! ## Quickstart
//!
//! ```
//! use streetpano_walk::{PanoGraph, PanoLink, PanoNode, StopReason, StreetWalker, WalkOutcome};
//!
//! let graph = PanoGraph::from_nodes([
//!     PanoNode::new("a", 40.0, -73.0, 90.0).with_links([PanoLink::new("b", 90.0)]),
//!     PanoNode::new("b", 40.0, -72.9, 90.0),
//! ])
//! .unwrap();
//!
//! let walk = StreetWalker::new(&graph, 10).walk("a").unwrap();
//! assert_eq!(walk.ids(), vec!["a", "b"]);
//! assert_eq!(walk.outcome, WalkOutcome::Stopped(StopReason::NoUnvisitedLink));
//! ```
//!
//! Traversal rules:
//! 1. Start at the requested pano; the walk is empty and nothing is visited.
//! 2. A pano already visited stops the walk with `CycleDetected` and is not
//!    appended again.
//! 3. Otherwise fetch its metadata, append it and mark it visited. Reaching
//!    the requested length completes the walk.
//! 4. Follow the first link, in the order given, to an unvisited pano.
//! 5. If every link leads back to a visited pano, step onto the first one;
//!    rule 2 then reports the cycle. A pano with no links at all stops with
//!    `NoUnvisitedLink`.

mod graph;
mod node;
mod walker;

pub use graph::{GraphError, PanoGraph, PanoGraphFile, PanoSource};
pub use node::{forward_tile_column, PanoLink, PanoNode};
pub use walker::{StopReason, StreetWalker, Walk, WalkCursor, WalkError, WalkOutcome, WalkState};
