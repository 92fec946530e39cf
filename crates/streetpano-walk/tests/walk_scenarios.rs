use std::cell::RefCell;

use streetpano_walk::{
    PanoGraph, PanoLink, PanoNode, PanoSource, StopReason, StreetWalker, WalkOutcome,
};

fn node(id: &str, links: &[&str]) -> PanoNode {
    PanoNode::new(id, 40.0, -74.0, 0.0)
        .with_links(links.iter().map(|target| PanoLink::new(*target, 90.0)))
}

/// Straight street `p0 -> p1 -> ...` where every pano also links back.
fn street(len: usize) -> PanoGraph {
    PanoGraph::from_nodes((0..len).map(|i| {
        let mut links = Vec::new();
        if i + 1 < len {
            links.push(format!("p{}", i + 1));
        }
        if i > 0 {
            links.push(format!("p{}", i - 1));
        }
        PanoNode::new(format!("p{i}"), 40.0, -74.0 + i as f64 * 1e-4, 90.0)
            .with_links(links.into_iter().map(|t| PanoLink::new(t, 90.0)))
    }))
    .expect("street")
}

#[derive(Debug, thiserror::Error)]
#[error("offline")]
struct Offline;

/// Records lookups and fails after a fixed number of them.
struct FlakySource {
    graph: PanoGraph,
    budget: usize,
    calls: RefCell<Vec<String>>,
}

impl PanoSource for FlakySource {
    type Error = Offline;

    fn node(&self, id: &str) -> Result<PanoNode, Offline> {
        let mut calls = self.calls.borrow_mut();
        if calls.len() == self.budget {
            return Err(Offline);
        }
        calls.push(id.to_string());
        self.graph.get(id).cloned().ok_or(Offline)
    }
}

#[test]
fn triangle_stops_on_cycle() {
    let graph =
        PanoGraph::from_nodes([node("A", &["B"]), node("B", &["C"]), node("C", &["A"])]).unwrap();
    let walk = StreetWalker::new(&graph, 10).walk("A").unwrap();
    assert_eq!(walk.ids(), vec!["A", "B", "C"]);
    assert_eq!(walk.outcome, WalkOutcome::Stopped(StopReason::CycleDetected));
}

#[test]
fn isolated_pano_stops_without_links() {
    let graph = PanoGraph::from_nodes([node("A", &[])]).unwrap();
    let walk = StreetWalker::new(&graph, 10).walk("A").unwrap();
    assert_eq!(walk.ids(), vec!["A"]);
    assert_eq!(walk.outcome, WalkOutcome::Stopped(StopReason::NoUnvisitedLink));
}

#[test]
fn long_street_is_cut_at_requested_length() {
    let graph = street(20);
    let walk = StreetWalker::new(&graph, 5).walk("p0").unwrap();
    assert_eq!(walk.ids(), vec!["p0", "p1", "p2", "p3", "p4"]);
    assert_eq!(walk.outcome, WalkOutcome::Completed);
}

#[test]
fn back_links_do_not_reverse_the_walk() {
    let graph = street(4);
    let walk = StreetWalker::new(&graph, 10).walk("p0").unwrap();
    assert_eq!(walk.ids(), vec!["p0", "p1", "p2", "p3"]);
    // p3 only links back to p2
    assert_eq!(walk.outcome, WalkOutcome::Stopped(StopReason::CycleDetected));
}

#[test]
fn walk_from_the_middle_heads_along_first_link() {
    let graph = street(6);
    let walk = StreetWalker::new(&graph, 10).walk("p3").unwrap();
    assert_eq!(walk.ids(), vec!["p3", "p4", "p5"]);
}

#[test]
fn no_pano_appears_twice() {
    let graph = PanoGraph::from_nodes([
        node("A", &["B", "C"]),
        node("B", &["A", "C"]),
        node("C", &["B", "A", "D"]),
        node("D", &["C"]),
    ])
    .unwrap();
    let walk = StreetWalker::new(&graph, 100).walk("A").unwrap();
    let mut ids = walk.ids();
    assert_eq!(ids, vec!["A", "B", "C", "D"]);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), walk.len());
}

#[test]
fn source_failure_returns_partial_walk() {
    let source = FlakySource {
        graph: street(10),
        budget: 3,
        calls: RefCell::new(Vec::new()),
    };
    let err = StreetWalker::new(&source, 10).walk("p0").unwrap_err();
    assert_eq!(err.id, "p3");
    let partial: Vec<&str> = err.partial.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(partial, vec!["p0", "p1", "p2"]);
    assert_eq!(*source.calls.borrow(), vec!["p0", "p1", "p2"]);
}

#[test]
fn unknown_start_is_an_error() {
    let graph = street(2);
    let err = StreetWalker::new(&graph, 3).walk("nowhere").unwrap_err();
    assert!(err.partial.is_empty());
    assert_eq!(err.id, "nowhere");
}

#[test]
fn graph_file_drives_a_walk() {
    let json = r#"{
        "nodes": [
            { "pano_id": "a", "lat": 40.0, "lng": -74.0, "heading": 10.0,
              "links": [{ "target_id": "b", "heading": 12.0 }] },
            { "pano_id": "b", "lat": 40.1, "lng": -74.0,
              "links": [{ "target_id": "a", "heading": 192.0 }] }
        ]
    }"#;
    let graph: PanoGraph = serde_json::from_str(json).expect("graph");
    let walk = StreetWalker::new(&graph, 5).walk("a").unwrap();
    assert_eq!(walk.ids(), vec!["a", "b"]);
    assert_eq!(walk.nodes[0].forward_heading(), 12.0);
    assert_eq!(walk.stop_reason(), Some(StopReason::CycleDetected));
}
