use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::PanoNode;

/// Supplier of pano metadata, usually a network client.
///
/// The walker calls [`PanoSource::node`] once per visited pano, in walk order.
pub trait PanoSource {
    type Error: std::error::Error + 'static;

    fn node(&self, id: &str) -> Result<PanoNode, Self::Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown pano {id:?}")]
    UnknownNode { id: String },
    #[error("pano {id:?} appears more than once")]
    DuplicateNode { id: String },
}

/// In-memory pano graph keyed by id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "PanoGraphFile", into = "PanoGraphFile")]
pub struct PanoGraph {
    nodes: HashMap<String, PanoNode>,
    order: Vec<String>,
}

/// On-disk shape of a pano graph: `{ "nodes": [...] }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PanoGraphFile {
    pub nodes: Vec<PanoNode>,
}

impl TryFrom<PanoGraphFile> for PanoGraph {
    type Error = GraphError;

    fn try_from(file: PanoGraphFile) -> Result<Self, Self::Error> {
        Self::from_nodes(file.nodes)
    }
}

impl From<PanoGraph> for PanoGraphFile {
    fn from(mut graph: PanoGraph) -> Self {
        let nodes = graph
            .order
            .iter()
            .filter_map(|id| graph.nodes.remove(id))
            .collect();
        Self { nodes }
    }
}

impl PanoGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph, rejecting duplicate ids.
    pub fn from_nodes(nodes: impl IntoIterator<Item = PanoNode>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in nodes {
            graph.insert(node)?;
        }
        Ok(graph)
    }

    pub fn insert(&mut self, node: PanoNode) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode { id: node.id });
        }
        self.order.push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PanoNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &PanoNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }
}

impl PanoSource for PanoGraph {
    type Error = GraphError;

    fn node(&self, id: &str) -> Result<PanoNode, GraphError> {
        self.nodes
            .get(id)
            .cloned()
            .ok_or_else(|| GraphError::UnknownNode { id: id.to_string() })
    }
}

impl<S: PanoSource + ?Sized> PanoSource for &S {
    type Error = S::Error;

    fn node(&self, id: &str) -> Result<PanoNode, Self::Error> {
        (**self).node(id)
    }
}
