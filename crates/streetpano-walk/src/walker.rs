use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{PanoNode, PanoSource};

/// Why a walk ended before reaching its requested length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The next step led back onto an already visited pano.
    CycleDetected,
    /// The last pano has no links to follow.
    NoUnvisitedLink,
}

/// Terminal result of a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkOutcome {
    /// The requested number of panos was collected.
    Completed,
    Stopped(StopReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkState {
    /// `current` is the next pano to visit.
    Active { current: String },
    Completed,
    Stopped(StopReason),
}

impl WalkState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WalkState::Active { .. })
    }
}

/// Visited panos in walk order plus how the walk ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Walk {
    pub nodes: Vec<PanoNode>,
    pub outcome: WalkOutcome,
}

impl Walk {
    pub fn ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self.outcome {
            WalkOutcome::Completed => None,
            WalkOutcome::Stopped(reason) => Some(reason),
        }
    }
}

/// Metadata lookup failed mid-walk; `partial` holds the panos visited so far.
#[derive(thiserror::Error, Debug)]
#[error("metadata lookup for pano {id:?} failed after {walked} panos", walked = .partial.len())]
pub struct WalkError<E: std::error::Error + 'static> {
    pub id: String,
    pub partial: Vec<PanoNode>,
    #[source]
    pub source: E,
}

/// Greedy single-path walker: follows the first unvisited link at each pano.
#[derive(Clone, Debug)]
pub struct StreetWalker<S> {
    source: S,
    max_panos: usize,
}

impl<S: PanoSource> StreetWalker<S> {
    pub fn new(source: S, max_panos: usize) -> Self {
        Self { source, max_panos }
    }

    #[inline]
    pub fn max_panos(&self) -> usize {
        self.max_panos
    }

    /// Step-by-step cursor starting at `start_id`.
    pub fn cursor(&self, start_id: &str) -> WalkCursor<'_, S> {
        let state = if self.max_panos == 0 {
            WalkState::Completed
        } else {
            WalkState::Active {
                current: start_id.to_string(),
            }
        };
        WalkCursor {
            source: &self.source,
            max_panos: self.max_panos,
            state,
            visited: HashSet::new(),
            nodes: Vec::new(),
        }
    }

    /// Walk from `start_id` until the length is reached or the street ends.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self), fields(max_panos = self.max_panos))
    )]
    pub fn walk(&self, start_id: &str) -> Result<Walk, WalkError<S::Error>> {
        let mut cursor = self.cursor(start_id);
        loop {
            let outcome = match cursor.step()? {
                WalkState::Active { .. } => continue,
                WalkState::Completed => WalkOutcome::Completed,
                WalkState::Stopped(reason) => WalkOutcome::Stopped(*reason),
            };
            log::debug!("walk from {start_id} ended {outcome:?} after {} panos", cursor.nodes.len());
            return Ok(Walk {
                nodes: cursor.nodes,
                outcome,
            });
        }
    }
}

/// In-progress walk; advance it with [`WalkCursor::step`].
pub struct WalkCursor<'a, S> {
    source: &'a S,
    max_panos: usize,
    state: WalkState,
    visited: HashSet<String>,
    nodes: Vec<PanoNode>,
}

impl<S: PanoSource> WalkCursor<'_, S> {
    #[inline]
    pub fn state(&self) -> &WalkState {
        &self.state
    }

    /// Panos appended so far, in walk order.
    #[inline]
    pub fn nodes(&self) -> &[PanoNode] {
        &self.nodes
    }

    /// Perform one transition. Terminal states are left unchanged.
    pub fn step(&mut self) -> Result<&WalkState, WalkError<S::Error>> {
        let current = match &self.state {
            WalkState::Active { current } => current.clone(),
            _ => return Ok(&self.state),
        };

        if self.visited.contains(&current) {
            log::debug!("pano {current} already visited, stopping");
            self.state = WalkState::Stopped(StopReason::CycleDetected);
            return Ok(&self.state);
        }

        let node = self.source.node(&current).map_err(|source| WalkError {
            id: current.clone(),
            partial: self.nodes.clone(),
            source,
        })?;

        log::debug!(
            "[{}/{}] pano={} lat={:.6} lng={:.6} links={}",
            self.nodes.len() + 1,
            self.max_panos,
            node.id,
            node.lat,
            node.lng,
            node.links.len()
        );

        self.visited.insert(node.id.clone());
        self.visited.insert(current);
        let next = self.next_target(&node);
        self.nodes.push(node);

        self.state = if self.nodes.len() >= self.max_panos {
            WalkState::Completed
        } else {
            match next {
                Some(id) => WalkState::Active { current: id },
                None => {
                    log::debug!("no links to follow, stopping");
                    WalkState::Stopped(StopReason::NoUnvisitedLink)
                }
            }
        };
        Ok(&self.state)
    }

    /// First link to an unvisited pano; failing that, the first link at all,
    /// which the visited check turns into a cycle stop.
    fn next_target(&self, node: &PanoNode) -> Option<String> {
        node.links
            .iter()
            .find(|link| !self.visited.contains(&link.target_id))
            .or_else(|| node.links.first())
            .map(|link| link.target_id.clone())
    }

    /// The finished walk, or `None` while the cursor is still active.
    pub fn finish(self) -> Option<Walk> {
        let outcome = match self.state {
            WalkState::Active { .. } => return None,
            WalkState::Completed => WalkOutcome::Completed,
            WalkState::Stopped(reason) => WalkOutcome::Stopped(reason),
        };
        Some(Walk {
            nodes: self.nodes,
            outcome,
        })
    }
}
