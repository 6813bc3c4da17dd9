//! Path search engine.
//!
//! Four queries over a [`NetlistGraph`]:
//!
//! - **any path**: one path from start to finish through the ordered through
//!   points, found breadth-first (fewest edges wins, ties go to discovery
//!   order)
//! - **all paths**: every simple path satisfying the same constraints, bounded
//!   by caller-supplied [`SearchLimits`]
//! - **fan-out**: one path from the start point to each reachable
//!   finish-eligible vertex
//! - **fan-in**: one path to the finish point from each vertex that reaches it
//!   and is start-eligible
//!
//! Avoid points are never entered. Registers end propagation unless register
//! traversal is enabled, but the register a search begins at is always
//! expanded.

mod traversal;

use crate::error::Result;
use crate::graph::{Direction, NetlistGraph, VertexId};
use crate::matcher::{Matcher, Role};
use crate::options::Options;
use crate::waypoints::Waypoints;
use log::debug;
use std::collections::{BTreeSet, HashMap, HashSet};
use traversal::{join_segments, segment_paths, shortest_staged_path, Rules, SearchTree};

/// A path as an ordered vertex sequence.
pub type Path = Vec<VertexId>;

/// Result cap applied when none is given explicitly.
pub const DEFAULT_MAX_PATHS: usize = 10_000;

/// Bounds on all-paths enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of paths returned (None = unbounded)
    pub max_paths: Option<usize>,
    /// Maximum edges per sub-search between consecutive waypoints
    pub max_depth: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_paths: Some(DEFAULT_MAX_PATHS),
            max_depth: None,
        }
    }
}

impl SearchLimits {
    /// Cap the number of returned paths.
    pub fn new(max_paths: usize) -> Self {
        Self {
            max_paths: Some(max_paths),
            max_depth: None,
        }
    }

    /// No bounds at all. Exponential on branching designs.
    pub fn unbounded() -> Self {
        Self {
            max_paths: None,
            max_depth: None,
        }
    }

    /// Cap the edges per sub-search.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Result of an all-paths query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    /// Paths in discovery order
    pub paths: Vec<Path>,
    /// True if a limit cut the enumeration short
    pub truncated: bool,
}

impl PathSet {
    /// Number of paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if no path was found.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths with their report numbers (`Path 0`, `Path 1`, ...).
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Path)> {
        self.paths.iter().enumerate()
    }
}

struct Plan {
    stages: Vec<Vec<VertexId>>,
    avoid: HashSet<VertexId>,
}

/// Executes path queries against one graph under one set of options.
#[derive(Debug, Clone, Copy)]
pub struct PathSearch<'a> {
    graph: &'a NetlistGraph,
    matcher: Matcher<'a>,
}

impl<'a> PathSearch<'a> {
    /// Create an engine.
    pub fn new(graph: &'a NetlistGraph, options: &'a Options) -> Self {
        Self {
            graph,
            matcher: Matcher::new(graph, options),
        }
    }

    fn options(&self) -> &'a Options {
        self.matcher.options()
    }

    /// Resolve all waypoints. `None` when a tolerated zero match leaves the
    /// query nothing to search.
    fn plan(&self, waypoints: &Waypoints) -> Result<Option<Plan>> {
        let (start, finish) = waypoints.endpoints()?;
        let (starts, finishes) = self.matcher.resolve_endpoints(start, finish)?;
        let mut stages = vec![starts];
        for point in waypoints.through_points() {
            stages.push(self.matcher.resolve(point, Role::Through)?);
        }
        stages.push(finishes);
        let mut avoid = HashSet::new();
        for point in waypoints.avoid_points() {
            avoid.extend(self.matcher.resolve(point, Role::Avoid)?);
        }
        if stages.iter().any(Vec::is_empty) {
            debug!("Unmatched waypoint, nothing to search");
            return Ok(None);
        }
        Ok(Some(Plan { stages, avoid }))
    }

    /// True if any path satisfies the waypoints.
    ///
    /// # Errors
    ///
    /// Resolution, structural-query and usage errors as for
    /// [`PathSearch::any_path`].
    pub fn path_exists(&self, waypoints: &Waypoints) -> Result<bool> {
        Ok(!self.any_path(waypoints)?.is_empty())
    }

    /// One path satisfying the waypoints, or an empty path if none exists.
    ///
    /// # Errors
    ///
    /// - [`NetlistError::Usage`](crate::NetlistError::Usage) if start or finish is missing
    /// - [`NetlistError::StructuralQuery`](crate::NetlistError::StructuralQuery) for a role-reversed request
    /// - [`NetlistError::Resolution`](crate::NetlistError::Resolution) for unresolvable waypoints
    pub fn any_path(&self, waypoints: &Waypoints) -> Result<Path> {
        let Some(plan) = self.plan(waypoints)? else {
            return Ok(Vec::new());
        };
        let rules = Rules::new(
            self.graph,
            &plan.avoid,
            self.options().traverse_registers,
            Direction::Outgoing,
        );
        let path = shortest_staged_path(&rules, &plan.stages).unwrap_or_default();
        debug!("Any-path query found {} vertices", path.len());
        Ok(path)
    }

    /// Every simple path satisfying the waypoints, within `limits`.
    ///
    /// Each sub-search between consecutive waypoints is enumerated
    /// separately and the pieces are joined; joined paths that revisit a
    /// vertex are dropped.
    ///
    /// # Errors
    ///
    /// As for [`PathSearch::any_path`].
    pub fn all_paths(&self, waypoints: &Waypoints, limits: SearchLimits) -> Result<PathSet> {
        let Some(plan) = self.plan(waypoints)? else {
            return Ok(PathSet::default());
        };
        let rules = Rules::new(
            self.graph,
            &plan.avoid,
            self.options().traverse_registers,
            Direction::Outgoing,
        );

        let mut truncated = false;
        let mut segments: Vec<HashMap<VertexId, Vec<Path>>> = Vec::new();
        let mut origins = plan.stages[0].clone();
        for targets in &plan.stages[1..] {
            let targets: HashSet<VertexId> = targets.iter().copied().collect();
            let mut by_origin = HashMap::new();
            let mut reached = BTreeSet::new();
            for &origin in &origins {
                let segment = segment_paths(&rules, origin, &targets, &limits);
                truncated |= segment.truncated;
                reached.extend(segment.paths.iter().filter_map(|p| p.last().copied()));
                by_origin.insert(origin, segment.paths);
            }
            segments.push(by_origin);
            origins = reached.into_iter().collect();
        }

        let mut paths = Vec::new();
        for &start in &plan.stages[0] {
            let mut prefix = vec![start];
            if !join_segments(&segments, 0, &mut prefix, &mut paths, limits.max_paths) {
                truncated = true;
                break;
            }
        }
        debug!(
            "All-paths query found {} paths{}",
            paths.len(),
            if truncated { " (truncated)" } else { "" }
        );
        Ok(PathSet { paths, truncated })
    }

    /// One path from the start point to each reachable finish-eligible
    /// vertex, ordered by vertex ID.
    ///
    /// # Errors
    ///
    /// [`NetlistError::Usage`](crate::NetlistError::Usage) if the waypoints
    /// carry anything but a start point; resolution errors for the start.
    pub fn fan_out(&self, waypoints: &Waypoints) -> Result<Vec<Path>> {
        let point = waypoints.fan_out_point()?;
        let seeds = self.matcher.resolve(point, Role::Start)?;
        let paths = self.fan(&seeds, Direction::Outgoing, Role::Finish);
        debug!("Fan-out from '{}' found {} paths", point, paths.len());
        Ok(paths)
    }

    /// One path to the finish point from each start-eligible vertex that
    /// reaches it, ordered by vertex ID. Paths run start to finish.
    ///
    /// # Errors
    ///
    /// [`NetlistError::Usage`](crate::NetlistError::Usage) if the waypoints
    /// carry anything but a finish point; resolution errors for the finish.
    pub fn fan_in(&self, waypoints: &Waypoints) -> Result<Vec<Path>> {
        let point = waypoints.fan_in_point()?;
        let seeds = self.matcher.resolve(point, Role::Finish)?;
        let paths = self.fan(&seeds, Direction::Incoming, Role::Start);
        debug!("Fan-in to '{}' found {} paths", point, paths.len());
        Ok(paths)
    }

    fn fan(&self, seeds: &[VertexId], direction: Direction, endpoint_role: Role) -> Vec<Path> {
        let avoid = HashSet::new();
        let rules = Rules::new(
            self.graph,
            &avoid,
            self.options().traverse_registers,
            direction,
        );
        let mut paths = Vec::new();
        for &seed in seeds {
            let tree = SearchTree::grow(&rules, seed);
            let mut endpoints: Vec<VertexId> = tree
                .reached()
                .iter()
                .copied()
                .filter(|&id| {
                    self.graph
                        .vertex(id)
                        .map(|v| self.matcher.is_eligible(v, endpoint_role))
                        .unwrap_or(false)
                })
                .collect();
            endpoints.sort_unstable();
            for endpoint in endpoints {
                let mut path = tree.path_to(endpoint);
                if direction == Direction::Incoming {
                    path.reverse();
                }
                paths.push(path);
            }
        }
        paths
    }
}
