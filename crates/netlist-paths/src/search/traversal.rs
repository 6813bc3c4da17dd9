//! Traversal primitives shared by the path queries.
//!
//! All traversals visit neighbors in edge insertion order and seeds in
//! ascending ID order, so results are reproducible run to run.

use super::{Path, SearchLimits};
use crate::graph::{Direction, NetlistGraph, VertexId};
use log::trace;
use std::collections::{HashMap, HashSet, VecDeque};

/// Which vertices a traversal may enter and expand.
pub(crate) struct Rules<'a> {
    graph: &'a NetlistGraph,
    avoid: &'a HashSet<VertexId>,
    traverse_registers: bool,
    direction: Direction,
}

impl<'a> Rules<'a> {
    pub(crate) fn new(
        graph: &'a NetlistGraph,
        avoid: &'a HashSet<VertexId>,
        traverse_registers: bool,
        direction: Direction,
    ) -> Self {
        Self {
            graph,
            avoid,
            traverse_registers,
            direction,
        }
    }

    /// Avoided vertices are never entered.
    fn enterable(&self, vertex: VertexId) -> bool {
        !self.avoid.contains(&vertex)
    }

    /// Registers end propagation unless traversal is enabled or the register
    /// is where the current (sub-)search begins.
    fn expandable(&self, vertex: VertexId, is_origin: bool) -> bool {
        is_origin
            || self.traverse_registers
            || !self
                .graph
                .vertex(vertex)
                .map(|v| v.is_register())
                .unwrap_or(false)
    }

    fn next(&self, vertex: VertexId) -> &'a [VertexId] {
        self.graph.neighbors(vertex, self.direction)
    }
}

/// Breadth-first search over `(vertex, stage, origin)` states.
///
/// Stage `k` means the walk has passed `stages[k]` and is heading for
/// `stages[k + 1]`. Entering a vertex of the next stage always advances,
/// and reaching the last stage ends the search. Arrival is checked on the
/// edge, so a start that is also the finish needs a cycle to match.
///
/// `origin` marks the vertex a sub-search begins at (a seed, or the vertex
/// where the stage advanced). Only that vertex may expand as a register
/// without traversal; other members of the same stage set may not.
pub(crate) fn shortest_staged_path(rules: &Rules<'_>, stages: &[Vec<VertexId>]) -> Option<Path> {
    if stages.len() < 2 {
        return None;
    }
    let last = stages.len() - 1;
    let sets: Vec<HashSet<VertexId>> = stages
        .iter()
        .map(|stage| stage.iter().copied().collect())
        .collect();

    type State = (VertexId, usize, bool);
    let mut parents: HashMap<State, State> = HashMap::new();
    let mut visited: HashSet<State> = HashSet::new();
    let mut queue = VecDeque::new();
    for &seed in &stages[0] {
        if visited.insert((seed, 0, true)) {
            queue.push_back((seed, 0, true));
        }
    }

    while let Some(state) = queue.pop_front() {
        let (current, stage, origin) = state;
        if !rules.expandable(current, origin) {
            continue;
        }
        for &next in rules.next(current) {
            if !rules.enterable(next) {
                continue;
            }
            let advances = sets[stage + 1].contains(&next);
            let next_stage = if advances { stage + 1 } else { stage };
            if next_stage == last {
                let mut path = vec![next, current];
                let mut cursor = state;
                while let Some(&parent) = parents.get(&cursor) {
                    path.push(parent.0);
                    cursor = parent;
                }
                path.reverse();
                trace!("Found staged path of {} vertices", path.len());
                return Some(path);
            }
            let next_state = (next, next_stage, advances);
            if visited.insert(next_state) {
                parents.insert(next_state, state);
                queue.push_back(next_state);
            }
        }
    }
    None
}

/// Breadth-first tree rooted at one vertex.
pub(crate) struct SearchTree {
    origin: VertexId,
    parents: HashMap<VertexId, VertexId>,
    reached: Vec<VertexId>,
}

impl SearchTree {
    /// Grow the tree from `origin`. The origin itself is only reached when
    /// a cycle leads back to it.
    pub(crate) fn grow(rules: &Rules<'_>, origin: VertexId) -> Self {
        let mut parents = HashMap::new();
        let mut reached = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([origin]);

        while let Some(current) = queue.pop_front() {
            if !rules.expandable(current, current == origin) {
                continue;
            }
            for &next in rules.next(current) {
                if !rules.enterable(next) || !visited.insert(next) {
                    continue;
                }
                parents.insert(next, current);
                reached.push(next);
                if next != origin {
                    queue.push_back(next);
                }
            }
        }
        Self {
            origin,
            parents,
            reached,
        }
    }

    /// Vertices reached, in discovery order.
    pub(crate) fn reached(&self) -> &[VertexId] {
        &self.reached
    }

    /// Tree path from the origin to `target`, in traversal direction.
    pub(crate) fn path_to(&self, target: VertexId) -> Path {
        let mut path = vec![target];
        let mut current = target;
        while let Some(&parent) = self.parents.get(&current) {
            path.push(parent);
            if parent == self.origin {
                break;
            }
            current = parent;
        }
        path.reverse();
        path
    }
}

/// Simple paths from one origin to the first vertex of a target set.
pub(crate) struct SegmentPaths {
    pub(crate) paths: Vec<Path>,
    pub(crate) truncated: bool,
}

/// Enumerate every simple path from `origin` that ends on its first arrival
/// at a vertex of `targets`.
pub(crate) fn segment_paths(
    rules: &Rules<'_>,
    origin: VertexId,
    targets: &HashSet<VertexId>,
    limits: &SearchLimits,
) -> SegmentPaths {
    let mut walk = SegmentWalk {
        rules,
        targets,
        limits,
        path: vec![origin],
        on_path: HashSet::from([origin]),
        found: Vec::new(),
        truncated: false,
    };
    walk.extend(origin);
    trace!(
        "Segment from vertex {} produced {} paths",
        origin,
        walk.found.len()
    );
    SegmentPaths {
        paths: walk.found,
        truncated: walk.truncated,
    }
}

struct SegmentWalk<'r, 'a> {
    rules: &'r Rules<'a>,
    targets: &'r HashSet<VertexId>,
    limits: &'r SearchLimits,
    path: Vec<VertexId>,
    on_path: HashSet<VertexId>,
    found: Vec<Path>,
    truncated: bool,
}

impl SegmentWalk<'_, '_> {
    /// Returns false once the path cap is hit.
    fn extend(&mut self, current: VertexId) -> bool {
        if !self.rules.expandable(current, self.path.len() == 1) {
            return true;
        }
        for &next in self.rules.next(current) {
            if !self.rules.enterable(next) {
                continue;
            }
            let arrives = self.targets.contains(&next)
                && (!self.on_path.contains(&next) || next == self.path[0]);
            if !arrives && self.on_path.contains(&next) {
                continue;
            }
            // Edges in the path once `next` is appended.
            if self.limits.max_depth.is_some_and(|depth| self.path.len() > depth) {
                self.truncated = true;
                continue;
            }
            if arrives {
                if self.limits.max_paths.is_some_and(|max| self.found.len() >= max) {
                    self.truncated = true;
                    return false;
                }
                let mut found = self.path.clone();
                found.push(next);
                self.found.push(found);
                continue;
            }
            self.path.push(next);
            self.on_path.insert(next);
            let keep_going = self.extend(next);
            self.on_path.remove(&next);
            self.path.pop();
            if !keep_going {
                return false;
            }
        }
        true
    }
}

/// Join per-segment paths end to start, keeping only simple results.
///
/// `segments[k]` maps each origin of segment `k` to its paths. A combined
/// path may only repeat a vertex as its final vertex closing back onto its
/// first. Returns false once `max_paths` results exist and another is found.
pub(crate) fn join_segments(
    segments: &[HashMap<VertexId, Vec<Path>>],
    index: usize,
    prefix: &mut Vec<VertexId>,
    out: &mut Vec<Path>,
    max_paths: Option<usize>,
) -> bool {
    if index == segments.len() {
        if max_paths.is_some_and(|max| out.len() >= max) {
            return false;
        }
        out.push(prefix.clone());
        return true;
    }
    let Some(&tail) = prefix.last() else {
        return true;
    };
    let Some(paths) = segments[index].get(&tail) else {
        return true;
    };
    let closing = index + 1 == segments.len();
    for segment in paths {
        let extension = &segment[1..];
        let simple = extension.iter().enumerate().all(|(i, vertex)| {
            !prefix.contains(vertex)
                || (closing && i + 1 == extension.len() && *vertex == prefix[0])
        });
        if !simple {
            continue;
        }
        let len = prefix.len();
        prefix.extend_from_slice(extension);
        let keep_going = join_segments(segments, index + 1, prefix, out, max_paths);
        prefix.truncate(len);
        if !keep_going {
            return false;
        }
    }
    true
}
