//! The immutable netlist graph and its builder.

use super::types::{Direction, HierName, Location, Vertex, VertexId, VertexKind};
use crate::dtype::DTypeId;
use crate::error::{NetlistError, Result};
use log::{debug, trace, warn};
use std::collections::{HashMap, HashSet};

/// The netlist graph.
///
/// Built once through a [`GraphBuilder`] and never mutated afterwards, so a
/// shared reference can serve any number of concurrent read-only queries.
/// Adjacency lists keep edge insertion order, which makes every traversal
/// deterministic.
#[derive(Debug, Clone)]
pub struct NetlistGraph {
    vertices: Vec<Vertex>,
    adjacency_out: Vec<Vec<VertexId>>,
    adjacency_in: Vec<Vec<VertexId>>,
    edge_count: usize,
    names: HashMap<String, VertexId>,
}

impl NetlistGraph {
    /// Get a vertex by ID.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::NotFound`] if the ID is out of range.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.vertices
            .get(id)
            .ok_or_else(|| NetlistError::not_found("vertex", id.to_string()))
    }

    /// All vertices in ID order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Named (non-logic) vertices in ID order.
    pub fn named_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter().filter(|v| v.is_named())
    }

    /// Look up a vertex by its exact canonical name.
    pub fn find_by_name(&self, name: &str) -> Option<&Vertex> {
        self.names.get(name).map(|&id| &self.vertices[id])
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Vertices driven by `id`.
    pub fn successors(&self, id: VertexId) -> &[VertexId] {
        self.adjacency_out.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices driving `id`.
    pub fn predecessors(&self, id: VertexId) -> &[VertexId] {
        self.adjacency_in.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Neighbors of `id` in the given direction.
    pub fn neighbors(&self, id: VertexId, direction: Direction) -> &[VertexId] {
        match direction {
            Direction::Outgoing => self.successors(id),
            Direction::Incoming => self.predecessors(id),
        }
    }

    /// True if there is an edge `source -> target`.
    pub fn has_edge(&self, source: VertexId, target: VertexId) -> bool {
        self.successors(source).contains(&target)
    }

    /// All edges as `(source, target)` pairs, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.adjacency_out
            .iter()
            .enumerate()
            .flat_map(|(source, targets)| targets.iter().map(move |&t| (source, t)))
    }

    /// Log warnings for suspicious structure. Returns the number of warnings.
    ///
    /// The checks never fail: a netlist with warnings is still queryable.
    pub fn check(&self) -> usize {
        let mut warnings = 0;
        for vertex in &self.vertices {
            if vertex.name().contains("__Vlvbound") {
                warn!("{} vertex {} in netlist", vertex.kind, vertex.name());
                warnings += 1;
            }
            if vertex.is_register() && self.predecessors(vertex.id).is_empty() {
                warn!("register {} has no drivers", vertex.name());
                warnings += 1;
            }
            if vertex.is_logic()
                && self.predecessors(vertex.id).is_empty()
                && self.successors(vertex.id).is_empty()
            {
                warn!("logic vertex {} is unconnected", vertex.id);
                warnings += 1;
            }
        }
        warnings
    }
}

/// Accumulates vertices and edges, then freezes them into a [`NetlistGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    edges: Vec<(VertexId, VertexId)>,
    edge_set: HashSet<(VertexId, VertexId)>,
    names: HashMap<String, VertexId>,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named vertex.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::InvalidDescription`] if `kind` is
    /// [`VertexKind::Logic`], the name is empty, or the name is already taken.
    pub fn add_vertex(
        &mut self,
        kind: VertexKind,
        name: HierName,
        dtype: Option<DTypeId>,
        location: Option<Location>,
    ) -> Result<VertexId> {
        if kind.is_logic() {
            return Err(NetlistError::invalid(
                "logic vertices are added with add_logic",
            ));
        }
        if name.is_empty() {
            return Err(NetlistError::invalid(format!("{kind} vertex without a name")));
        }
        if self.names.contains_key(name.as_str()) {
            return Err(NetlistError::invalid(format!(
                "duplicate vertex name {name}"
            )));
        }
        let id = self.vertices.len();
        debug!("Adding vertex: id={id}, kind={kind}, name={name}");
        self.names.insert(name.as_str().to_string(), id);
        self.vertices.push(Vertex {
            id,
            kind,
            name,
            dtype,
            location,
            statement: None,
        });
        Ok(id)
    }

    /// Add an anonymous logic-statement vertex.
    pub fn add_logic(&mut self, statement: impl Into<String>, location: Option<Location>) -> VertexId {
        let id = self.vertices.len();
        let statement = statement.into();
        trace!("Adding logic vertex: id={id}, statement={statement}");
        self.vertices.push(Vertex {
            id,
            kind: VertexKind::Logic,
            name: HierName::anonymous(),
            dtype: None,
            location,
            statement: Some(statement),
        });
        id
    }

    /// Add a directed dependency edge. Duplicate edges are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::InvalidDescription`] if either endpoint is unknown.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> Result<()> {
        let count = self.vertices.len();
        if source >= count || target >= count {
            return Err(NetlistError::invalid(format!(
                "edge {source} -> {target} references an unknown vertex"
            )));
        }
        if self.edge_set.insert((source, target)) {
            self.edges.push((source, target));
        } else {
            trace!("Ignoring duplicate edge {source} -> {target}");
        }
        Ok(())
    }

    /// Number of vertices added so far.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Freeze into an immutable graph.
    pub fn build(self) -> NetlistGraph {
        let count = self.vertices.len();
        let mut adjacency_out = vec![Vec::new(); count];
        let mut adjacency_in = vec![Vec::new(); count];
        for &(source, target) in &self.edges {
            adjacency_out[source].push(target);
            adjacency_in[target].push(source);
        }
        debug!(
            "Built netlist graph: {} vertices, {} edges",
            count,
            self.edges.len()
        );
        NetlistGraph {
            vertices: self.vertices,
            adjacency_out,
            adjacency_in,
            edge_count: self.edges.len(),
            names: self.names,
        }
    }
}
