//! Core graph types and operations.
//!
//! This module defines the fundamental building blocks:
//! - [`Vertex`]: Registers, ports, nets, variables and logic statements
//! - [`NetlistGraph`]: The immutable dependency graph
//! - [`GraphBuilder`]: The only way to construct a graph

mod netlist_graph;
mod types;

pub use netlist_graph::{GraphBuilder, NetlistGraph};
pub use types::{Direction, HierName, Location, PortDirection, Vertex, VertexId, VertexKind};
