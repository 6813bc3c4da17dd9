//! Convenience helpers for building netlists by hand.
//!
//! These cover the common vertex kinds and the "drivers -> statement ->
//! loads" shape every combinational assignment has, which keeps tests and
//! small embedded netlists free of builder boilerplate.

use crate::dtype::DTypeId;
use crate::error::Result;
use crate::graph::{GraphBuilder, HierName, VertexId, VertexKind};

/// Add a top-level input port.
pub fn add_input(builder: &mut GraphBuilder, name: &str) -> Result<VertexId> {
    builder.add_vertex(VertexKind::InputPort, HierName::parse(name), None, None)
}

/// Add a top-level output port.
pub fn add_output(builder: &mut GraphBuilder, name: &str) -> Result<VertexId> {
    builder.add_vertex(VertexKind::OutputPort, HierName::parse(name), None, None)
}

/// Add a register.
pub fn add_register(builder: &mut GraphBuilder, name: &str) -> Result<VertexId> {
    builder.add_vertex(VertexKind::Register, HierName::parse(name), None, None)
}

/// Add a net.
pub fn add_net(builder: &mut GraphBuilder, name: &str) -> Result<VertexId> {
    builder.add_vertex(VertexKind::Net, HierName::parse(name), None, None)
}

/// Add a named vertex of any kind with a dtype.
///
/// # Arguments
///
/// * `builder` - The graph under construction
/// * `kind` - Vertex kind (not [`VertexKind::Logic`])
/// * `name` - Dotted hierarchical name
/// * `dtype` - Dtype in the registry the netlist will be paired with
pub fn add_typed(
    builder: &mut GraphBuilder,
    kind: VertexKind,
    name: &str,
    dtype: DTypeId,
) -> Result<VertexId> {
    builder.add_vertex(kind, HierName::parse(name), Some(dtype), None)
}

/// Add a logic statement reading `drivers` and writing `loads`.
///
/// Creates one logic vertex with an edge from each driver and an edge to
/// each load.
///
/// # Returns
///
/// The ID of the logic vertex.
pub fn add_assign(
    builder: &mut GraphBuilder,
    statement: &str,
    drivers: &[VertexId],
    loads: &[VertexId],
) -> Result<VertexId> {
    let logic = builder.add_logic(statement, None);
    for &driver in drivers {
        builder.add_edge(driver, logic)?;
    }
    for &load in loads {
        builder.add_edge(logic, load)?;
    }
    Ok(logic)
}

/// Chain vertices with direct edges: `a -> b -> c ...`.
pub fn connect(builder: &mut GraphBuilder, chain: &[VertexId]) -> Result<()> {
    for pair in chain.windows(2) {
        builder.add_edge(pair[0], pair[1])?;
    }
    Ok(())
}
