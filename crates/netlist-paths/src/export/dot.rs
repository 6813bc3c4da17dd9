//! DOT format export for Graphviz visualization.

use crate::graph::{NetlistGraph, Vertex, VertexId, VertexKind};
use crate::Result;
use std::collections::HashMap;
use std::fmt::Write;

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Fill colors by vertex kind (hex color codes)
    pub vertex_colors: HashMap<VertexKind, String>,
    /// Shapes by vertex kind (box, ellipse, ...)
    pub vertex_shapes: HashMap<VertexKind, String>,
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
    /// Append the source location to labels
    pub show_locations: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        let mut vertex_colors = HashMap::new();
        vertex_colors.insert(VertexKind::Register, "#FFE082".to_string());
        vertex_colors.insert(VertexKind::InputPort, "#A5D6A7".to_string());
        vertex_colors.insert(VertexKind::OutputPort, "#90CAF9".to_string());
        vertex_colors.insert(VertexKind::InoutPort, "#80CBC4".to_string());
        vertex_colors.insert(VertexKind::Net, "#E0E0E0".to_string());
        vertex_colors.insert(VertexKind::Variable, "#CE93D8".to_string());
        vertex_colors.insert(VertexKind::Logic, "#FFFFFF".to_string());

        let mut vertex_shapes = HashMap::new();
        vertex_shapes.insert(VertexKind::Register, "box3d".to_string());
        vertex_shapes.insert(VertexKind::InputPort, "invhouse".to_string());
        vertex_shapes.insert(VertexKind::OutputPort, "house".to_string());
        vertex_shapes.insert(VertexKind::InoutPort, "diamond".to_string());
        vertex_shapes.insert(VertexKind::Net, "ellipse".to_string());
        vertex_shapes.insert(VertexKind::Variable, "ellipse".to_string());
        vertex_shapes.insert(VertexKind::Logic, "box".to_string());

        DotOptions {
            vertex_colors,
            vertex_shapes,
            rankdir: "LR".to_string(),
            show_locations: false,
        }
    }
}

/// Export a netlist to Graphviz DOT format
pub fn export_dot(graph: &NetlistGraph) -> Result<String> {
    export_dot_styled(graph, &DotOptions::default())
}

/// Export a netlist to Graphviz DOT format with custom styling
pub fn export_dot_styled(graph: &NetlistGraph, options: &DotOptions) -> Result<String> {
    let vertices: Vec<&Vertex> = graph.vertices().collect();
    let edges: Vec<(VertexId, VertexId)> = graph.edges().collect();
    Ok(render("netlist", &vertices, &edges, options))
}

/// Export a single path as a chain of vertices.
///
/// # Errors
///
/// Returns [`NetlistError::NotFound`](crate::NetlistError::NotFound) if the
/// path names a vertex the graph does not have.
pub fn export_path_dot(graph: &NetlistGraph, path: &[VertexId]) -> Result<String> {
    let mut vertices: Vec<&Vertex> = Vec::with_capacity(path.len());
    for &id in path {
        let vertex = graph.vertex(id)?;
        if !vertices.iter().any(|v| v.id == id) {
            vertices.push(vertex);
        }
    }
    let edges: Vec<(VertexId, VertexId)> = path.windows(2).map(|w| (w[0], w[1])).collect();
    Ok(render("path", &vertices, &edges, &DotOptions::default()))
}

fn render(
    name: &str,
    vertices: &[&Vertex],
    edges: &[(VertexId, VertexId)],
    options: &DotOptions,
) -> String {
    let mut output = String::new();

    // Header
    let _ = writeln!(output, "digraph {name} {{");
    let _ = writeln!(output, "    rankdir={};", options.rankdir);
    output.push_str("    node [style=filled];\n\n");

    for vertex in vertices {
        let mut label = escape_dot_label(&vertex.label());
        if options.show_locations {
            if let Some(location) = &vertex.location {
                label.push_str("\\n");
                label.push_str(&escape_dot_label(&location.to_string()));
            }
        }
        let color = options
            .vertex_colors
            .get(&vertex.kind)
            .map(|s| s.as_str())
            .unwrap_or("#FFFFFF");
        let shape = options
            .vertex_shapes
            .get(&vertex.kind)
            .map(|s| s.as_str())
            .unwrap_or("box");
        let _ = writeln!(
            output,
            "    v{} [label=\"{label}\", shape={shape}, fillcolor=\"{color}\"];",
            vertex.id
        );
    }

    output.push('\n');

    for (source, target) in edges {
        let _ = writeln!(output, "    v{source} -> v{target};");
    }

    output.push_str("}\n");
    output
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
