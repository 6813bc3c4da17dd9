//! Export for visualizing netlists in external tools.
//!
//! - **DOT**: Graphviz rendering of a whole netlist or a single path

pub mod dot;

pub use dot::{export_dot, export_dot_styled, export_path_dot, DotOptions};
