//! # netlist-paths
//!
//! Structural path queries over compiled digital-circuit netlists: does a path
//! exist between two points, what are all the paths, and what fans out of or
//! into a point.
//!
//! ## Core Principles
//!
//! - **Immutable Netlist**: The graph is built once and only ever read
//! - **Explicit Options**: Every query takes its configuration as an argument
//! - **Bounded Search**: All-paths enumeration always runs under caller limits
//! - **Compiler Agnostic**: Bring a front end, we handle the graph
//!
//! ## Architecture
//!
//! ```text
//! Netlist (facade)
//!     ↓
//! PathSearch (any / all / fan-out / fan-in)
//!     ↓
//! Matcher (specifier -> vertices) + Waypoints
//!     ↓
//! NetlistGraph + DTypeRegistry
//!     ↓
//! NetlistDescription (JSON from a compiler front end)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use netlist_paths::{Netlist, Options, SearchLimits, Waypoints};
//!
//! let netlist = Netlist::from_file("pipeline.json").unwrap();
//! let options = Options::default().with_traverse_registers(true);
//!
//! let waypoints = Waypoints::between("pipeline.i_data", "pipeline.o_data")
//!     .through("pipeline.g_pipestage[2].u_pipestage.data_q");
//! let paths = netlist
//!     .all_paths(&waypoints, &options, SearchLimits::new(100))
//!     .unwrap();
//! for (number, path) in paths.numbered() {
//!     println!("Path {number}: {} vertices", path.len());
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod description;
pub mod dtype;
pub mod error;
pub mod export;
pub mod graph;
pub mod helpers;
pub mod matcher;
pub mod netlist;
pub mod options;
pub mod query;
pub mod search;
pub mod waypoints;

// Re-export main types
pub use description::NetlistDescription;
pub use dtype::{DType, DTypeBuilder, DTypeId, DTypeKind, DTypeRegistry};
pub use error::{NetlistError, ResolutionKind, Result};
pub use graph::{
    Direction, GraphBuilder, HierName, Location, NetlistGraph, PortDirection, Vertex, VertexId,
    VertexKind,
};
pub use matcher::{Matcher, Resolution, Role};
pub use netlist::Netlist;
pub use options::{MatchMode, Multiplicity, Options};
pub use query::{DTypeQuery, DTypeSortKey, VertexQuery, VertexSortKey};
pub use search::{Path, PathSearch, PathSet, SearchLimits};
pub use waypoints::Waypoints;
