//! The [`Netlist`] facade: a loaded design and every query over it.

use crate::description::NetlistDescription;
use crate::dtype::DTypeRegistry;
use crate::error::{NetlistError, ResolutionKind, Result};
use crate::export::dot::export_dot;
use crate::graph::{NetlistGraph, Vertex};
use crate::matcher::{Matcher, Resolution, Role};
use crate::options::Options;
use crate::query::{DTypeQuery, VertexQuery};
use crate::search::{Path, PathSearch, PathSet, SearchLimits};
use crate::waypoints::Waypoints;
use log::info;
use std::path::Path as FsPath;

/// A loaded netlist: the immutable graph plus its dtypes.
///
/// Every query takes its [`Options`] explicitly, so one `Netlist` can be
/// shared between threads running queries with different settings.
///
/// # Examples
///
/// ```
/// use netlist_paths::{helpers, DTypeRegistry, GraphBuilder, Netlist, Options, Waypoints};
///
/// # fn main() -> netlist_paths::Result<()> {
/// let mut builder = GraphBuilder::new();
/// let a = helpers::add_input(&mut builder, "adder.i_a")?;
/// let sum = helpers::add_output(&mut builder, "adder.o_sum")?;
/// helpers::add_assign(&mut builder, "ASSIGNW", &[a], &[sum])?;
/// let netlist = Netlist::new(builder.build(), DTypeRegistry::default());
///
/// let options = Options::default();
/// assert!(netlist.path_exists(&Waypoints::between("adder.i_a", "adder.o_sum"), &options)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Netlist {
    graph: NetlistGraph,
    dtypes: DTypeRegistry,
}

impl Netlist {
    /// Wrap a graph and its dtypes. Consistency warnings are logged.
    pub fn new(graph: NetlistGraph, dtypes: DTypeRegistry) -> Self {
        let warnings = graph.check();
        info!(
            "Netlist ready: {} vertices, {} edges, {} dtypes, {} warnings",
            graph.vertex_count(),
            graph.edge_count(),
            dtypes.len(),
            warnings
        );
        Self { graph, dtypes }
    }

    /// Build from a parsed description.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::InvalidDescription`] for inconsistent input.
    pub fn from_description(description: &NetlistDescription) -> Result<Self> {
        let (graph, dtypes) = description.build()?;
        Ok(Self::new(graph, dtypes))
    }

    /// Build from JSON description text.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_description(&NetlistDescription::from_json(json)?)
    }

    /// Build from a JSON description file.
    pub fn from_file(path: impl AsRef<FsPath>) -> Result<Self> {
        Self::from_description(&NetlistDescription::from_file(path)?)
    }

    /// The graph.
    pub fn graph(&self) -> &NetlistGraph {
        &self.graph
    }

    /// The dtype registry.
    pub fn dtype_registry(&self) -> &DTypeRegistry {
        &self.dtypes
    }

    /// A matcher bound to `options`.
    pub fn matcher<'a>(&'a self, options: &'a Options) -> Matcher<'a> {
        Matcher::new(&self.graph, options)
    }

    /// A search engine bound to `options`.
    pub fn search<'a>(&'a self, options: &'a Options) -> PathSearch<'a> {
        PathSearch::new(&self.graph, options)
    }

    // Existence checks. Zero matches is `false`, never an error; several
    // matches need `Multiplicity::AcceptAny` unless the `any_` form is used.

    fn exists(&self, specifier: &str, role: Role, options: &Options, any: bool) -> Result<bool> {
        let matcher = self.matcher(options);
        match matcher.candidates(specifier, role)? {
            Resolution::None => Ok(false),
            Resolution::Unique(_) => Ok(true),
            many @ Resolution::Many(_) if !any => matcher
                .apply_policy(specifier, role, many)
                .map(|ids| !ids.is_empty()),
            Resolution::Many(_) => Ok(true),
        }
    }

    /// True if `specifier` names a start-eligible vertex.
    ///
    /// # Errors
    ///
    /// Ambiguous matches under `RequireUnique`; malformed patterns.
    pub fn startpoint_exists(&self, specifier: &str, options: &Options) -> Result<bool> {
        self.exists(specifier, Role::Start, options, false)
    }

    /// True if `specifier` names a finish-eligible vertex.
    ///
    /// # Errors
    ///
    /// Ambiguous matches under `RequireUnique`; malformed patterns.
    pub fn endpoint_exists(&self, specifier: &str, options: &Options) -> Result<bool> {
        self.exists(specifier, Role::Finish, options, false)
    }

    /// True if `specifier` names at least one start-eligible vertex.
    pub fn any_startpoint_exists(&self, specifier: &str, options: &Options) -> Result<bool> {
        self.exists(specifier, Role::Start, options, true)
    }

    /// True if `specifier` names at least one finish-eligible vertex.
    pub fn any_endpoint_exists(&self, specifier: &str, options: &Options) -> Result<bool> {
        self.exists(specifier, Role::Finish, options, true)
    }

    /// True if `specifier` names exactly one register (or any number under
    /// `AcceptAny`).
    ///
    /// # Errors
    ///
    /// Ambiguous matches under `RequireUnique`; malformed patterns.
    pub fn reg_exists(&self, specifier: &str, options: &Options) -> Result<bool> {
        self.register_exists(specifier, options, false)
    }

    /// True if `specifier` names at least one register.
    pub fn any_reg_exists(&self, specifier: &str, options: &Options) -> Result<bool> {
        self.register_exists(specifier, options, true)
    }

    fn register_exists(&self, specifier: &str, options: &Options, any: bool) -> Result<bool> {
        let matcher = self.matcher(options);
        let registers: Vec<_> = matcher
            .candidates(specifier, Role::Any)?
            .ids()
            .into_iter()
            .filter(|&id| self.graph.vertex(id).map(Vertex::is_register).unwrap_or(false))
            .collect();
        match registers.len() {
            0 => Ok(false),
            1 => Ok(true),
            _ if any || options.accepts_many() => Ok(true),
            count => Err(NetlistError::Resolution {
                specifier: specifier.to_string(),
                role: "register".to_string(),
                kind: ResolutionKind::Ambiguous { count },
            }),
        }
    }

    /// True if a path satisfies `waypoints`.
    pub fn path_exists(&self, waypoints: &Waypoints, options: &Options) -> Result<bool> {
        self.search(options).path_exists(waypoints)
    }

    /// One path satisfying `waypoints`, empty if none.
    pub fn any_path(&self, waypoints: &Waypoints, options: &Options) -> Result<Path> {
        self.search(options).any_path(waypoints)
    }

    /// Every simple path satisfying `waypoints`, within `limits`.
    pub fn all_paths(
        &self,
        waypoints: &Waypoints,
        options: &Options,
        limits: SearchLimits,
    ) -> Result<PathSet> {
        self.search(options).all_paths(waypoints, limits)
    }

    /// Paths from `start` to every reachable finish-eligible vertex.
    pub fn fan_out(&self, start: &str, options: &Options) -> Result<Vec<Path>> {
        self.search(options).fan_out(&Waypoints::from_start(start))
    }

    /// Paths to `finish` from every start-eligible vertex reaching it.
    pub fn fan_in(&self, finish: &str, options: &Options) -> Result<Vec<Path>> {
        self.search(options).fan_in(&Waypoints::to_finish(finish))
    }

    /// The vertex a specifier names uniquely (any named kind).
    ///
    /// Uniqueness is required under every multiplicity policy.
    ///
    /// # Errors
    ///
    /// [`NetlistError::NotFound`] when nothing matches; an ambiguous
    /// resolution error when several do.
    pub fn vertex(&self, specifier: &str, options: &Options) -> Result<&Vertex> {
        match self.matcher(options).candidates(specifier, Role::Any)? {
            Resolution::None => Err(NetlistError::not_found("vertex", specifier)),
            Resolution::Unique(id) => self.graph.vertex(id),
            Resolution::Many(ids) => Err(NetlistError::Resolution {
                specifier: specifier.to_string(),
                role: Role::Any.to_string(),
                kind: ResolutionKind::Ambiguous { count: ids.len() },
            }),
        }
    }

    fn vertex_dtype(&self, specifier: &str, options: &Options) -> Result<usize> {
        let vertex = self.vertex(specifier, options)?;
        vertex
            .dtype
            .ok_or_else(|| NetlistError::not_found("dtype of vertex", vertex.name()))
    }

    /// Description of the dtype of the vertex `specifier` names.
    pub fn vertex_dtype_str(&self, specifier: &str, options: &Options) -> Result<String> {
        let dtype = self.vertex_dtype(specifier, options)?;
        Ok(self.dtypes.describe(dtype))
    }

    /// Width of the dtype of the vertex `specifier` names.
    pub fn vertex_dtype_width(&self, specifier: &str, options: &Options) -> Result<usize> {
        let dtype = self.vertex_dtype(specifier, options)?;
        Ok(self.dtypes.width(dtype))
    }

    /// Width of a dtype by name or description.
    ///
    /// # Errors
    ///
    /// [`NetlistError::NotFound`] for an unknown dtype.
    pub fn dtype_width(&self, name: &str) -> Result<usize> {
        self.dtypes.width_of(name)
    }

    /// Named vertices sorted by name.
    pub fn named_vertices(&self) -> Vec<&Vertex> {
        let mut vertices: Vec<&Vertex> = self.graph.named_vertices().collect();
        vertices.sort_by(|a, b| a.name().cmp(b.name()));
        vertices
    }

    /// Fluent vertex listing.
    pub fn query<'a>(&'a self, options: &'a Options) -> VertexQuery<'a> {
        VertexQuery::new(&self.graph, &self.dtypes, options)
    }

    /// Fluent dtype listing.
    pub fn dtypes<'a>(&'a self, options: &'a Options) -> DTypeQuery<'a> {
        DTypeQuery::new(&self.dtypes, options)
    }

    /// Write the whole netlist as a Graphviz file.
    ///
    /// # Errors
    ///
    /// [`NetlistError::Io`] if the file cannot be written.
    pub fn dump_dot(&self, path: impl AsRef<FsPath>) -> Result<()> {
        let path = path.as_ref();
        let dot = export_dot(&self.graph)?;
        std::fs::write(path, dot).map_err(|source| NetlistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}
