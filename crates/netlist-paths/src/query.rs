//! Fluent listing queries over vertices and dtypes.
//!
//! ```
//! use netlist_paths::{Netlist, Options, VertexSortKey};
//!
//! # fn example(netlist: &Netlist) -> netlist_paths::Result<()> {
//! let options = Options::wildcard();
//! let registers = netlist
//!     .query(&options)
//!     .registers()
//!     .pattern("top.u_core.*")?
//!     .sort_by(VertexSortKey::Name)
//!     .execute();
//! # Ok(())
//! # }
//! ```

use crate::dtype::{DType, DTypeRegistry};
use crate::error::Result;
use crate::graph::{NetlistGraph, Vertex, VertexKind};
use crate::matcher::NamePattern;
use crate::options::Options;
use std::cmp::Ordering;

/// A filter predicate applied to vertices.
type VertexFilter<'a> = Box<dyn Fn(&Vertex) -> bool + 'a>;

/// Sort order for vertex listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexSortKey {
    /// Hierarchical name
    #[default]
    Name,
    /// Vertex kind, then name
    Kind,
    /// Dtype description, then name
    DType,
    /// Port direction, then name
    Direction,
}

/// Sort order for dtype listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DTypeSortKey {
    /// Type name
    #[default]
    Name,
    /// Description string, then name
    Description,
}

/// Fluent vertex query. Only named vertices are ever listed.
pub struct VertexQuery<'a> {
    graph: &'a NetlistGraph,
    dtypes: &'a DTypeRegistry,
    options: &'a Options,
    filters: Vec<VertexFilter<'a>>,
    sort_key: Option<VertexSortKey>,
    limit_value: Option<usize>,
}

impl<'a> VertexQuery<'a> {
    /// Create a query over `graph`.
    pub fn new(graph: &'a NetlistGraph, dtypes: &'a DTypeRegistry, options: &'a Options) -> Self {
        Self {
            graph,
            dtypes,
            options,
            filters: Vec::new(),
            sort_key: None,
            limit_value: None,
        }
    }

    /// Keep only the given kinds.
    pub fn kinds(mut self, kinds: &[VertexKind]) -> Self {
        let kinds = kinds.to_vec();
        self.filters.push(Box::new(move |v| kinds.contains(&v.kind)));
        self
    }

    /// Keep only ports.
    pub fn ports(mut self) -> Self {
        self.filters.push(Box::new(|v| v.kind.is_port()));
        self
    }

    /// Keep only registers.
    pub fn registers(mut self) -> Self {
        self.filters.push(Box::new(|v| v.is_register()));
        self
    }

    /// Keep only vertices with a dtype.
    pub fn typed(mut self) -> Self {
        self.filters.push(Box::new(|v| v.dtype.is_some()));
        self
    }

    /// Keep names matching `specifier` under the query's match mode.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Usage`](crate::NetlistError::Usage) for a
    /// malformed regular expression.
    pub fn pattern(mut self, specifier: &str) -> Result<Self> {
        let pattern = NamePattern::compile(specifier, self.options)?;
        self.filters.push(Box::new(move |v| pattern.matches(v.name())));
        Ok(self)
    }

    /// Keep vertices satisfying a custom predicate.
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Vertex) -> bool + 'a,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Sort results. Ties are broken by name.
    pub fn sort_by(mut self, key: VertexSortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    /// Limit the number of results returned.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit_value = Some(n);
        self
    }

    /// Execute the query. Unsorted results come in vertex ID order.
    pub fn execute(&self) -> Vec<&'a Vertex> {
        let mut results: Vec<&'a Vertex> = self
            .graph
            .named_vertices()
            .filter(|v| self.matches_filters(v))
            .collect();
        if let Some(key) = self.sort_key {
            results.sort_by(|a, b| self.compare(key, a, b).then_with(|| a.name().cmp(b.name())));
        }
        if let Some(limit) = self.limit_value {
            results.truncate(limit);
        }
        results
    }

    /// Count matching vertices.
    pub fn count(&self) -> usize {
        self.graph
            .named_vertices()
            .filter(|v| self.matches_filters(v))
            .count()
    }

    /// True if any vertex matches.
    pub fn exists(&self) -> bool {
        self.graph.named_vertices().any(|v| self.matches_filters(v))
    }

    fn matches_filters(&self, vertex: &Vertex) -> bool {
        self.filters.iter().all(|filter| filter(vertex))
    }

    fn compare(&self, key: VertexSortKey, a: &Vertex, b: &Vertex) -> Ordering {
        match key {
            VertexSortKey::Name => Ordering::Equal,
            VertexSortKey::Kind => a.kind.cmp(&b.kind),
            VertexSortKey::DType => self.dtype_str(a).cmp(&self.dtype_str(b)),
            VertexSortKey::Direction => a.direction().cmp(&b.direction()),
        }
    }

    fn dtype_str(&self, vertex: &Vertex) -> String {
        vertex
            .dtype
            .map(|id| self.dtypes.describe(id))
            .unwrap_or_default()
    }
}

/// Fluent dtype query.
pub struct DTypeQuery<'a> {
    dtypes: &'a DTypeRegistry,
    options: &'a Options,
    pattern: Option<NamePattern>,
    named_only: bool,
    sort_key: Option<DTypeSortKey>,
}

impl<'a> DTypeQuery<'a> {
    /// Create a query over `dtypes`.
    pub fn new(dtypes: &'a DTypeRegistry, options: &'a Options) -> Self {
        Self {
            dtypes,
            options,
            pattern: None,
            named_only: true,
            sort_key: None,
        }
    }

    /// Keep names matching `specifier` under the query's match mode.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Usage`](crate::NetlistError::Usage) for a
    /// malformed regular expression.
    pub fn pattern(mut self, specifier: &str) -> Result<Self> {
        self.pattern = Some(NamePattern::compile(specifier, self.options)?);
        Ok(self)
    }

    /// Include anonymous dtypes (arrays) as well.
    pub fn include_anonymous(mut self) -> Self {
        self.named_only = false;
        self
    }

    /// Sort results. Ties are broken by name.
    pub fn sort_by(mut self, key: DTypeSortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    /// Execute the query, returning each dtype with its description.
    pub fn execute(&self) -> Vec<(&'a DType, String)> {
        let mut results: Vec<(&'a DType, String)> = self
            .dtypes
            .iter()
            .filter(|d| !self.named_only || !d.name.is_empty())
            .filter(|d| self.pattern.as_ref().map_or(true, |p| p.matches(&d.name)))
            .map(|d| (d, self.dtypes.describe(d.id)))
            .collect();
        match self.sort_key {
            Some(DTypeSortKey::Name) => results.sort_by(|a, b| a.0.name.cmp(&b.0.name)),
            Some(DTypeSortKey::Description) => {
                results.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.name.cmp(&b.0.name)))
            }
            None => {}
        }
        results
    }
}
