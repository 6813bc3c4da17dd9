//! Structural description loading.
//!
//! A description is the JSON document a compiler front end emits:
//!
//! ```json
//! {
//!   "files": ["adder.sv"],
//!   "dtypes": [{ "id": 7, "name": "logic", "kind": "basic", "range": [3, 0] }],
//!   "vertices": [
//!     { "id": 1, "kind": "input_port", "name": "adder.i_a", "dtype": 7,
//!       "location": { "file": 0, "line": 3, "column": 17 } },
//!     { "id": 2, "kind": "logic", "statement": "ASSIGNW" }
//!   ],
//!   "edges": [[1, 2]]
//! }
//! ```
//!
//! IDs in the document are external identities; loading maps them onto dense
//! internal IDs and rejects anything that dangles.

use crate::dtype::{DType, DTypeId, DTypeKind, DTypeRegistry, EnumItem, Member};
use crate::error::{NetlistError, Result};
use crate::graph::{GraphBuilder, HierName, Location, NetlistGraph, VertexKind};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Root of a structural description document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetlistDescription {
    /// Source files, referenced by index from locations
    #[serde(default)]
    pub files: Vec<String>,
    /// Data types
    #[serde(default)]
    pub dtypes: Vec<DTypeRecord>,
    /// Vertices
    pub vertices: Vec<VertexRecord>,
    /// Directed edges as `[source, target]` pairs of vertex IDs
    #[serde(default)]
    pub edges: Vec<(u64, u64)>,
}

/// Location as stored in a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Index into [`NetlistDescription::files`]
    pub file: usize,
    /// Line
    pub line: u32,
    /// Column
    #[serde(default)]
    pub column: u32,
}

/// One vertex of a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    /// External ID
    pub id: u64,
    /// Vertex kind
    pub kind: VertexKind,
    /// Dotted hierarchical name; absent for logic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// External dtype ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtype: Option<u64>,
    /// Declaration site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceRef>,
    /// Statement label for logic vertices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
}

/// One dtype of a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DTypeRecord {
    /// External ID
    pub id: u64,
    /// Type name
    #[serde(default)]
    pub name: String,
    /// Composition, referring to other dtypes by external ID
    #[serde(flatten)]
    pub kind: DTypeRecordKind,
    /// Declaration site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceRef>,
}

/// Member of a struct or union record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Member name
    pub name: String,
    /// External dtype ID
    pub dtype: u64,
}

/// Dtype composition in a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DTypeRecordKind {
    /// Basic type
    Basic {
        /// `[left, right]`
        #[serde(default)]
        range: Option<(i64, i64)>,
    },
    /// Typedef reference
    Ref {
        /// Referenced dtype
        target: u64,
    },
    /// Array
    Array {
        /// Element dtype
        element: u64,
        /// Left bound
        left: i64,
        /// Right bound
        right: i64,
        /// Packed or unpacked
        #[serde(default)]
        packed: bool,
    },
    /// Packed struct
    Struct {
        /// Members
        members: Vec<MemberRecord>,
    },
    /// Packed union
    Union {
        /// Members
        members: Vec<MemberRecord>,
    },
    /// Enumeration
    Enum {
        /// Base dtype
        base: u64,
        /// Constants
        #[serde(default)]
        items: Vec<EnumItem>,
    },
}

impl NetlistDescription {
    /// Parse a description from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Serialization`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| NetlistError::serialization("invalid netlist description", Some(e)))
    }

    /// Read and parse a description file.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Io`] if the file cannot be read, or
    /// [`NetlistError::Serialization`] on malformed JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading netlist description {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| NetlistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NetlistError::serialization("failed to encode description", Some(e)))
    }

    /// Build the graph and dtype registry.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::InvalidDescription`] for duplicate IDs or
    /// names, dangling references, bad file indices, or dtype cycles.
    pub fn build(&self) -> Result<(NetlistGraph, DTypeRegistry)> {
        let (dtypes, dtype_ids) = self.build_dtypes()?;
        let graph = self.build_graph(&dtype_ids)?;
        debug!(
            "Loaded description: {} vertices, {} edges, {} dtypes",
            graph.vertex_count(),
            graph.edge_count(),
            dtypes.len()
        );
        Ok((graph, dtypes))
    }

    fn location(&self, source: Option<SourceRef>) -> Result<Option<Location>> {
        source
            .map(|loc| {
                self.files
                    .get(loc.file)
                    .map(|file| Location::new(file.clone(), loc.line, loc.column))
                    .ok_or_else(|| {
                        NetlistError::invalid(format!("location references file {}", loc.file))
                    })
            })
            .transpose()
    }

    fn build_dtypes(&self) -> Result<(DTypeRegistry, HashMap<u64, DTypeId>)> {
        let mut ids = HashMap::with_capacity(self.dtypes.len());
        for (index, record) in self.dtypes.iter().enumerate() {
            if ids.insert(record.id, index).is_some() {
                return Err(NetlistError::invalid(format!(
                    "duplicate dtype id {}",
                    record.id
                )));
            }
        }
        let lookup = |external: u64| {
            ids.get(&external).copied().ok_or_else(|| {
                NetlistError::invalid(format!("reference to unknown dtype {external}"))
            })
        };
        let members = |records: &[MemberRecord]| -> Result<Vec<Member>> {
            records
                .iter()
                .map(|m| {
                    Ok(Member {
                        name: m.name.clone(),
                        dtype: lookup(m.dtype)?,
                    })
                })
                .collect()
        };

        let mut dtypes = Vec::with_capacity(self.dtypes.len());
        for (index, record) in self.dtypes.iter().enumerate() {
            let kind = match &record.kind {
                DTypeRecordKind::Basic { range } => DTypeKind::Basic { range: *range },
                DTypeRecordKind::Ref { target } => DTypeKind::Ref {
                    target: lookup(*target)?,
                },
                DTypeRecordKind::Array {
                    element,
                    left,
                    right,
                    packed,
                } => DTypeKind::Array {
                    element: lookup(*element)?,
                    left: *left,
                    right: *right,
                    packed: *packed,
                },
                DTypeRecordKind::Struct { members: m } => DTypeKind::Struct {
                    members: members(m)?,
                },
                DTypeRecordKind::Union { members: m } => DTypeKind::Union {
                    members: members(m)?,
                },
                DTypeRecordKind::Enum { base, items } => DTypeKind::Enum {
                    base: lookup(*base)?,
                    items: items.clone(),
                },
            };
            dtypes.push(DType {
                id: index,
                name: record.name.clone(),
                kind,
                location: self.location(record.location)?,
            });
        }
        Ok((DTypeRegistry::new(dtypes)?, ids))
    }

    fn build_graph(&self, dtype_ids: &HashMap<u64, DTypeId>) -> Result<NetlistGraph> {
        let mut builder = GraphBuilder::new();
        let mut ids = HashMap::with_capacity(self.vertices.len());
        for record in &self.vertices {
            let location = self.location(record.location)?;
            let id = if record.kind.is_logic() {
                builder.add_logic(
                    record.statement.clone().unwrap_or_else(|| "LOGIC".to_string()),
                    location,
                )
            } else {
                let name = record.name.as_deref().ok_or_else(|| {
                    NetlistError::invalid(format!("{} vertex {} has no name", record.kind, record.id))
                })?;
                let dtype = record
                    .dtype
                    .map(|external| {
                        dtype_ids.get(&external).copied().ok_or_else(|| {
                            NetlistError::invalid(format!(
                                "vertex {name} references unknown dtype {external}"
                            ))
                        })
                    })
                    .transpose()?;
                builder.add_vertex(record.kind, HierName::parse(name), dtype, location)?
            };
            if ids.insert(record.id, id).is_some() {
                return Err(NetlistError::invalid(format!(
                    "duplicate vertex id {}",
                    record.id
                )));
            }
        }
        for &(source, target) in &self.edges {
            let resolve = |external: u64| {
                ids.get(&external).copied().ok_or_else(|| {
                    NetlistError::invalid(format!(
                        "edge {source} -> {target} references unknown vertex {external}"
                    ))
                })
            };
            builder.add_edge(resolve(source)?, resolve(target)?)?;
        }
        Ok(builder.build())
    }
}
