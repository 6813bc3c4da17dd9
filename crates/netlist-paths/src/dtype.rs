//! Data-type descriptors and the registry that resolves them.
//!
//! Widths follow the packed-data rules of the source language:
//!
//! | Kind            | Width                                   |
//! |-----------------|-----------------------------------------|
//! | basic           | `|left - right| + 1`, or 1 when unranged |
//! | ref / enum      | width of the referenced type            |
//! | packed array    | element width x element count           |
//! | unpacked array  | 0 (not a vector)                        |
//! | struct          | sum of member widths                    |
//! | union           | max of member widths                    |
//!
//! Every width is computed once, bottom-up, when the registry is built.

use crate::error::{NetlistError, Result};
use crate::graph::Location;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense identifier for a dtype (index into the registry).
pub type DTypeId = usize;

/// Named member of a struct or union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member name
    pub name: String,
    /// Member type
    pub dtype: DTypeId,
}

/// Named enumeration constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumItem {
    /// Constant name
    pub name: String,
    /// Constant value as written by the compiler
    pub value: String,
}

/// Structural composition of a dtype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DTypeKind {
    /// Scalar or vector of a built-in type, e.g. `[3:0] logic`
    Basic {
        /// Optional `[left:right]` range
        range: Option<(i64, i64)>,
    },
    /// Typedef reference to another dtype
    Ref {
        /// Referenced type
        target: DTypeId,
    },
    /// Packed or unpacked array
    Array {
        /// Element type
        element: DTypeId,
        /// Left bound
        left: i64,
        /// Right bound
        right: i64,
        /// Packed arrays contribute to width, unpacked ones do not
        packed: bool,
    },
    /// Packed struct
    Struct {
        /// Members in declaration order
        members: Vec<Member>,
    },
    /// Packed union
    Union {
        /// Members in declaration order
        members: Vec<Member>,
    },
    /// Enumeration over a base type
    Enum {
        /// Base type
        base: DTypeId,
        /// Constants
        items: Vec<EnumItem>,
    },
}

/// A data-type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DType {
    /// Identifier (index in the registry)
    pub id: DTypeId,
    /// Type name; empty for anonymous arrays
    pub name: String,
    /// Composition
    #[serde(flatten)]
    pub kind: DTypeKind,
    /// Declaration site
    pub location: Option<Location>,
}

impl DType {
    fn referenced(&self) -> Vec<DTypeId> {
        match &self.kind {
            DTypeKind::Basic { .. } => Vec::new(),
            DTypeKind::Ref { target } => vec![*target],
            DTypeKind::Array { element, .. } => vec![*element],
            DTypeKind::Struct { members } | DTypeKind::Union { members } => {
                members.iter().map(|m| m.dtype).collect()
            }
            DTypeKind::Enum { base, .. } => vec![*base],
        }
    }
}

/// Immutable set of dtypes with precomputed widths.
#[derive(Debug, Clone, Default)]
pub struct DTypeRegistry {
    dtypes: Vec<DType>,
    widths: Vec<usize>,
    names: HashMap<String, DTypeId>,
}

impl DTypeRegistry {
    /// Build a registry from dtypes whose IDs equal their positions.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::InvalidDescription`] on misnumbered IDs,
    /// dangling references, or reference cycles.
    pub fn new(dtypes: Vec<DType>) -> Result<Self> {
        for (index, dtype) in dtypes.iter().enumerate() {
            if dtype.id != index {
                return Err(NetlistError::invalid(format!(
                    "dtype {} stored at position {index}",
                    dtype.id
                )));
            }
            if let Some(bad) = dtype.referenced().into_iter().find(|&r| r >= dtypes.len()) {
                return Err(NetlistError::invalid(format!(
                    "dtype {} references unknown dtype {bad}",
                    dtype.id
                )));
            }
        }

        let mut memo: Vec<Option<usize>> = vec![None; dtypes.len()];
        let mut in_progress = vec![false; dtypes.len()];
        for id in 0..dtypes.len() {
            compute_width(&dtypes, id, &mut memo, &mut in_progress)?;
        }
        let widths = memo.into_iter().map(|w| w.unwrap_or(0)).collect();

        // First declaration wins when several dtypes share a name.
        let mut names = HashMap::new();
        for dtype in &dtypes {
            if !dtype.name.is_empty() {
                names.entry(dtype.name.clone()).or_insert(dtype.id);
            }
        }
        debug!("Built dtype registry with {} dtypes", dtypes.len());
        Ok(Self {
            dtypes,
            widths,
            names,
        })
    }

    /// Get a dtype by ID.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::NotFound`] for an unknown ID.
    pub fn get(&self, id: DTypeId) -> Result<&DType> {
        self.dtypes
            .get(id)
            .ok_or_else(|| NetlistError::not_found("dtype", id.to_string()))
    }

    /// Resolve a dtype by name, falling back to its description string
    /// (so both `packed_struct_t` and `[3:0] logic` resolve).
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::NotFound`] if nothing matches.
    pub fn resolve(&self, name_or_description: &str) -> Result<&DType> {
        if let Some(&id) = self.names.get(name_or_description) {
            return Ok(&self.dtypes[id]);
        }
        self.dtypes
            .iter()
            .find(|d| self.describe(d.id) == name_or_description)
            .ok_or_else(|| NetlistError::not_found("dtype", name_or_description))
    }

    /// Width in bits of the dtype with the given ID (0 for unknown IDs).
    pub fn width(&self, id: DTypeId) -> usize {
        self.widths.get(id).copied().unwrap_or(0)
    }

    /// Width in bits of a dtype resolved by name or description.
    pub fn width_of(&self, name_or_description: &str) -> Result<usize> {
        self.resolve(name_or_description).map(|d| self.width(d.id))
    }

    /// Human-readable description, e.g. `[3:0] packed struct [7:0]`.
    pub fn describe(&self, id: DTypeId) -> String {
        self.describe_with_suffix(id, "")
    }

    // Unpacked dimensions are carried in `suffix`, innermost appended last.
    fn describe_with_suffix(&self, id: DTypeId, suffix: &str) -> String {
        let Some(dtype) = self.dtypes.get(id) else {
            return format!("<unknown>{suffix}");
        };
        match &dtype.kind {
            DTypeKind::Basic { range: Some((left, right)) } => {
                format!("[{left}:{right}] {}{suffix}", dtype.name)
            }
            DTypeKind::Basic { range: None } => format!("{}{suffix}", dtype.name),
            DTypeKind::Ref { target } => self.describe_with_suffix(*target, suffix),
            DTypeKind::Array {
                element,
                left,
                right,
                packed: true,
            } => format!("[{left}:{right}] {}{suffix}", self.describe(*element)),
            DTypeKind::Array {
                element,
                left,
                right,
                packed: false,
            } => self.describe_with_suffix(*element, &format!("{suffix} [{left}:{right}]")),
            DTypeKind::Struct { .. } => format!("packed struct{suffix}"),
            DTypeKind::Union { .. } => format!("packed union{suffix}"),
            DTypeKind::Enum { base, .. } => self.describe_with_suffix(*base, suffix),
        }
    }

    /// All dtypes in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &DType> {
        self.dtypes.iter()
    }

    /// Number of dtypes.
    pub fn len(&self) -> usize {
        self.dtypes.len()
    }

    /// True if the registry holds no dtypes.
    pub fn is_empty(&self) -> bool {
        self.dtypes.is_empty()
    }
}

fn compute_width(
    dtypes: &[DType],
    id: DTypeId,
    memo: &mut [Option<usize>],
    in_progress: &mut [bool],
) -> Result<usize> {
    if let Some(width) = memo[id] {
        return Ok(width);
    }
    if in_progress[id] {
        return Err(NetlistError::invalid(format!(
            "dtype {id} ({}) is defined in terms of itself",
            dtypes[id].name
        )));
    }
    in_progress[id] = true;
    let width = match &dtypes[id].kind {
        DTypeKind::Basic { range: Some((left, right)) } => left.abs_diff(*right) as usize + 1,
        DTypeKind::Basic { range: None } => 1,
        DTypeKind::Ref { target } => compute_width(dtypes, *target, memo, in_progress)?,
        DTypeKind::Enum { base, .. } => compute_width(dtypes, *base, memo, in_progress)?,
        DTypeKind::Array {
            element,
            left,
            right,
            packed,
        } => {
            let element_width = compute_width(dtypes, *element, memo, in_progress)?;
            if *packed {
                element_width * (left.abs_diff(*right) as usize + 1)
            } else {
                0
            }
        }
        DTypeKind::Struct { members } => {
            let mut sum = 0;
            for member in members {
                sum += compute_width(dtypes, member.dtype, memo, in_progress)?;
            }
            sum
        }
        DTypeKind::Union { members } => {
            let mut max = 0;
            for member in members {
                max = max.max(compute_width(dtypes, member.dtype, memo, in_progress)?);
            }
            max
        }
    };
    in_progress[id] = false;
    memo[id] = Some(width);
    Ok(width)
}

/// Incremental construction of a [`DTypeRegistry`].
///
/// IDs are handed out in insertion order, so members must be added before the
/// aggregates that contain them.
#[derive(Debug, Default)]
pub struct DTypeBuilder {
    dtypes: Vec<DType>,
}

impl DTypeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dtype with an explicit kind.
    pub fn add(&mut self, name: impl Into<String>, kind: DTypeKind) -> DTypeId {
        let id = self.dtypes.len();
        self.dtypes.push(DType {
            id,
            name: name.into(),
            kind,
            location: None,
        });
        id
    }

    /// Add an unranged basic type (`logic`, `bit`, ...).
    pub fn scalar(&mut self, name: &str) -> DTypeId {
        self.add(name, DTypeKind::Basic { range: None })
    }

    /// Add a ranged basic type, e.g. `[3:0] logic`.
    pub fn vector(&mut self, name: &str, left: i64, right: i64) -> DTypeId {
        self.add(
            name,
            DTypeKind::Basic {
                range: Some((left, right)),
            },
        )
    }

    /// Add an anonymous array.
    pub fn array(&mut self, element: DTypeId, left: i64, right: i64, packed: bool) -> DTypeId {
        self.add(
            "",
            DTypeKind::Array {
                element,
                left,
                right,
                packed,
            },
        )
    }

    /// Add a packed struct.
    pub fn structure(&mut self, name: &str, members: &[(&str, DTypeId)]) -> DTypeId {
        self.add(name, DTypeKind::Struct { members: to_members(members) })
    }

    /// Add a packed union.
    pub fn union(&mut self, name: &str, members: &[(&str, DTypeId)]) -> DTypeId {
        self.add(name, DTypeKind::Union { members: to_members(members) })
    }

    /// Add an enum over `base`.
    pub fn enumeration(&mut self, name: &str, base: DTypeId, items: &[(&str, &str)]) -> DTypeId {
        let items = items
            .iter()
            .map(|(n, v)| EnumItem {
                name: n.to_string(),
                value: v.to_string(),
            })
            .collect();
        self.add(name, DTypeKind::Enum { base, items })
    }

    /// Add a typedef reference.
    pub fn reference(&mut self, name: &str, target: DTypeId) -> DTypeId {
        self.add(name, DTypeKind::Ref { target })
    }

    /// Freeze into a registry.
    pub fn build(self) -> Result<DTypeRegistry> {
        DTypeRegistry::new(self.dtypes)
    }
}

fn to_members(members: &[(&str, DTypeId)]) -> Vec<Member> {
    members
        .iter()
        .map(|(name, dtype)| Member {
            name: name.to_string(),
            dtype: *dtype,
        })
        .collect()
}
