//! Error types for netlist-paths operations.
//!
//! All fallible operations return [`Result<T>`]. Each variant corresponds to one
//! of the failure classes a caller needs to tell apart: a bad query, a name that
//! does not resolve, a failed compile, an unknown type, or a path request whose
//! start and finish roles are reversed.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for netlist-paths operations.
pub type Result<T> = std::result::Result<T, NetlistError>;

/// Why a point specifier failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Nothing in the netlist matched.
    NoMatch,
    /// More than one vertex matched while a unique match was required.
    Ambiguous {
        /// Number of matching vertices
        count: usize,
    },
}

impl std::fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionKind::NoMatch => write!(f, "no match"),
            ResolutionKind::Ambiguous { count } => write!(f, "{count} matches"),
        }
    }
}

/// Error type for all netlist operations.
#[derive(Error, Debug)]
pub enum NetlistError {
    /// Invalid combination of query inputs (e.g. through points on a fan-out).
    #[error("Usage error: {message}")]
    Usage {
        /// Description of the misuse
        message: String,
    },

    /// A point specifier matched nothing, or matched too much.
    #[error("Could not resolve {role} point '{specifier}': {kind}")]
    Resolution {
        /// The specifier as supplied by the caller
        specifier: String,
        /// Role the specifier was resolved for (start, finish, ...)
        role: String,
        /// Failure detail
        kind: ResolutionKind,
    },

    /// The external compiler failed; no netlist was produced.
    #[error("Compile error: {message}")]
    Compile {
        /// Compiler diagnostic
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A dtype or vertex lookup by name failed.
    #[error("{entity} not found: {name}")]
    NotFound {
        /// What was looked up ("dtype", "vertex")
        entity: String,
        /// The name that was not found
        name: String,
    },

    /// A path was requested from a finish point to a start point.
    #[error("Invalid path query: '{start}' is not a start point and '{finish}' is not a finish point (roles reversed)")]
    StructuralQuery {
        /// Start specifier
        start: String,
        /// Finish specifier
        finish: String,
    },

    /// The structural description is malformed or inconsistent.
    #[error("Invalid netlist description: {message}")]
    InvalidDescription {
        /// Description of the inconsistency
        message: String,
    },

    /// File I/O failure while reading a description or writing an export.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl NetlistError {
    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create an invalid-description error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidDescription {
            message: message.into(),
        }
    }

    /// Create a not-found error for the given entity kind.
    pub fn not_found(entity: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            name: name.into(),
        }
    }

    /// Create a compile error from a message and optional source.
    pub fn compile<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Compile {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// True for zero-match or ambiguous-match failures.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution { .. })
    }

    /// True for role-reversed path queries.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::StructuralQuery { .. })
    }
}
