//! Query configuration.
//!
//! An [`Options`] value is passed by reference into every query, so two
//! queries running side by side with different settings never interfere.

use crate::error::{NetlistError, Result};
use serde::{Deserialize, Serialize};

/// How point specifiers are compared against vertex names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Literal comparison (`/` accepted in place of `.`)
    #[default]
    Exact,
    /// Shell-style `*` and `?` wildcards over the whole name
    Wildcard,
    /// Regular expression searched for anywhere in the name
    Regex,
}

/// What to do when a specifier matches more than one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    /// Two or more matches is an ambiguous-match error
    #[default]
    RequireUnique,
    /// Every match becomes an independent seed
    AcceptAny,
}

/// Configuration read by the matcher and the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Specifier comparison mode
    pub match_mode: MatchMode,

    /// Treat `.`, `/` and `_` as the same hierarchy separator
    pub ignore_hierarchy_markers: bool,

    /// Let paths pass through registers
    pub traverse_registers: bool,

    /// Start points must be registers or input ports
    pub restrict_start_points: bool,

    /// Finish points must be registers or output ports
    pub restrict_end_points: bool,

    /// Policy for specifiers with several matches
    pub multiplicity: Multiplicity,

    /// A specifier with zero matches is an error (otherwise the query is empty)
    pub error_on_unmatched: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Exact,
            ignore_hierarchy_markers: false,
            traverse_registers: false,
            restrict_start_points: true,
            restrict_end_points: true,
            multiplicity: Multiplicity::RequireUnique,
            error_on_unmatched: true,
        }
    }
}

impl Options {
    /// Wildcard matching that accepts many matches.
    pub fn wildcard() -> Self {
        Self {
            match_mode: MatchMode::Wildcard,
            multiplicity: Multiplicity::AcceptAny,
            ..Default::default()
        }
    }

    /// Regex matching that accepts many matches.
    pub fn regex() -> Self {
        Self {
            match_mode: MatchMode::Regex,
            multiplicity: Multiplicity::AcceptAny,
            ..Default::default()
        }
    }

    /// Loose settings for exploring an unfamiliar design: markers ignored,
    /// registers transparent, any named vertex may start or finish.
    pub fn exploratory() -> Self {
        Self {
            match_mode: MatchMode::Wildcard,
            ignore_hierarchy_markers: true,
            traverse_registers: true,
            restrict_start_points: false,
            restrict_end_points: false,
            multiplicity: Multiplicity::AcceptAny,
            error_on_unmatched: false,
        }
    }

    /// Load options from a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Serialization`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| NetlistError::serialization("invalid options document", Some(e)))
    }

    /// Set the match mode
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set hierarchy-marker handling
    pub fn with_ignore_hierarchy_markers(mut self, ignore: bool) -> Self {
        self.ignore_hierarchy_markers = ignore;
        self
    }

    /// Set register traversal
    pub fn with_traverse_registers(mut self, traverse: bool) -> Self {
        self.traverse_registers = traverse;
        self
    }

    /// Set start-point restriction
    pub fn with_restrict_start_points(mut self, restrict: bool) -> Self {
        self.restrict_start_points = restrict;
        self
    }

    /// Set end-point restriction
    pub fn with_restrict_end_points(mut self, restrict: bool) -> Self {
        self.restrict_end_points = restrict;
        self
    }

    /// Set the multiplicity policy
    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    /// Set zero-match handling
    pub fn with_error_on_unmatched(mut self, error: bool) -> Self {
        self.error_on_unmatched = error;
        self
    }

    /// True when several matches are accepted.
    pub fn accepts_many(&self) -> bool {
        self.multiplicity == Multiplicity::AcceptAny
    }
}
