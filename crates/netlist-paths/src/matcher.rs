//! Point-specifier resolution.
//!
//! A [`Matcher`] turns a user-typed specifier such as `top.u_core.data_q`,
//! `top/u_core/data_q`, `*data_q` or `top\..*_q` into graph vertices under the
//! match mode and eligibility rules of an [`Options`] value.
//!
//! Resolution happens in two steps: [`Matcher::candidates`] returns a tagged
//! [`Resolution`] describing how many vertices matched, and
//! [`Matcher::resolve`] applies the multiplicity and zero-match policies.

use crate::error::{NetlistError, ResolutionKind, Result};
use crate::graph::{NetlistGraph, Vertex, VertexId};
use crate::options::{MatchMode, Options};
use log::{debug, trace};
use regex::Regex;

/// The part a specifier plays in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Path start; eligibility restricted by `restrict_start_points`
    Start,
    /// Path finish; eligibility restricted by `restrict_end_points`
    Finish,
    /// Intermediate waypoint; any named vertex
    Through,
    /// Excluded vertex; any named vertex
    Avoid,
    /// Unrestricted lookup (listing, dtype queries)
    Any,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Start => write!(f, "start"),
            Role::Finish => write!(f, "finish"),
            Role::Through => write!(f, "through"),
            Role::Avoid => write!(f, "avoid"),
            Role::Any => write!(f, "named"),
        }
    }
}

/// Outcome of matching one specifier, before any policy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing matched
    None,
    /// Exactly one vertex matched
    Unique(VertexId),
    /// Two or more vertices matched, in ascending ID order
    Many(Vec<VertexId>),
}

impl Resolution {
    fn from_ids(mut ids: Vec<VertexId>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        match ids.len() {
            0 => Resolution::None,
            1 => Resolution::Unique(ids[0]),
            _ => Resolution::Many(ids),
        }
    }

    /// Number of matched vertices.
    pub fn len(&self) -> usize {
        match self {
            Resolution::None => 0,
            Resolution::Unique(_) => 1,
            Resolution::Many(ids) => ids.len(),
        }
    }

    /// True when nothing matched.
    pub fn is_none(&self) -> bool {
        matches!(self, Resolution::None)
    }

    /// Matched IDs in ascending order.
    pub fn ids(&self) -> Vec<VertexId> {
        match self {
            Resolution::None => Vec::new(),
            Resolution::Unique(id) => vec![*id],
            Resolution::Many(ids) => ids.clone(),
        }
    }
}

/// A compiled specifier.
#[derive(Debug, Clone)]
pub struct NamePattern {
    inner: PatternKind,
}

#[derive(Debug, Clone)]
enum PatternKind {
    /// Literal canonical name (markers already folded when ignored)
    Literal { name: String, fold_markers: bool },
    Pattern(Regex),
}

impl NamePattern {
    /// Compile `specifier` under the match mode of `options`.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Usage`] for a malformed regular expression.
    pub fn compile(specifier: &str, options: &Options) -> Result<Self> {
        let ignore = options.ignore_hierarchy_markers;
        let inner = match options.match_mode {
            MatchMode::Exact => {
                let name = if ignore {
                    fold_markers(specifier)
                } else {
                    specifier.replace('/', ".")
                };
                PatternKind::Literal {
                    name,
                    fold_markers: ignore,
                }
            }
            MatchMode::Wildcard => PatternKind::Pattern(anchored(&wildcard_to_regex(
                specifier, ignore,
            ))?),
            MatchMode::Regex => {
                let source = if ignore {
                    specifier.replace(['/', '_'], ".")
                } else {
                    specifier.to_string()
                };
                PatternKind::Pattern(compile_regex(&source)?)
            }
        };
        Ok(Self { inner })
    }

    /// True if the canonical dotted `name` matches.
    pub fn matches(&self, name: &str) -> bool {
        match &self.inner {
            PatternKind::Literal {
                name: literal,
                fold_markers: true,
            } => fold_markers(name) == *literal,
            PatternKind::Literal { name: literal, .. } => name == literal,
            PatternKind::Pattern(regex) => regex.is_match(name),
        }
    }

    /// The literal name to look up directly, when no scan is needed.
    fn literal(&self) -> Option<&str> {
        match &self.inner {
            PatternKind::Literal {
                name,
                fold_markers: false,
            } => Some(name),
            _ => None,
        }
    }
}

/// Map every hierarchy marker to `.`.
fn fold_markers(name: &str) -> String {
    name.replace(['/', '_'], ".")
}

fn wildcard_to_regex(specifier: &str, ignore_markers: bool) -> String {
    let mut out = String::with_capacity(specifier.len() * 2);
    for c in specifier.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '.' | '/' | '_' if ignore_markers => out.push_str("[._/]"),
            '/' => out.push_str(r"\."),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    out
}

fn anchored(pattern: &str) -> Result<Regex> {
    compile_regex(&format!("^(?:{pattern})$"))
}

/// Regex mode searches the name, so `data_q` finds every `*.data_q`.
fn compile_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| NetlistError::usage(format!("invalid pattern '{pattern}': {e}")))
}

/// Resolves specifiers against one graph under one set of options.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    graph: &'a NetlistGraph,
    options: &'a Options,
}

impl<'a> Matcher<'a> {
    /// Create a matcher.
    pub fn new(graph: &'a NetlistGraph, options: &'a Options) -> Self {
        Self { graph, options }
    }

    /// The options this matcher reads.
    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// True if `vertex` may fill `role` under the current options.
    pub fn is_eligible(&self, vertex: &Vertex, role: Role) -> bool {
        if !vertex.is_named() {
            return false;
        }
        match role {
            Role::Start if self.options.restrict_start_points => vertex.kind.is_start_kind(),
            Role::Finish if self.options.restrict_end_points => vertex.kind.is_finish_kind(),
            _ => true,
        }
    }

    /// Match `specifier` for `role` without applying any policy.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Usage`] for a malformed pattern.
    pub fn candidates(&self, specifier: &str, role: Role) -> Result<Resolution> {
        let pattern = NamePattern::compile(specifier, self.options)?;
        let ids: Vec<VertexId> = match pattern.literal() {
            Some(name) => self
                .graph
                .find_by_name(name)
                .filter(|v| self.is_eligible(v, role))
                .map(|v| v.id)
                .into_iter()
                .collect(),
            None => self
                .graph
                .named_vertices()
                .filter(|v| self.is_eligible(v, role) && pattern.matches(v.name()))
                .map(|v| v.id)
                .collect(),
        };
        let resolution = Resolution::from_ids(ids);
        trace!(
            "Specifier '{}' as {} matched {} vertices",
            specifier,
            role,
            resolution.len()
        );
        Ok(resolution)
    }

    /// Match `specifier` for `role` and apply the multiplicity and
    /// zero-match policies.
    ///
    /// Returns the seed set in ascending ID order. An empty set is only
    /// returned when `error_on_unmatched` is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Resolution`] on zero matches (when
    /// `error_on_unmatched` is set) or several matches (under
    /// [`Multiplicity::RequireUnique`](crate::options::Multiplicity)).
    pub fn resolve(&self, specifier: &str, role: Role) -> Result<Vec<VertexId>> {
        let resolution = self.candidates(specifier, role)?;
        self.apply_policy(specifier, role, resolution)
    }

    /// Apply the configured policy to a [`Resolution`].
    pub fn apply_policy(
        &self,
        specifier: &str,
        role: Role,
        resolution: Resolution,
    ) -> Result<Vec<VertexId>> {
        match resolution {
            Resolution::None if self.options.error_on_unmatched => {
                Err(resolution_error(specifier, role, ResolutionKind::NoMatch))
            }
            Resolution::None => {
                debug!("No {role} point matches '{specifier}', query will be empty");
                Ok(Vec::new())
            }
            Resolution::Unique(id) => Ok(vec![id]),
            Resolution::Many(ids) if self.options.accepts_many() => Ok(ids),
            Resolution::Many(ids) => Err(resolution_error(
                specifier,
                role,
                ResolutionKind::Ambiguous { count: ids.len() },
            )),
        }
    }

    /// Resolve a start/finish pair, detecting role-reversed requests.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::StructuralQuery`] when neither endpoint is
    /// eligible for its role but both are eligible for the opposite one;
    /// otherwise resolution errors as for [`Matcher::resolve`].
    pub fn resolve_endpoints(
        &self,
        start: &str,
        finish: &str,
    ) -> Result<(Vec<VertexId>, Vec<VertexId>)> {
        let starts = self.candidates(start, Role::Start)?;
        let finishes = self.candidates(finish, Role::Finish)?;
        if starts.is_none()
            && finishes.is_none()
            && !self.candidates(start, Role::Finish)?.is_none()
            && !self.candidates(finish, Role::Start)?.is_none()
        {
            return Err(NetlistError::StructuralQuery {
                start: start.to_string(),
                finish: finish.to_string(),
            });
        }
        let starts = self.apply_policy(start, Role::Start, starts)?;
        let finishes = self.apply_policy(finish, Role::Finish, finishes)?;
        Ok((starts, finishes))
    }
}

fn resolution_error(specifier: &str, role: Role, kind: ResolutionKind) -> NetlistError {
    NetlistError::Resolution {
        specifier: specifier.to_string(),
        role: role.to_string(),
        kind,
    }
}
