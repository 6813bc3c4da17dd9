//! Query descriptors.

use crate::error::{NetlistError, Result};
use serde::{Deserialize, Serialize};

/// Ordered waypoints of a path query: one start, ordered through points,
/// one finish, and an unordered set of points to avoid.
///
/// ```
/// use netlist_paths::Waypoints;
///
/// let waypoints = Waypoints::between("top.i_a", "top.o_sum")
///     .through("top.u_add.carry")
///     .avoid("top.u_add.bypass");
/// assert_eq!(waypoints.through_points().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoints {
    start: Option<String>,
    through: Vec<String>,
    finish: Option<String>,
    avoid: Vec<String>,
}

impl Waypoints {
    /// Empty waypoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waypoints with a start and a finish.
    pub fn between(start: impl Into<String>, finish: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            finish: Some(finish.into()),
            ..Default::default()
        }
    }

    /// Waypoints for a fan-out query.
    pub fn from_start(start: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            ..Default::default()
        }
    }

    /// Waypoints for a fan-in query.
    pub fn to_finish(finish: impl Into<String>) -> Self {
        Self {
            finish: Some(finish.into()),
            ..Default::default()
        }
    }

    /// Set the start point.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Usage`] if a start point is already set.
    pub fn set_start(&mut self, start: impl Into<String>) -> Result<()> {
        if self.start.is_some() {
            return Err(NetlistError::usage("start point already set"));
        }
        self.start = Some(start.into());
        Ok(())
    }

    /// Set the finish point.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Usage`] if a finish point is already set.
    pub fn set_finish(&mut self, finish: impl Into<String>) -> Result<()> {
        if self.finish.is_some() {
            return Err(NetlistError::usage("finish point already set"));
        }
        self.finish = Some(finish.into());
        Ok(())
    }

    /// Append a through point (order is significant).
    pub fn add_through(&mut self, point: impl Into<String>) {
        self.through.push(point.into());
    }

    /// Add a point to avoid.
    pub fn add_avoid(&mut self, point: impl Into<String>) {
        let point = point.into();
        if !self.avoid.contains(&point) {
            self.avoid.push(point);
        }
    }

    /// Builder form of [`Waypoints::add_through`].
    pub fn through(mut self, point: impl Into<String>) -> Self {
        self.add_through(point);
        self
    }

    /// Builder form of [`Waypoints::add_avoid`].
    pub fn avoid(mut self, point: impl Into<String>) -> Self {
        self.add_avoid(point);
        self
    }

    /// Start specifier
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Finish specifier
    pub fn finish(&self) -> Option<&str> {
        self.finish.as_deref()
    }

    /// Through specifiers in order
    pub fn through_points(&self) -> &[String] {
        &self.through
    }

    /// Avoid specifiers
    pub fn avoid_points(&self) -> &[String] {
        &self.avoid
    }

    /// Start and finish, both required for point-to-point queries.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Usage`] naming the missing endpoint.
    pub fn endpoints(&self) -> Result<(&str, &str)> {
        match (self.start(), self.finish()) {
            (Some(start), Some(finish)) => Ok((start, finish)),
            (None, _) => Err(NetlistError::usage("path query requires a start point")),
            (_, None) => Err(NetlistError::usage("path query requires a finish point")),
        }
    }

    /// The start point of a fan-out query.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Usage`] unless only a start point is set.
    pub fn fan_out_point(&self) -> Result<&str> {
        self.reject_waypoints("fan-out")?;
        if self.finish.is_some() {
            return Err(NetlistError::usage("fan-out query takes no finish point"));
        }
        self.start()
            .ok_or_else(|| NetlistError::usage("fan-out query requires a start point"))
    }

    /// The finish point of a fan-in query.
    ///
    /// # Errors
    ///
    /// Returns [`NetlistError::Usage`] unless only a finish point is set.
    pub fn fan_in_point(&self) -> Result<&str> {
        self.reject_waypoints("fan-in")?;
        if self.start.is_some() {
            return Err(NetlistError::usage("fan-in query takes no start point"));
        }
        self.finish()
            .ok_or_else(|| NetlistError::usage("fan-in query requires a finish point"))
    }

    fn reject_waypoints(&self, query: &str) -> Result<()> {
        if !self.through.is_empty() {
            return Err(NetlistError::usage(format!(
                "through points cannot be used with a {query} query"
            )));
        }
        if !self.avoid.is_empty() {
            return Err(NetlistError::usage(format!(
                "avoid points cannot be used with a {query} query"
            )));
        }
        Ok(())
    }
}
