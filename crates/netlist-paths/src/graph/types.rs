//! Core graph types: vertices, names, locations, IDs, and enums.

use crate::dtype::DTypeId;
use serde::{Deserialize, Serialize, Serializer};

/// Dense identifier for a vertex (index into the graph's vertex table).
pub type VertexId = usize;

/// Kind of a netlist vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexKind {
    /// Flip-flop or latch output
    Register,
    /// Top-level input port
    InputPort,
    /// Top-level output port
    OutputPort,
    /// Top-level bidirectional port
    InoutPort,
    /// Wire or net
    Net,
    /// Any other named variable
    Variable,
    /// Unnamed logic statement (assignment, always block, ...)
    Logic,
}

impl VertexKind {
    /// Registers and ports can begin a path.
    pub fn is_start_kind(self) -> bool {
        matches!(
            self,
            VertexKind::Register | VertexKind::InputPort | VertexKind::InoutPort
        )
    }

    /// Registers and ports can end a path.
    pub fn is_finish_kind(self) -> bool {
        matches!(
            self,
            VertexKind::Register | VertexKind::OutputPort | VertexKind::InoutPort
        )
    }

    /// True for a register.
    pub fn is_register(self) -> bool {
        self == VertexKind::Register
    }

    /// True for any port kind.
    pub fn is_port(self) -> bool {
        matches!(
            self,
            VertexKind::InputPort | VertexKind::OutputPort | VertexKind::InoutPort
        )
    }

    /// True for logic statements, which carry no queryable name.
    pub fn is_logic(self) -> bool {
        self == VertexKind::Logic
    }

    /// Port direction implied by the kind.
    pub fn direction(self) -> PortDirection {
        match self {
            VertexKind::InputPort => PortDirection::Input,
            VertexKind::OutputPort => PortDirection::Output,
            VertexKind::InoutPort => PortDirection::Inout,
            _ => PortDirection::None,
        }
    }
}

impl std::fmt::Display for VertexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VertexKind::Register => write!(f, "REG"),
            VertexKind::InputPort | VertexKind::OutputPort | VertexKind::InoutPort => {
                write!(f, "PORT")
            }
            VertexKind::Net => write!(f, "NET"),
            VertexKind::Variable => write!(f, "VAR"),
            VertexKind::Logic => write!(f, "LOGIC"),
        }
    }
}

/// Port direction of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    /// Not a port
    None,
    /// Input port
    Input,
    /// Output port
    Output,
    /// Bidirectional port
    Inout,
}

impl std::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortDirection::None => write!(f, "NONE"),
            PortDirection::Input => write!(f, "INPUT"),
            PortDirection::Output => write!(f, "OUTPUT"),
            PortDirection::Inout => write!(f, "INOUT"),
        }
    }
}

/// Direction for neighbor queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Follow outgoing edges (driver to load)
    Outgoing,
    /// Follow incoming edges (load to driver)
    Incoming,
}

impl Direction {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
        }
    }
}

/// Hierarchical name: an ordered sequence of scope components.
///
/// The canonical textual form joins components with `.`, e.g. `top.u_core.data_q`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HierName {
    qualified: String,
    components: Vec<String>,
}

impl HierName {
    /// Build a name from its components.
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        let qualified = components.join(".");
        Self {
            qualified,
            components,
        }
    }

    /// Parse a dotted name (`a.b.c`).
    pub fn parse(name: &str) -> Self {
        if name.is_empty() {
            return Self::default();
        }
        Self::new(name.split('.'))
    }

    /// The anonymous name carried by logic vertices.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Canonical dotted form.
    pub fn as_str(&self) -> &str {
        &self.qualified
    }

    /// Scope components, outermost first.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Innermost component.
    pub fn leaf(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    /// Number of components.
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// True for the anonymous name.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl std::fmt::Display for HierName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.qualified)
    }
}

impl Serialize for HierName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.qualified)
    }
}

/// Source location of a vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Source file name
    pub file: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl Location {
    /// Create a location.
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A vertex in the netlist graph.
#[derive(Debug, Clone, Serialize)]
pub struct Vertex {
    /// Dense identifier (assigned by the builder)
    pub id: VertexId,
    /// Vertex kind
    pub kind: VertexKind,
    /// Hierarchical name; anonymous for logic
    pub name: HierName,
    /// Data type, if the description provided one
    pub dtype: Option<DTypeId>,
    /// Source location
    pub location: Option<Location>,
    /// Statement label for logic vertices (`ASSIGN`, `ALWAYS`, ...)
    pub statement: Option<String>,
}

impl Vertex {
    /// Canonical dotted name (empty for logic).
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Port direction, [`PortDirection::None`] for non-ports.
    pub fn direction(&self) -> PortDirection {
        self.kind.direction()
    }

    /// Named vertices can be matched by specifiers.
    pub fn is_named(&self) -> bool {
        !self.kind.is_logic() && !self.name.is_empty()
    }

    /// True for registers.
    pub fn is_register(&self) -> bool {
        self.kind.is_register()
    }

    /// True for logic statements.
    pub fn is_logic(&self) -> bool {
        self.kind.is_logic()
    }

    /// Short label for reports: the name, or the statement kind for logic.
    pub fn label(&self) -> String {
        if self.is_logic() {
            self.statement.clone().unwrap_or_else(|| "LOGIC".to_string())
        } else {
            self.name.to_string()
        }
    }
}
