use crate::{config::CompileRequest, errors::CompileError};
use netlist_paths::NetlistDescription;

/// A hardware compiler front end that turns source text into a structural
/// netlist description.
///
/// Compilation is a blocking call; implementations must be thread-safe
/// (Send + Sync) so a single front end can serve several requests.
pub trait Compiler: Send + Sync {
    /// Front-end name for logs and diagnostics (e.g., "verilator")
    fn name(&self) -> &str;

    /// Compile the request into a netlist description
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the sources do not compile or the front
    /// end produces no usable description. No netlist exists in that case.
    fn compile(&self, request: &CompileRequest) -> Result<NetlistDescription, CompileError>;
}
