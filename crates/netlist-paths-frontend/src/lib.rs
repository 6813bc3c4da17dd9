//! netlist-paths front-end interface
//!
//! The core library never runs a compiler itself. It consumes a
//! [`NetlistDescription`], and this crate defines how one is produced:
//!
//! - **Compiler trait**: the interface any front end implements
//! - **CompileRequest**: sources, include directories, defines, top module
//! - **CommandCompiler**: runs an external executable as a blocking subprocess
//! - **Error handling**: [`CompileError`], convertible into
//!   [`NetlistError::Compile`]
//!
//! # Example
//!
//! ```rust,no_run
//! use netlist_paths_frontend::{compile_netlist, CommandCompiler, CompileRequest};
//!
//! let compiler = CommandCompiler::new("/opt/hdl/bin/svfront");
//! let request = CompileRequest::new(["rtl/adder.sv"]).with_top("adder");
//! let netlist = compile_netlist(&compiler, &request).unwrap();
//! println!("{} vertices", netlist.graph().vertex_count());
//! ```

pub mod command;
pub mod config;
pub mod errors;
pub mod traits;

// Re-export commonly used types
pub use command::CommandCompiler;
pub use config::CompileRequest;
pub use errors::{CompileError, CompileResult};
pub use traits::Compiler;

use log::info;
use netlist_paths::{Netlist, NetlistDescription, NetlistError};

/// Compile sources and load the resulting netlist.
///
/// # Errors
///
/// Returns [`NetlistError::Compile`] if the front end fails; no query can
/// run in that case. Description errors pass through unchanged.
pub fn compile_netlist(
    compiler: &dyn Compiler,
    request: &CompileRequest,
) -> netlist_paths::Result<Netlist> {
    info!("Compiling netlist with {}", compiler.name());
    let description: NetlistDescription = compiler.compile(request).map_err(NetlistError::from)?;
    Netlist::from_description(&description)
}
