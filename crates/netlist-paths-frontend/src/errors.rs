use netlist_paths::NetlistError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while producing a netlist description
#[derive(Error, Debug)]
pub enum CompileError {
    /// Nothing to compile
    #[error("No source files given")]
    NoSources,

    /// The front-end executable could not be started
    #[error("Failed to run {0}: {1}")]
    Spawn(String, #[source] std::io::Error),

    /// The front end ran and reported failure
    #[error("{program} exited with {}: {stderr}", exit_label(.status))]
    Failed {
        /// Executable name
        program: String,
        /// Exit code, None if killed by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The front end succeeded but its output is unusable
    #[error("Invalid output {0}: {1}")]
    InvalidOutput(PathBuf, String),

    /// Failed to prepare the output location
    #[error("IO error on {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Result type for compile operations
pub type CompileResult<T> = Result<T, CompileError>;

impl From<CompileError> for NetlistError {
    fn from(error: CompileError) -> Self {
        NetlistError::compile(error.to_string(), Some(error))
    }
}
