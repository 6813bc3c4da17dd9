use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to compile and how
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileRequest {
    /// Source files, in compilation order
    pub sources: Vec<PathBuf>,

    /// Include search directories
    pub include_dirs: Vec<PathBuf>,

    /// Preprocessor defines (`NAME` or `NAME=VALUE`)
    pub defines: Vec<String>,

    /// Top module name (None = let the front end pick)
    pub top: Option<String>,

    /// Directory for the generated description (None = system temp dir)
    pub output_dir: Option<PathBuf>,

    /// Keep the generated description file after loading it
    pub keep_output: bool,
}

impl CompileRequest {
    /// Request for the given sources
    pub fn new<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Load a request from a JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add an include directory
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Add a define
    pub fn with_define(mut self, define: impl Into<String>) -> Self {
        self.defines.push(define.into());
        self
    }

    /// Set the top module
    pub fn with_top(mut self, top: impl Into<String>) -> Self {
        self.top = Some(top.into());
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Keep the generated description
    pub fn with_keep_output(mut self, keep: bool) -> Self {
        self.keep_output = keep;
        self
    }
}
