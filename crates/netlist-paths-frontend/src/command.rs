use crate::config::CompileRequest;
use crate::errors::{CompileError, CompileResult};
use crate::traits::Compiler;
use log::{debug, info, warn};
use netlist_paths::NetlistDescription;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

/// Runs an external front-end executable as a blocking subprocess.
///
/// The executable is invoked as
///
/// ```text
/// <program> [args...] -I<dir>... -D<define>... [--top-module <top>] -o <output> <sources>...
/// ```
///
/// and must write a JSON netlist description to `<output>`.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    name: String,
    program: PathBuf,
    args: Vec<String>,
}

impl CommandCompiler {
    /// Front end at `program`, named after the executable's file name
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "front-end".to_string());
        Self {
            name,
            program,
            args: Vec::new(),
        }
    }

    /// Pass a fixed argument before the generated ones
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Override the reported name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Unique output path for one compilation
    fn output_path(request: &CompileRequest) -> CompileResult<PathBuf> {
        let dir = request
            .output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&dir).map_err(|e| CompileError::Io(dir.clone(), e))?;
        Ok(dir.join(format!("netlist-{}.json", Uuid::new_v4())))
    }

    fn command(&self, request: &CompileRequest, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        for dir in &request.include_dirs {
            command.arg(format!("-I{}", dir.display()));
        }
        for define in &request.defines {
            command.arg(format!("-D{define}"));
        }
        if let Some(top) = &request.top {
            command.arg("--top-module").arg(top);
        }
        command.arg("-o").arg(output);
        command.args(&request.sources);
        command
    }
}

impl Compiler for CommandCompiler {
    fn name(&self) -> &str {
        &self.name
    }

    fn compile(&self, request: &CompileRequest) -> CompileResult<NetlistDescription> {
        if request.sources.is_empty() {
            return Err(CompileError::NoSources);
        }
        let output = Self::output_path(request)?;
        let mut command = self.command(request, &output);
        info!(
            "Running {} on {} source files",
            self.name,
            request.sources.len()
        );
        debug!("Command: {command:?}");

        let result = command
            .output()
            .map_err(|e| CompileError::Spawn(self.program.display().to_string(), e))?;
        if !result.status.success() {
            return Err(CompileError::Failed {
                program: self.name.clone(),
                status: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let description = NetlistDescription::from_file(&output)
            .map_err(|e| CompileError::InvalidOutput(output.clone(), e.to_string()));
        if !request.keep_output {
            if let Err(e) = std::fs::remove_file(&output) {
                warn!("Could not remove {}: {e}", output.display());
            }
        }
        description
    }
}
