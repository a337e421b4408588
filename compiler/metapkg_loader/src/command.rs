//! Loading through an external exporter command.
//!
//! The exporter is a host-side tool that loads and type-checks the target
//! with the Go toolchain and prints the resulting [`TypedProgram`] as JSON on
//! stdout. Module resolution is steered through `GO111MODULE`.

use std::process::Command;

use metapkg_ir::TypedProgram;

use crate::{check_target, parse_program, LoadError, ProgramLoader};

/// Exporter invoked when none is configured.
pub const DEFAULT_EXPORTER: &str = "metapkg-export";

/// Module-resolution mode passed to the host toolchain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModuleMode {
    /// Resolve through `go.mod` (`GO111MODULE=on`).
    On,
    /// GOPATH resolution (`GO111MODULE=off`).
    #[default]
    Off,
}

impl ModuleMode {
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            ModuleMode::On
        } else {
            ModuleMode::Off
        }
    }

    /// Value for the `GO111MODULE` environment variable.
    pub fn env_value(self) -> &'static str {
        match self {
            ModuleMode::On => "on",
            ModuleMode::Off => "off",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CommandLoader {
    pub program: String,
    pub module_mode: ModuleMode,
}

impl CommandLoader {
    pub fn new(program: impl Into<String>, module_mode: ModuleMode) -> Self {
        Self {
            program: program.into(),
            module_mode,
        }
    }

    /// The command that exports `target`.
    pub fn command(&self, target: &str, include_tests: bool) -> Command {
        let mut command = Command::new(&self.program);
        if include_tests {
            command.arg("-tests");
        }
        command
            .arg(target)
            .env("GO111MODULE", self.module_mode.env_value());
        command
    }
}

impl ProgramLoader for CommandLoader {
    #[tracing::instrument(level = "debug", skip(self), fields(exporter = %self.program))]
    fn load(&self, target: &str, include_tests: bool) -> Result<TypedProgram, LoadError> {
        let output = self
            .command(target, include_tests)
            .output()
            .map_err(|source| LoadError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(LoadError::Exporter {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let program = parse_program(&stdout, &self.program)?;
        check_target(&program, target)?;
        tracing::debug!(packages = program.packages.len(), "program IR exported");
        Ok(program)
    }
}
