//! Loading a pre-exported program from a JSON file.

use std::path::PathBuf;

use metapkg_ir::TypedProgram;

use crate::{check_target, LoadError, ProgramLoader};

/// Parse a [`TypedProgram`] from JSON text. `origin` names the source in
/// error messages.
pub fn parse_program(text: &str, origin: &str) -> Result<TypedProgram, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Malformed {
        origin: origin.to_string(),
        source,
    })
}

/// Reads the program from a JSON file exported ahead of time.
///
/// The export already fixed which files were loaded, so `include_tests` has
/// no effect here.
#[derive(Clone, Debug)]
pub struct JsonFileLoader {
    pub path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProgramLoader for JsonFileLoader {
    #[tracing::instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self, target: &str, include_tests: bool) -> Result<TypedProgram, LoadError> {
        if include_tests {
            tracing::debug!("test files are fixed by the export; ignoring include_tests");
        }
        let text = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Read {
            path: self.path.clone(),
            source,
        })?;
        let program = parse_program(&text, &self.path.display().to_string())?;
        check_target(&program, target)?;
        tracing::debug!(packages = program.packages.len(), "program IR loaded");
        Ok(program)
    }
}
