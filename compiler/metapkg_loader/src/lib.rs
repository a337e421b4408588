//! Program loaders.
//!
//! A loader turns a target unit path into a [`TypedProgram`]: every loaded
//! unit with its member table and declared types. The synthesis core never
//! parses source code; it only consumes what a loader hands back.
//!
//! Two loaders ship with the workspace:
//!
//! - [`JsonFileLoader`] reads a program previously exported to a JSON file
//! - [`CommandLoader`] runs an exporter command and reads its stdout
//!
//! Both validate the result with [`check_target`] before returning it.

mod command;
mod error;
mod json;

pub use command::{CommandLoader, ModuleMode, DEFAULT_EXPORTER};
pub use error::LoadError;
pub use json::{parse_program, JsonFileLoader};

use metapkg_ir::TypedProgram;

/// Host collaborator producing typed whole-program IR.
pub trait ProgramLoader {
    /// Load `target` and everything it depends on.
    ///
    /// `include_tests` asks the host to also load the unit's test files.
    fn load(&self, target: &str, include_tests: bool) -> Result<TypedProgram, LoadError>;
}

/// Check that `target` was loaded and type-checked cleanly.
pub fn check_target(program: &TypedProgram, target: &str) -> Result<(), LoadError> {
    let Some(package) = program.package(target) else {
        return Err(LoadError::MissingUnit {
            target: target.to_string(),
        });
    };
    if !package.errors.is_empty() {
        return Err(LoadError::TypeCheck {
            target: target.to_string(),
            errors: package.errors.clone(),
        });
    }
    Ok(())
}
