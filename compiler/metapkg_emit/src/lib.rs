//! Metapkg emitter - Go source text for an assembled harness.
//!
//! [`render`] is pure and deterministic; [`write`] and [`emit`] touch the
//! filesystem.

mod error;
mod printer;

use std::fs;
use std::path::Path;

use metapkg_ir::syntax::Program;

pub use error::EmitError;
pub use printer::Printer;

/// First line of every generated file. Go tooling recognizes this form and
/// treats the file as machine-written.
pub const GENERATED_HEADER: &str = "// Code generated by metapkg. DO NOT EDIT.";

/// Render `program` as Go source.
pub fn render(program: &Program) -> String {
    let mut printer = Printer::new();
    printer.writeln(GENERATED_HEADER);
    printer.newline();
    printer.program(program);
    printer.finish()
}

/// Write rendered source to `path`, replacing any existing file.
pub fn write(text: &str, path: &Path) -> Result<(), EmitError> {
    fs::write(path, text).map_err(|source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "harness written");
    Ok(())
}

/// Render `program` and write it to `path`.
pub fn emit(program: &Program, path: &Path) -> Result<(), EmitError> {
    write(&render(program), path)
}
