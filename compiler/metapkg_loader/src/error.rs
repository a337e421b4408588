use std::path::PathBuf;

use thiserror::Error;

/// The target unit cannot be found, loaded or type-checked.
///
/// Always fatal for a run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read program IR from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed program IR from {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot run exporter `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("exporter `{program}` failed ({status}): {stderr}")]
    Exporter {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("package {target} was not loaded")]
    MissingUnit { target: String },

    #[error("package {target} has type errors: {}", errors.join("; "))]
    TypeCheck { target: String, errors: Vec<String> },
}
