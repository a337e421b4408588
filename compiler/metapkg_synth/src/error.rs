use thiserror::Error;

/// A failure while synthesizing one member's wrapper or closures.
///
/// Per-member failures skip the member and are recorded in the run summary;
/// `ImportConflict` is raised by the assembler and fails the whole run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SynthError {
    /// The declaration synthesizer has no placeholder for this shape.
    #[error("unsupported type shape {shape} for `{variable}`")]
    UnsupportedTypeShape { shape: String, variable: String },

    /// A nested type has no textual spelling.
    #[error("cannot spell type: {shape}")]
    TypeResolution { shape: String },

    /// Two referenced units share a package name.
    #[error("import conflict: `{name}` names both {first} and {second}")]
    ImportConflict {
        name: String,
        first: String,
        second: String,
    },
}

impl SynthError {
    pub(crate) fn unsupported(shape: impl Into<String>, variable: &str) -> Self {
        SynthError::UnsupportedTypeShape {
            shape: shape.into(),
            variable: variable.to_string(),
        }
    }

    pub(crate) fn resolution(shape: impl Into<String>) -> Self {
        SynthError::TypeResolution {
            shape: shape.into(),
        }
    }
}
