use metapkg_emit::EmitError;
use metapkg_loader::LoadError;
use metapkg_synth::SynthError;
use thiserror::Error;

use crate::cli::UsageError;

/// Anything that stops a run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("load failed: {0}")]
    Load(#[from] LoadError),
    #[error("assembly failed: {0}")]
    Synth(#[from] SynthError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl HarnessError {
    /// Process exit status: 1 for bad invocations, 2 for failed runs.
    pub fn exit_code(&self) -> u8 {
        match self {
            HarnessError::Usage(_) => 1,
            HarnessError::Load(_) | HarnessError::Synth(_) | HarnessError::Emit(_) => 2,
        }
    }
}
