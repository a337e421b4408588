//! Run pipeline: load, enumerate, synthesize, emit.

use metapkg_loader::{CommandLoader, JsonFileLoader, ProgramLoader};
use metapkg_synth::{enumerate, synthesize_harness, RunSummary};

use crate::config::{HarnessConfig, LoaderSource};
use crate::HarnessError;

/// The loader `config` asks for.
pub fn loader_for(config: &HarnessConfig) -> Box<dyn ProgramLoader> {
    match &config.source {
        LoaderSource::Exporter(program) => {
            Box::new(CommandLoader::new(program.clone(), config.module_mode))
        }
        LoaderSource::IrFile(path) => Box::new(JsonFileLoader::new(path.clone())),
    }
}

/// Generate the harness for `config.target` and write it to
/// `config.output`.
///
/// Members that cannot be wrapped are reported in the returned summary, not
/// as errors.
#[tracing::instrument(level = "debug", skip_all, fields(target = %config.target))]
pub fn run(config: &HarnessConfig, loader: &dyn ProgramLoader) -> Result<RunSummary, HarnessError> {
    let members = enumerate(loader, &config.target, config.include_tests)?;
    tracing::debug!(members = members.len(), "members enumerated");

    let harness = synthesize_harness(&members)?;
    for skipped in &harness.summary.skipped {
        tracing::info!(member = %skipped.member, reason = %skipped.reason, "no wrapper generated");
    }

    metapkg_emit::emit(&harness.program, &config.output)?;
    tracing::info!(output = %config.output.display(), "{}", harness.summary);
    Ok(harness.summary)
}
