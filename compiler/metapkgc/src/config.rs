//! Run configuration.

use std::path::PathBuf;

use metapkg_loader::{ModuleMode, DEFAULT_EXPORTER};

/// Where the generated harness is written unless `-o` says otherwise.
pub const DEFAULT_OUTPUT: &str = "buildme.go";

/// Environment variable naming the exporter command.
pub const EXPORTER_ENV: &str = "METAPKG_EXPORTER";

/// How the typed program is obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoaderSource {
    /// Run an exporter command and read its stdout.
    Exporter(String),
    /// Read a pre-exported program from disk.
    IrFile(PathBuf),
}

impl Default for LoaderSource {
    fn default() -> Self {
        LoaderSource::Exporter(DEFAULT_EXPORTER.to_string())
    }
}

/// Configuration for a harness generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Import path of the unit to wrap.
    pub target: String,
    pub output: PathBuf,
    pub module_mode: ModuleMode,
    pub include_tests: bool,
    pub source: LoaderSource,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            module_mode: ModuleMode::default(),
            include_tests: false,
            source: LoaderSource::default(),
        }
    }
}

impl HarnessConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Replace the default exporter with `exporter` (the value of
    /// [`EXPORTER_ENV`]). An explicit IR file always wins.
    pub fn with_exporter_override(mut self, exporter: Option<String>) -> Self {
        if let (LoaderSource::Exporter(current), Some(exporter)) = (&mut self.source, exporter) {
            if !exporter.is_empty() {
                *current = exporter;
            }
        }
        self
    }
}
