//! Command-line parsing.
//!
//! `metapkg [--gomod] [--tests] [--ir <file>] [-o <file>] <package>`

use std::path::PathBuf;

use metapkg_loader::ModuleMode;
use thiserror::Error;

use crate::config::{HarnessConfig, LoaderSource};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    Generate(HarnessConfig),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
    #[error("flag `{0}` needs a value")]
    MissingValue(String),
    #[error("too many packages: `{0}` given after `{1}`")]
    TooManyPackages(String, String),
    #[error("missing package path")]
    MissingPackage,
}

/// Parse everything after the program name.
pub fn parse_args<I>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut config = HarnessConfig::default();
    let mut target: Option<String> = None;
    let mut flags_done = false;

    while let Some(arg) = args.next() {
        if flags_done || !arg.starts_with('-') || arg == "-" {
            if let Some(first) = &target {
                return Err(UsageError::TooManyPackages(arg, first.clone()));
            }
            target = Some(arg);
            continue;
        }

        // Go-style flags accept one or two dashes.
        let flag = arg.strip_prefix("--").unwrap_or(&arg[1..]);
        let (name, inline) = match flag.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (flag, None),
        };
        match name {
            "" => flags_done = true,
            "h" | "help" => return Ok(Invocation::Help),
            "version" => return Ok(Invocation::Version),
            "gomod" => config.module_mode = ModuleMode::from_flag(bool_value(&arg, inline.as_deref())?),
            "tests" => config.include_tests = bool_value(&arg, inline.as_deref())?,
            "ir" => {
                let value = flag_value(&arg, inline, &mut args)?;
                config.source = LoaderSource::IrFile(PathBuf::from(value));
            }
            "o" => config.output = PathBuf::from(flag_value(&arg, inline, &mut args)?),
            _ => return Err(UsageError::UnknownFlag(arg.clone())),
        }
    }

    config.target = target.ok_or(UsageError::MissingPackage)?;
    Ok(Invocation::Generate(config))
}

fn flag_value(
    arg: &str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String, UsageError> {
    match inline.or_else(|| rest.next()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(UsageError::MissingValue(arg.to_string())),
    }
}

/// `--flag` alone means true; `--flag=false` turns it off.
fn bool_value(arg: &str, inline: Option<&str>) -> Result<bool, UsageError> {
    match inline {
        None | Some("true" | "1") => Ok(true),
        Some("false" | "0") => Ok(false),
        Some(_) => Err(UsageError::UnknownFlag(arg.to_string())),
    }
}

pub fn usage() -> String {
    format!(
        "\
metapkg {version}
Generate a Go program that calls every exported member of a package.

Usage: metapkg [options] <package>

Options:
  --gomod          Load with GO111MODULE=on (default off)
  --tests          Include the package's test files
  --ir <file>      Read a pre-exported program instead of running the exporter
  -o <file>        Output file (default: {output})
  -h, --help       Show this help message
  --version        Show version information

Environment:
  {env}  Exporter command (default: {exporter})
  RUST_LOG          Enable diagnostic logging (e.g. RUST_LOG=metapkg_synth=debug)",
        version = env!("CARGO_PKG_VERSION"),
        output = crate::config::DEFAULT_OUTPUT,
        env = crate::config::EXPORTER_ENV,
        exporter = metapkg_loader::DEFAULT_EXPORTER,
    )
}
