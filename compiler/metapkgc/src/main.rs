//! metapkg CLI

use std::process::ExitCode;

use metapkgc::{cli, init_tracing, loader_for, parse_args, run, HarnessError, Invocation, EXPORTER_ENV};

fn main() -> ExitCode {
    init_tracing();

    let invocation = match parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(err) => {
            let code = report(&HarnessError::from(err));
            eprintln!("Usage: metapkg [options] <package> (see --help)");
            return code;
        }
    };

    let config = match invocation {
        Invocation::Help => {
            println!("{}", cli::usage());
            return ExitCode::SUCCESS;
        }
        Invocation::Version => {
            println!("metapkg {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Invocation::Generate(config) => {
            config.with_exporter_override(std::env::var(EXPORTER_ENV).ok())
        }
    };

    let loader = loader_for(&config);
    match run(&config, loader.as_ref()) {
        Ok(summary) => {
            for skipped in &summary.skipped {
                eprintln!("skipped {}: {}", skipped.member, skipped.reason);
            }
            for rename in &summary.renamed {
                eprintln!("renamed {} -> {}", rename.original, rename.assigned);
            }
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

fn report(err: &HarnessError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err.exit_code())
}
