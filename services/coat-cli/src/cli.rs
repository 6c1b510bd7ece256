use crate::commands::{self, ApcArgs, ClassifyArgs, CompareArgs, EmbargoArgs, LicenceArgs};
use clap::{Parser, Subcommand};
use oa_coat::config::AppConfig;
use oa_coat::error::AppError;
use oa_coat::telemetry;
use oa_coat::ClassificationEngine;
use std::io;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "oa-coat",
    about = "Classify the open access status of publications as COAT tuples",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify publications from an evidence JSON file
    Classify(ClassifyArgs),
    /// Normalize licence statements and rank them
    Licence(LicenceArgs),
    /// Resolve the shortest embargo of a Sherpa/Romeo policy document
    Embargo(EmbargoArgs),
    /// Parse an APC field and apply the fee policy
    Apc(ApcArgs),
    /// Compare two canonical COAT strings
    Compare(CompareArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    let engine = ClassificationEngine::new(config.classification);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Classify(args) => commands::classify(&engine, &args, &mut out),
        Command::Licence(args) => commands::licence(&engine, &args, &mut out),
        Command::Embargo(args) => commands::embargo(&args, &mut out),
        Command::Apc(args) => commands::apc(&engine, &args, &mut out),
        Command::Compare(args) => commands::compare(&args, &mut out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_classify_flags() {
        let cli = Cli::try_parse_from([
            "oa-coat",
            "classify",
            "evidence.json",
            "--explain",
            "--format",
            "csv",
        ])
        .expect("classify parses");
        match cli.command {
            Command::Classify(args) => {
                assert!(args.explain);
                assert_eq!(args.format, crate::render::OutputFormat::Csv);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn compare_needs_two_tuples() {
        assert!(Cli::try_parse_from(["oa-coat", "compare", "1,1,1,1,1"]).is_err());
    }
}
