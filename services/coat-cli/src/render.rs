use clap::ValueEnum;
use oa_coat::classification::{
    ClassificationOutcome, CoatChange, EvidenceWarning, NormalizedLicence, Reclassification,
};
use oa_coat::error::AppError;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab separated summary lines
    Text,
    /// Full outcomes as a JSON array
    Json,
    /// One flat report row per publication
    Csv,
}

pub fn write_outcomes<W: Write>(
    out: &mut W,
    outcomes: &[ClassificationOutcome],
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => {
            for outcome in outcomes {
                write_outcome_text(out, outcome)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, outcomes)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for outcome in outcomes {
                writer.serialize(outcome.report())?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

pub fn write_reclassification<W: Write>(
    out: &mut W,
    result: &Reclassification,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => {
            write_outcome_text(out, &result.outcome)?;
            match &result.change {
                CoatChange::Set => writeln!(out, "  set")?,
                CoatChange::Unchanged => writeln!(out, "  unchanged")?,
                CoatChange::Changed { previous } => writeln!(out, "  changed from {previous}")?,
                CoatChange::Cleared { previous } => writeln!(out, "  cleared, was {previous}")?,
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, result)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => write_outcomes(out, std::slice::from_ref(&result.outcome), format),
    }
}

fn write_outcome_text<W: Write>(out: &mut W, outcome: &ClassificationOutcome) -> Result<(), AppError> {
    let canonical = match outcome.canonical() {
        canonical if canonical.is_empty() => "-".to_string(),
        canonical => canonical,
    };
    writeln!(
        out,
        "{}\t{}\t{}\t{}",
        outcome.doi, canonical, outcome.color, outcome.sources
    )?;

    if !outcome.explanation.is_empty() {
        for score in &outcome.scores {
            writeln!(out, "  {}: {} ({})", score.dimension, score.level, score.note)?;
        }
        for step in &outcome.explanation {
            writeln!(out, "  - {step}")?;
        }
    }
    write_warnings(out, &outcome.warnings)
}

pub fn write_licence<W: Write>(
    out: &mut W,
    raw: &str,
    licence: &NormalizedLicence,
) -> Result<(), AppError> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}",
        raw,
        licence.name(),
        licence.version,
        licence.licence_type().label()
    )?;
    Ok(())
}

pub fn write_warnings<W: Write>(out: &mut W, warnings: &[EvidenceWarning]) -> Result<(), AppError> {
    for warning in warnings {
        writeln!(out, "  warning: {warning}")?;
    }
    Ok(())
}
