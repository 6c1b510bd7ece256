use crate::render::{self, OutputFormat};
use clap::Args;
use oa_coat::classification::amount::parse_amount_list;
use oa_coat::classification::{
    color_for, resolve_embargo, resolve_fee, select_best_licence, select_dominant, Coat,
};
use oa_coat::error::AppError;
use oa_coat::sources::{PolicyDocument, PublicationEvidence};
use oa_coat::ClassificationEngine;
use serde::Deserialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Evidence JSON: one publication object or an array of them. `-` reads stdin.
    pub input: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Include the step-by-step explanation
    #[arg(long)]
    pub explain: bool,
    /// Treat the array as records of one publication and keep the dominant tuple
    #[arg(long, conflicts_with = "previous")]
    pub merge: bool,
    /// Previously stored canonical tuple to compare against (single publication only)
    #[arg(long)]
    pub previous: Option<String>,
}

#[derive(Args, Debug)]
pub struct LicenceArgs {
    /// Licence statements, URLs or short codes
    #[arg(required = true)]
    pub statements: Vec<String>,
    /// Only print the best statement
    #[arg(long)]
    pub best: bool,
}

#[derive(Args, Debug)]
pub struct EmbargoArgs {
    /// Sherpa/Romeo policy document JSON. `-` reads stdin.
    pub policy: PathBuf,
}

#[derive(Args, Debug)]
pub struct ApcArgs {
    /// APC amount field, e.g. "1700 GBP; 2000 EUR"
    #[arg(default_value = "")]
    pub amount: String,
    /// The source flags that a fee is charged
    #[arg(long)]
    pub has_fee: bool,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    pub left: String,
    pub right: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EvidenceInput {
    Many(Vec<PublicationEvidence>),
    One(PublicationEvidence),
}

impl EvidenceInput {
    fn into_vec(self) -> Vec<PublicationEvidence> {
        match self {
            Self::Many(publications) => publications,
            Self::One(publication) => vec![publication],
        }
    }
}

fn read_input(path: &Path) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        return Ok(raw);
    }
    Ok(fs::read_to_string(path)?)
}

pub fn load_evidence(raw: &str) -> Result<Vec<PublicationEvidence>, AppError> {
    let input: EvidenceInput = serde_json::from_str(raw)?;
    Ok(input.into_vec())
}

pub fn classify<W: Write>(
    engine: &ClassificationEngine,
    args: &ClassifyArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let publications = load_evidence(&read_input(&args.input)?)?;
    classify_publications(engine, publications, args, out)
}

pub fn classify_publications<W: Write>(
    engine: &ClassificationEngine,
    publications: Vec<PublicationEvidence>,
    args: &ClassifyArgs,
    out: &mut W,
) -> Result<(), AppError> {
    info!(count = publications.len(), "classifying publications");

    if let Some(previous) = args.previous.as_deref() {
        let [evidence] = publications.as_slice() else {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "--previous needs exactly one publication, found {}",
                    publications.len()
                ),
            )));
        };
        let result = engine.reclassify(Some(previous), evidence);
        return render::write_reclassification(out, &result, args.format);
    }

    let outcomes: Vec<_> = match (args.merge, args.explain) {
        (true, false) => engine.classify_records(&publications).into_iter().collect(),
        (true, true) => select_dominant(
            publications
                .iter()
                .map(|evidence| engine.classify_explained(evidence)),
            |outcome| outcome.coat.as_ref(),
        )
        .into_iter()
        .collect(),
        (false, true) => publications
            .iter()
            .map(|evidence| engine.classify_explained(evidence))
            .collect(),
        (false, false) => engine.classify_batch(&publications),
    };
    if outcomes.is_empty() {
        warn!("no publications to classify");
    }
    render::write_outcomes(out, &outcomes, args.format)
}

pub fn licence<W: Write>(
    engine: &ClassificationEngine,
    args: &LicenceArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let normalizer = engine.normalizer();
    if args.best {
        if let Some(best) = select_best_licence(normalizer, &args.statements) {
            render::write_licence(out, best, &normalizer.normalize(best))?;
        }
        return Ok(());
    }

    for statement in &args.statements {
        render::write_licence(out, statement, &normalizer.normalize(statement))?;
    }
    Ok(())
}

pub fn embargo<W: Write>(args: &EmbargoArgs, out: &mut W) -> Result<(), AppError> {
    let policy: PolicyDocument = serde_json::from_str(&read_input(&args.policy)?)?;
    let resolution = resolve_embargo(&policy);
    match resolution.months {
        Some(months) => writeln!(out, "{} months", months)?,
        None => writeln!(out, "unknown")?,
    }
    render::write_warnings(out, &resolution.warnings)?;
    Ok(())
}

pub fn apc<W: Write>(
    engine: &ClassificationEngine,
    args: &ApcArgs,
    out: &mut W,
) -> Result<(), AppError> {
    let currency = &engine.config().reference_currency;
    let (amount, warnings) = parse_amount_list(&args.amount, currency);
    let fee = resolve_fee(args.has_fee, amount, currency);
    writeln!(out, "{}", fee)?;
    render::write_warnings(out, &warnings)?;
    Ok(())
}

pub fn compare<W: Write>(args: &CompareArgs, out: &mut W) -> Result<(), AppError> {
    let left: Coat = args.left.parse()?;
    let right: Coat = args.right.parse()?;

    let relation = match (left.is_lower(&right), right.is_lower(&left)) {
        (true, true) => "equal",
        (true, false) => "left dominates right",
        (false, true) => "right dominates left",
        (false, false) => "incomparable",
    };
    writeln!(out, "{} ({})", left.to_canonical_string(), color_for(Some(&left)))?;
    writeln!(out, "{} ({})", right.to_canonical_string(), color_for(Some(&right)))?;
    writeln!(out, "{relation}")?;
    Ok(())
}
