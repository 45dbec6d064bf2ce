mod config;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod schema;
mod session;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};

use crate::config::{ConfigError, EngineConfig, load_config};
use crate::input::{Delimiter, DelimiterChoice, InputError, load_dataset};
use crate::logging::init_tracing;
use crate::model::tally::ModeSelection;
use crate::model::thresholds::AcceptanceThreshold;
use crate::pipeline::stage5_report::{Stage5Input, write_reports};
use crate::report::ReportError;
use crate::report::text::{TrackDetail, render_gene_block, render_track_detail};
use crate::schema::{DiseasePolicy, Track, truncate_disease};
use crate::session::{Session, SessionError};

const TOOL_NAME: &str = "kira-nbscreen";

#[derive(Debug, Parser)]
#[command(
    name = "kira-nbscreen",
    version,
    about = "Per-gene approval statistics from genomic newborn-screening survey exports"
)]
struct Cli {
    /// Debug logging (overrides KIRA_LOG).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Warnings and errors only.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate every gene and write summary.csv, summary.json, comments.csv, genes.json and report.txt.
    Run(RunArgs),
    /// List genes with their disease labels.
    Genes(InputArgs),
    /// Show both tracks and all comments for one gene, or one track in detail.
    Gene(GeneArgs),
}

#[derive(Debug, Clone, Args)]
struct InputArgs {
    /// Survey export (CSV, optionally .gz).
    #[arg(long)]
    input: PathBuf,
    #[arg(long, value_enum, default_value_t = DelimiterArg::Auto)]
    delimiter: DelimiterArg,
    /// JSON file overriding markers, vocabulary and thresholds.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    aggregation: Option<ModeSelection>,
    #[arg(long, value_enum)]
    disease_policy: Option<DiseasePolicy>,
    /// Minimum national Yes share in percent (inclusive).
    #[arg(long)]
    threshold: Option<f64>,
    /// Display length for disease labels; 0 disables truncation.
    #[arg(long)]
    max_disease_len: Option<usize>,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct GeneArgs {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long)]
    gene: String,
    /// Answer breakdown and comments for a single track.
    #[arg(long, value_enum)]
    track: Option<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DelimiterArg {
    Auto,
    Comma,
    Semicolon,
}

impl From<DelimiterArg> for DelimiterChoice {
    fn from(value: DelimiterArg) -> Self {
        match value {
            DelimiterArg::Auto => DelimiterChoice::Auto,
            DelimiterArg::Comma => DelimiterChoice::Fixed(Delimiter::Comma),
            DelimiterArg::Semicolon => DelimiterChoice::Fixed(Delimiter::Semicolon),
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("gene not found: {gene} (known genes: {known})")]
    UnknownGene { gene: String, known: String },
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Session(SessionError::SchemaEmpty { .. }) => 2,
            _ => 1,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(log_level(&cli));
    if let Err(err) = run(cli) {
        if err.exit_code() == 2 {
            warn!("{err}");
        } else {
            error!("{err}");
        }
        std::process::exit(err.exit_code());
    }
}

fn log_level(cli: &Cli) -> Option<LevelFilter> {
    if cli.verbose {
        Some(LevelFilter::DEBUG)
    } else if cli.quiet {
        Some(LevelFilter::WARN)
    } else {
        None
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Run(args) => run_report(&args),
        Command::Genes(args) => {
            let session = load_session(&args)?;
            for g in session.genes() {
                println!("{}\t{}", g.gene, g.disease_display);
            }
            Ok(())
        }
        Command::Gene(args) => {
            let session = load_session(&args.input)?;
            print!("{}", render_gene(&session, &args)?);
            Ok(())
        }
    }
}

fn render_gene(session: &Session, args: &GeneArgs) -> Result<String, AppError> {
    let config = session.config();
    let unknown = || AppError::UnknownGene {
        gene: args.gene.clone(),
        known: session.schema().gene_names().join(", "),
    };
    let Some(track) = args.track else {
        let report = session.gene_report(&args.gene).ok_or_else(unknown)?;
        return Ok(render_gene_block(
            &report,
            &config.acceptance_threshold,
            true,
        ));
    };

    let tally = session.tally(&args.gene, track).ok_or_else(unknown)?;
    let comments = session.comments(&args.gene, track).ok_or_else(unknown)?;
    let disease = session.schema().disease(&args.gene).unwrap_or_default();
    let disease_display = truncate_disease(disease, config.max_disease_display_len);
    Ok(render_track_detail(
        &TrackDetail {
            gene: &args.gene,
            disease_display: &disease_display,
            track,
            tally: &tally,
            comments: &comments,
        },
        &config.vocabulary,
        &config.acceptance_threshold,
    ))
}

fn run_report(args: &RunArgs) -> Result<(), AppError> {
    let session = load_session(&args.input)?;
    let summary = session.summary();
    let gene_reports = session.gene_reports();

    let input = Stage5Input {
        source: args.input.input.display().to_string(),
        n_rows: session.dataset().n_rows(),
        n_columns: session.dataset().n_columns(),
        config: session.config(),
        diagnostics: session.diagnostics(),
        summary: &summary,
        gene_reports: &gene_reports,
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, &args.out)?;
    Ok(())
}

fn load_session(args: &InputArgs) -> Result<Session, AppError> {
    let config = resolve_config(args)?;
    let dataset = load_dataset(&args.input, args.delimiter.into())?;
    let session = Session::load(dataset, config)?;
    let diagnostics = session.diagnostics();
    if diagnostics.n_unparsable > 0 {
        warn!(
            unparsable = diagnostics.n_unparsable,
            "some headers carry gene/disease markers but could not be parsed"
        );
    }
    info!(genes = session.schema().n_genes(), "session ready");
    Ok(session)
}

fn resolve_config(args: &InputArgs) -> Result<EngineConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::german_v1(),
    };
    if let Some(selection) = args.aggregation {
        config.mode_selection = selection;
    }
    if let Some(policy) = args.disease_policy {
        config.disease_policy = policy;
    }
    if let Some(pct) = args.threshold {
        config.acceptance_threshold = AcceptanceThreshold::new(pct);
    }
    if let Some(len) = args.max_disease_len {
        config.max_disease_display_len = len;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
