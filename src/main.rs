use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use risstats::report::{DEFAULT_EXPORT_FILE_NAME, build_rows, export_csv, render_summary};
use risstats::ris::{EncodingChain, RisParser};
use risstats::{AnalyzerConfig, FileStatus, TargetPhrases, analyze_directory};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// RIS corpus analyser - statistics and a single CSV report for a folder of .ris exports
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing the .ris files (asked interactively when omitted)
    directory: Option<PathBuf>,

    /// Path of the CSV report [default: <DIRECTORY>/estatisticas_completas_ris.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not write the CSV report
    #[arg(long, conflicts_with = "output")]
    no_export: bool,

    /// Encoding label to try, in order; repeat to build the chain [default: utf-8, windows-1252]
    #[arg(short, long = "encoding", value_name = "LABEL")]
    encodings: Vec<String>,

    /// File with one target phrase per line, replacing the built-in e-waste list
    #[arg(short, long)]
    phrases: Option<PathBuf>,

    /// Print the statistics as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Ask for the input directory on stdin. Surrounding quotes, as left by
/// drag-and-drop in some terminals, are removed.
fn prompt_directory() -> anyhow::Result<PathBuf> {
    print!("Digite o caminho da pasta com os arquivos .ris: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim().trim_matches('"')))
}

fn build_config(cli: &Cli) -> anyhow::Result<AnalyzerConfig> {
    let mut config = AnalyzerConfig::new();

    if !cli.encodings.is_empty() {
        let chain = EncodingChain::from_labels(&cli.encodings)?;
        config = config.with_parser(RisParser::new().with_encodings(chain));
    }

    if let Some(path) = &cli.phrases {
        let phrases = TargetPhrases::from_file(path)?;
        if phrases.is_empty() {
            bail!("phrase file {} contains no phrases", path.display());
        }
        config = config.with_phrases(phrases);
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let directory = match &cli.directory {
        Some(directory) => directory.clone(),
        None => prompt_directory()?,
    };
    if !directory.is_dir() {
        bail!("input directory not found: {}", directory.display());
    }

    let config = build_config(&cli)?;

    let Some(analysis) = analyze_directory(&directory, &config)? else {
        eprintln!("Nenhum arquivo .ris encontrado em {}", directory.display());
        return Ok(());
    };

    let mut out = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &analysis.result)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_summary(&analysis.result, config.display_limits()))?;
    }

    for outcome in analysis.failures() {
        if let FileStatus::Failed(err) = &outcome.status {
            eprintln!("Arquivo ignorado: {err}");
        }
    }

    if !cli.no_export {
        let path = cli
            .output
            .clone()
            .unwrap_or_else(|| directory.join(DEFAULT_EXPORT_FILE_NAME));
        let rows = build_rows(&analysis.result, config.export_limits());
        export_csv(&rows, &path)
            .with_context(|| format!("failed to export report to {}", path.display()))?;
        info!(file = %path.display(), rows = rows.len(), "CSV report written");
    }

    Ok(())
}
