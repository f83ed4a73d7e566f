// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-genes CLI
//!
//! Command-line interface for resolving gene symbols against a reference
//! gene table and repairing gene columns of MAF files.

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;

use ferro_gene_matcher::cli::{output_error, output_maf_report, output_match_report, OutputFormat};
use ferro_gene_matcher::commands::{match_file, update_maf_file};
use ferro_gene_matcher::config::{CliOverrides, GeneMatcherConfig};
use ferro_gene_matcher::maf::MafUpdateOptions;
use ferro_gene_matcher::{GeneMatchError, Matcher};

#[derive(Parser)]
#[command(name = "ferro-genes")]
#[command(author, version, about = "Gene symbol matcher and MAF symbol updater")]
#[command(
    long_about = "Resolve (symbol, chromosome) pairs to canonical gene symbols and ids.

Examples:
  ferro-genes match -i genes.txt -r gene_info.tsv -o results
  ferro-genes update-maf -i tumor.maf -r gene_info.tsv --drop-unmatched
  ferro-genes config -o .ferro-genes.toml"
)]
struct Cli {
    /// Configuration file (default: .ferro-genes.toml, then ~/.config/ferro/genes.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a headerless tab-separated file of symbols and chromosomes
    Match {
        /// Input file with symbol and chromosome columns
        #[arg(short, long)]
        input: PathBuf,

        /// Reference gene table (overrides the config file)
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Directory for the _full, _converted and _failed files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output format for the summary
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Rewrite the gene symbol and id columns of a MAF file
    UpdateMaf {
        /// Input MAF file (may be gzip-compressed)
        #[arg(short, long)]
        input: PathBuf,

        /// Output MAF file (default: input name with the configured suffix)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reference gene table (overrides the config file)
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Drop rows whose gene could not be resolved
        #[arg(long)]
        drop_unmatched: bool,

        /// Output format for the summary
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Generate a sample configuration file
    Config {
        /// Output path for configuration file
        #[arg(short, long, default_value = ".ferro-genes.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let file_config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Match {
            input,
            reference,
            output_dir,
            format,
        } => {
            let config = file_config.merge_with_cli(&CliOverrides {
                reference,
                output_dir,
                log_level: cli.log_level,
                ..Default::default()
            });
            init_tracing(&config.logging.level)?;
            let format: OutputFormat = format.parse().unwrap_or_default();
            run_match(&config, &input, format).unwrap_or_else(|e| fail(&e, format));
            Ok(())
        }
        Commands::UpdateMaf {
            input,
            output,
            reference,
            drop_unmatched,
            format,
        } => {
            let config = file_config.merge_with_cli(&CliOverrides {
                reference,
                drop_unmatched,
                log_level: cli.log_level,
                ..Default::default()
            });
            init_tracing(&config.logging.level)?;
            let format: OutputFormat = format.parse().unwrap_or_default();
            run_update_maf(&config, &input, output.as_deref(), format)
                .unwrap_or_else(|e| fail(&e, format));
            Ok(())
        }
        Commands::Config { output, force } => config_command(&file_config, &output, force),
    }
}

/// Load the config named on the command line, or search the default locations.
fn load_config(path: Option<&Path>) -> Result<GeneMatcherConfig, GeneMatchError> {
    match path {
        Some(path) => GeneMatcherConfig::load_from_path(path),
        None => Ok(GeneMatcherConfig::load().unwrap_or_default()),
    }
}

fn run_match(
    config: &GeneMatcherConfig,
    input: &Path,
    format: OutputFormat,
) -> Result<(), GeneMatchError> {
    let mut matcher = Matcher::from_path(config.reference_path()?)?;
    std::fs::create_dir_all(&config.output.directory)?;

    info!("Matching {}", input.display());
    let report = match_file(&mut matcher, input, &config.output.directory)?;
    output_match_report(&mut io::stdout().lock(), &report, format)?;
    Ok(())
}

fn run_update_maf(
    config: &GeneMatcherConfig,
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<(), GeneMatchError> {
    let mut matcher = Matcher::from_path(config.reference_path()?)?;
    let options = MafUpdateOptions::new().drop_unmatched(config.maf.drop_unmatched);

    info!("Updating gene columns of {}", input.display());
    let report = update_maf_file(&mut matcher, input, output, &config.maf.suffix, &options)?;
    output_maf_report(&mut io::stdout().lock(), &report, format)?;
    Ok(())
}

fn config_command(
    config: &GeneMatcherConfig,
    output_path: &Path,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if output_path.exists() && !force {
        eprintln!(
            "Configuration file already exists: {}",
            output_path.display()
        );
        eprintln!("Use --force to overwrite");
        std::process::exit(1);
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    config.to_file(output_path)?;

    println!(
        "Sample configuration file created: {}",
        output_path.display()
    );
    Ok(())
}

/// Report an error in the requested format and exit.
fn fail(e: &GeneMatchError, format: OutputFormat) -> ! {
    let _ = output_error(&mut io::stderr().lock(), e, format);
    std::process::exit(1);
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    info!("Tracing initialized with level: {}", level);
    Ok(())
}
