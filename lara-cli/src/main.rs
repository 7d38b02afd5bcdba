use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use anyhow::{Result, Context};

mod config;
mod commands;
mod error;
mod report;

use config::Config;
use lara_core::FailurePolicy;

#[derive(Parser)]
#[command(name = "lara")]
#[command(about = "LaRA - alignment edge filter for structural RNA alignment")]
#[command(version)]
#[command(long_about = "
Computes, for every pair of RNA sequences, the position pairs that occur in
some alignment scoring within a tolerance of the optimal affine-gap alignment.

Examples:
  lara edges --input rfam.fa
  lara edges --input rfam.fa --preset simple --suboptimal-diff 5 --json
  lara config --output lara.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate alignment edges for every pair of sequences
    Edges {
        /// Input sequence file (FASTA/FASTQ, optionally gzipped)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if not given)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scoring preset (ribosum85-60, simple)
        #[arg(long)]
        preset: Option<String>,

        /// Gap open score
        #[arg(long, allow_negative_numbers = true)]
        gap_open: Option<f32>,

        /// Gap extend score
        #[arg(long, allow_negative_numbers = true)]
        gap_extend: Option<f32>,

        /// Match score (simple preset)
        #[arg(long, allow_negative_numbers = true)]
        match_score: Option<f32>,

        /// Mismatch score (simple preset)
        #[arg(long, allow_negative_numbers = true)]
        mismatch_score: Option<f32>,

        /// Tolerance below the optimal score for admitting edges
        #[arg(short, long, allow_negative_numbers = true)]
        suboptimal_diff: Option<f32>,

        /// Leave failing pairs out instead of aborting
        #[arg(long)]
        skip_failed: bool,

        /// Output format
        #[arg(long, default_value = "tsv")]
        format: OutputFormat,

        /// Shorthand for --format json
        #[arg(long)]
        json: bool,

        /// Include the admitted position pairs in the output
        #[arg(long)]
        list_edges: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(threads) = cli.threads {
        config.general.threads = threads;
    }
    if config.general.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.general.threads)
            .build_global()
            .context("Failed to set thread count")?;
    }
    log::debug!("Using {} threads", rayon::current_num_threads());

    match cli.command {
        Commands::Edges {
            input,
            output,
            preset,
            gap_open,
            gap_extend,
            match_score,
            mismatch_score,
            suboptimal_diff,
            skip_failed,
            format,
            json,
            list_edges,
        } => {
            if let Some(preset) = preset {
                config.scoring.preset = preset;
            }
            if let Some(v) = gap_open {
                config.scoring.gap_open = v;
            }
            if let Some(v) = gap_extend {
                config.scoring.gap_extend = v;
            }
            if let Some(v) = match_score {
                config.scoring.match_score = v;
            }
            if let Some(v) = mismatch_score {
                config.scoring.mismatch_score = v;
            }
            if let Some(v) = suboptimal_diff {
                config.filter.suboptimal_diff = v;
            }
            if skip_failed {
                config.filter.on_error = FailurePolicy::Skip;
            }
            let format = if json { OutputFormat::Json } else { format };

            commands::edges::execute(&config, input, output, format, list_edges)?;
        }

        Commands::Config { output } => match output {
            Some(path) => {
                config.save_to_file(&path)?;
                log::info!("Configuration written to: {}", path.display());
            }
            None => {
                let content = toml::to_string_pretty(&config)
                    .context("Failed to serialize configuration")?;
                print!("{}", content);
            }
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose, cli.quiet) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", error::format_error_with_suggestions(&e));
        std::process::exit(1);
    }
}
