//! Edges command implementation - alignment edges for every sequence pair

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use lara_core::io::read_rna_fasta;
use lara_core::{generate_all_pairs, PairSummary};

use crate::config::Config;
use crate::error::CliError;
use crate::report;
use crate::OutputFormat;

pub fn execute(
    config: &Config,
    input: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    list_edges: bool,
) -> Result<()> {
    log::info!("Starting edge generation");
    log::info!("Input file: {}", input.display());

    if !input.exists() {
        return Err(CliError::file_not_found(input).into());
    }

    let summaries = compute_summaries(config, &input, list_edges)?;

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_report(BufWriter::new(file), format, &summaries)?;
            log::info!("Results written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_report(stdout.lock(), format, &summaries)?;
        }
    }

    Ok(())
}

/// Load sequences from `input` and summarise the edges of every pair.
pub fn compute_summaries(config: &Config, input: &Path, list_edges: bool) -> Result<Vec<PairSummary>> {
    let score_config = config.score_config()?;
    let params = config.batch_params(&score_config)?;

    let sequences = read_rna_fasta(input)
        .with_context(|| format!("Failed to read sequences from {}", input.display()))?;
    log::info!("Loaded {} sequences", sequences.len());

    if sequences.len() < 2 {
        return Err(CliError::invalid_input(format!(
            "{} holds {} sequence(s), at least two are needed",
            input.display(),
            sequences.len()
        ))
        .into());
    }

    let pairs = generate_all_pairs(&sequences, &score_config, &params)
        .context("Edge generation failed")?;

    Ok(pairs
        .iter()
        .map(|pair| pair.to_summary(&sequences, &score_config, list_edges))
        .collect())
}

fn write_report<W: Write>(out: W, format: OutputFormat, summaries: &[PairSummary]) -> Result<()> {
    match format {
        OutputFormat::Tsv => report::write_table(out, summaries),
        OutputFormat::Json => report::write_json(out, summaries),
    }
}
