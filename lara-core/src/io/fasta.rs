//! FASTA/FASTQ input for RNA sequence sets
//!
//! Parsing is delegated to needletail, which also detects gzip-compressed
//! input. Residues are mapped onto the [`Rna5`](crate::types::Rna5) alphabet.

use std::path::Path;
use thiserror::Error;

use needletail::{parse_fastx_file, parse_fastx_reader};
use crate::types::RnaSequence;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
}

pub type FastaResult<T> = Result<T, FastaError>;

/// Read every record of a FASTA/FASTQ file.
pub fn read_rna_fasta<P: AsRef<Path>>(path: P) -> FastaResult<Vec<RnaSequence>> {
    log::debug!("Reading sequences from {}", path.as_ref().display());
    let reader = parse_fastx_file(&path).map_err(|e| FastaError::Parse(e.to_string()))?;
    collect_records(reader)
}

/// Read every record from any readable source.
pub fn parse_rna_reader<R: std::io::Read + Send>(reader: R) -> FastaResult<Vec<RnaSequence>> {
    let reader = parse_fastx_reader(reader).map_err(|e| FastaError::Parse(e.to_string()))?;
    collect_records(reader)
}

fn collect_records(mut reader: Box<dyn needletail::FastxReader + '_>) -> FastaResult<Vec<RnaSequence>> {
    let mut sequences = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
        sequences.push(record_to_sequence(&record));
    }

    if sequences.is_empty() {
        Err(FastaError::EmptyFile)
    } else {
        log::debug!("Loaded {} sequences", sequences.len());
        Ok(sequences)
    }
}

/// The identifier is the first whitespace-delimited token of the header.
fn record_to_sequence(record: &needletail::parser::SequenceRecord) -> RnaSequence {
    let header = String::from_utf8_lossy(record.id());
    let id = header.split_whitespace().next().unwrap_or_default().to_string();
    RnaSequence::from_bytes(id, &record.seq())
}
