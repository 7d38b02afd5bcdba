//! Sequence input for LaRA
//!
//! Loads RNA sequence sets from FASTA/FASTQ files.

pub mod fasta;

pub use fasta::{parse_rna_reader, read_rna_fasta, FastaError, FastaResult};
