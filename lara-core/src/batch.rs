//! All-pairs edge generation over a sequence set
//!
//! Every unordered pair `(i, j)`, `i < j`, gets its own edge mask. Pairs only
//! share the read-only score configuration, so they are computed in parallel.

use crate::edges::{generate_edges_with_summary, EdgeError, EdgeMask, EdgeSummary};
use crate::scoring::{Score, ScoreConfig};
use crate::types::RnaSequence;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during batch processing
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("At least two sequences are required, got {0}")]
    TooFewSequences(usize),

    #[error("Pair ({idx_a}, {idx_b}) failed: {source}")]
    Pair {
        idx_a: usize,
        idx_b: usize,
        #[source]
        source: EdgeError,
    },
}

pub type BatchResult<T> = Result<T, BatchError>;

/// What to do when a single pair fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the batch and report the failing pair
    #[default]
    Abort,
    /// Log the failure and leave the pair out
    Skip,
}

/// Parameters for a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchParams {
    /// Tolerance below the optimum, on the scaled axis
    pub suboptimal_diff: Score,
    pub on_error: FailurePolicy,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            suboptimal_diff: 0,
            on_error: FailurePolicy::Abort,
        }
    }
}

/// Edges for one sequence pair.
#[derive(Debug, Clone)]
pub struct PairEdges {
    pub idx_a: usize,
    pub idx_b: usize,
    pub mask: EdgeMask,
    pub summary: EdgeSummary,
}

/// Serialisable digest of a [`PairEdges`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    pub seq_a: String,
    pub seq_b: String,
    pub len_a: usize,
    pub len_b: usize,
    /// Optimal score in real units
    pub optimal_score: f32,
    pub identity: f32,
    pub edge_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<(usize, usize)>>,
}

impl PairEdges {
    pub fn edge_count(&self) -> usize {
        self.mask.count()
    }

    /// Summarise against the sequence set the batch ran on.
    pub fn to_summary(&self, sequences: &[RnaSequence], config: &ScoreConfig, with_edges: bool) -> PairSummary {
        let seq_a = &sequences[self.idx_a];
        let seq_b = &sequences[self.idx_b];
        PairSummary {
            seq_a: seq_a.id.clone(),
            seq_b: seq_b.id.clone(),
            len_a: seq_a.len(),
            len_b: seq_b.len(),
            optimal_score: config.to_real(self.summary.optimal_score),
            identity: self.summary.identity,
            edge_count: self.edge_count(),
            edges: with_edges.then(|| self.mask.edges().collect()),
        }
    }
}

/// All unordered index pairs `(i, j)` with `i < j < n`, row-major.
pub fn pair_indices(n: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((i, j));
        }
    }
    pairs
}

fn run_pair(
    sequences: &[RnaSequence],
    config: &ScoreConfig,
    suboptimal_diff: Score,
    (idx_a, idx_b): (usize, usize),
) -> BatchResult<PairEdges> {
    log::debug!("Sequence {} with {}", idx_a, idx_b);
    let seq_a = &sequences[idx_a];
    let seq_b = &sequences[idx_b];
    let mut mask = EdgeMask::new(seq_a.len(), seq_b.len());
    let summary = generate_edges_with_summary(&mut mask, seq_a, seq_b, config, suboptimal_diff)
        .map_err(|source| BatchError::Pair { idx_a, idx_b, source })?;
    Ok(PairEdges {
        idx_a,
        idx_b,
        mask,
        summary,
    })
}

/// Generate edges for every pair of `sequences`.
///
/// Results follow [`pair_indices`] order. Under [`FailurePolicy::Skip`] failed
/// pairs are missing from the output.
pub fn generate_all_pairs(
    sequences: &[RnaSequence],
    config: &ScoreConfig,
    params: &BatchParams,
) -> BatchResult<Vec<PairEdges>> {
    if sequences.len() < 2 {
        return Err(BatchError::TooFewSequences(sequences.len()));
    }

    let pairs = pair_indices(sequences.len());
    log::info!(
        "Generating edges for {} pairs of {} sequences",
        pairs.len(),
        sequences.len()
    );

    let results: Vec<BatchResult<PairEdges>> = pairs
        .par_iter()
        .map(|&pair| run_pair(sequences, config, params.suboptimal_diff, pair))
        .collect();

    let mut out = Vec::with_capacity(results.len());
    for result in results {
        match (result, params.on_error) {
            (Ok(edges), _) => out.push(edges),
            (Err(e), FailurePolicy::Abort) => return Err(e),
            (Err(e), FailurePolicy::Skip) => log::warn!("Skipping: {}", e),
        }
    }

    let total_edges: usize = out.iter().map(PairEdges::edge_count).sum();
    log::info!("Admitted {} edges across {} pairs", total_edges, out.len());
    Ok(out)
}
