//! Alignment-edge filtering
//!
//! Admits every position pair `(a, b)` whose best alignment through the
//! column `A[a] ~ B[b]` scores within a tolerance of the global optimum. The
//! best such score is assembled from a forward DP over the sequences, the
//! substitution score of the pair, and a backward DP over the reversed
//! sequences.

use crate::gotoh::{GotohError, PairwiseGotoh};
use crate::scoring::{Score, ScoreConfig};
use crate::types::{Reversed, Symbols};
use bitvec::prelude::*;
use thiserror::Error;

/// Errors that can occur during edge generation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EdgeError {
    #[error("Both sequences are empty")]
    EmptyPair,

    #[error("Edge mask is {mask_a}x{mask_b} but sequences are {len_a}x{len_b}")]
    MaskShape {
        mask_a: usize,
        mask_b: usize,
        len_a: usize,
        len_b: usize,
    },

    #[error("Suboptimality tolerance must be non-negative, got {0}")]
    NegativeTolerance(Score),

    #[error("Forward optimum {forward} differs from backward optimum {backward}")]
    AsymmetricOptimum { forward: Score, backward: Score },

    #[error("DP error: {0}")]
    Gotoh(#[from] GotohError),
}

pub type EdgeResult<T> = Result<T, EdgeError>;

/// Boolean grid over all position pairs of two sequences.
///
/// Bit `(a, b)` lives at `len_b * a + b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    len_a: usize,
    len_b: usize,
    bits: BitVec,
}

impl EdgeMask {
    /// An all-false mask for sequences of the given lengths.
    pub fn new(len_a: usize, len_b: usize) -> Self {
        Self {
            len_a,
            len_b,
            bits: bitvec![0; len_a * len_b],
        }
    }

    pub fn len_a(&self) -> usize {
        self.len_a
    }

    pub fn len_b(&self) -> usize {
        self.len_b
    }

    #[inline]
    fn offset(&self, a: usize, b: usize) -> Option<usize> {
        (a < self.len_a && b < self.len_b).then(|| self.len_b * a + b)
    }

    /// `None` if `(a, b)` is outside the grid.
    pub fn get(&self, a: usize, b: usize) -> Option<bool> {
        self.offset(a, b).map(|i| self.bits[i])
    }

    /// Mark `(a, b)`. Returns false if the pair is outside the grid.
    pub fn set(&mut self, a: usize, b: usize) -> bool {
        match self.offset(a, b) {
            Some(i) => {
                self.bits.set(i, true);
                true
            }
            None => false,
        }
    }

    /// Reset every bit to false.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Number of admitted pairs.
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Admitted pairs in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let len_b = self.len_b;
        self.bits.iter_ones().map(move |i| (i / len_b, i % len_b))
    }

    /// True if every pair admitted here is also admitted in `other`.
    pub fn is_subset_of(&self, other: &EdgeMask) -> bool {
        self.len_a == other.len_a
            && self.len_b == other.len_b
            && self.bits.iter_ones().all(|i| other.bits[i])
    }
}

/// Outcome of one edge-generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSummary {
    /// Global optimum on the scaled axis
    pub optimal_score: Score,
    /// Minimum combined score for admission
    pub threshold: Score,
    /// Cells that passed the test in this call
    pub admitted: usize,
    /// Optimum in real units divided by the longer sequence length
    pub identity: f32,
}

/// Fill `edges` with admissible pairs and return the identity score.
///
/// See [`generate_edges_with_summary`] for the full outcome.
pub fn generate_edges<A, B>(
    edges: &mut EdgeMask,
    seq_a: &A,
    seq_b: &B,
    config: &ScoreConfig,
    suboptimal_diff: Score,
) -> EdgeResult<f32>
where
    A: Symbols + ?Sized,
    B: Symbols + ?Sized,
{
    generate_edges_with_summary(edges, seq_a, seq_b, config, suboptimal_diff).map(|s| s.identity)
}

/// Fill `edges` with every pair lying on some alignment scoring at least
/// `optimum - suboptimal_diff`. Bits are only ever set, never cleared.
pub fn generate_edges_with_summary<A, B>(
    edges: &mut EdgeMask,
    seq_a: &A,
    seq_b: &B,
    config: &ScoreConfig,
    suboptimal_diff: Score,
) -> EdgeResult<EdgeSummary>
where
    A: Symbols + ?Sized,
    B: Symbols + ?Sized,
{
    let len_a = seq_a.len();
    let len_b = seq_b.len();

    if suboptimal_diff < 0 {
        return Err(EdgeError::NegativeTolerance(suboptimal_diff));
    }
    if len_a == 0 && len_b == 0 {
        return Err(EdgeError::EmptyPair);
    }
    if edges.len_a() != len_a || edges.len_b() != len_b {
        return Err(EdgeError::MaskShape {
            mask_a: edges.len_a(),
            mask_b: edges.len_b(),
            len_a,
            len_b,
        });
    }

    let forward = PairwiseGotoh::new(seq_a, seq_b, config)?;
    let backward = PairwiseGotoh::new(&Reversed::new(seq_a), &Reversed::new(seq_b), config)?;

    let optimal_score = forward.optimal_score();
    let backward_score = backward.optimal_score();
    debug_assert_eq!(optimal_score, backward_score);
    if optimal_score != backward_score {
        return Err(EdgeError::AsymmetricOptimum {
            forward: optimal_score,
            backward: backward_score,
        });
    }

    let threshold = optimal_score.saturating_sub(suboptimal_diff);
    let mut admitted = 0;

    for a in 0..len_a {
        let sym_a = seq_a.symbol(a);
        for b in 0..len_b {
            let combined = forward.cell_max(a, b)
                + config.substitution(sym_a, seq_b.symbol(b))
                + backward.cell_max(len_a - a - 1, len_b - b - 1);
            if combined >= threshold {
                edges.set(a, b);
                admitted += 1;
            }
        }
    }

    let identity = config.to_real(optimal_score) / len_a.max(len_b) as f32;
    log::trace!(
        "Admitted {} of {} edges (optimum {}, threshold {})",
        admitted,
        len_a * len_b,
        optimal_score,
        threshold
    );

    Ok(EdgeSummary {
        optimal_score,
        threshold,
        admitted,
        identity,
    })
}
