//! Gotoh affine-gap global alignment scores
//!
//! Fills the three-state DP (match/mismatch, horizontal gap, vertical gap) for
//! every prefix pair of two sequences in one pass at construction time. Only
//! scores are kept; no traceback is recorded.

use crate::matrix::DpMatrix;
use crate::scoring::{Score, ScoreConfig, NEG_INF};
use crate::types::Symbols;
use thiserror::Error;

/// Errors that can occur in the DP engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GotohError {
    #[error("Prefix ({a}, {b}) out of bounds for sequence lengths ({len_a}, {len_b})")]
    OutOfBounds {
        a: usize,
        b: usize,
        len_a: usize,
        len_b: usize,
    },

    #[error("Scores for sequence lengths ({len_a}, {len_b}) could reach the sentinel range")]
    ScoreRange { len_a: usize, len_b: usize },
}

pub type GotohResult<T> = Result<T, GotohError>;

/// The three DP states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpState {
    /// Ends with A[a-1] aligned to B[b-1]
    Match,
    /// Ends with a symbol of B against a gap in A
    Horizontal,
    /// Ends with a symbol of A against a gap in B
    Vertical,
}

/// Fully populated Gotoh matrices for one sequence pair.
#[derive(Debug, Clone)]
pub struct PairwiseGotoh {
    len_a: usize,
    len_b: usize,
    m: DpMatrix,
    h: DpMatrix,
    v: DpMatrix,
}

impl PairwiseGotoh {
    /// Run the DP over `seq_a` (rows) and `seq_b` (columns).
    pub fn new<A, B>(seq_a: &A, seq_b: &B, config: &ScoreConfig) -> GotohResult<Self>
    where
        A: Symbols + ?Sized,
        B: Symbols + ?Sized,
    {
        let len_a = seq_a.len();
        let len_b = seq_b.len();

        let worst = (len_a as i64 + len_b as i64 + 1).saturating_mul(config.max_step());
        if worst >= (NEG_INF as i64).abs() / 2 {
            return Err(GotohError::ScoreRange { len_a, len_b });
        }

        let rows = len_a + 1;
        let cols = len_b + 1;
        let mut m = DpMatrix::new(rows, cols, NEG_INF);
        let mut h = DpMatrix::new(rows, cols, NEG_INF);
        let mut v = DpMatrix::new(rows, cols, NEG_INF);
        let go = config.gap_open();
        let ge = config.gap_extend();

        m[(0, 0)] = 0;

        // first column: only vertical gaps reach it
        for a in 1..rows {
            let gap = go + ge * (a as Score - 1);
            m[(a, 0)] = gap;
            v[(a, 0)] = gap;
        }

        // first row: only horizontal gaps reach it
        for b in 1..cols {
            let gap = go + ge * (b as Score - 1);
            m[(0, b)] = gap;
            h[(0, b)] = gap;
        }

        for a in 1..rows {
            let sym_a = seq_a.symbol(a - 1);
            for b in 1..cols {
                let diag = m[(a - 1, b - 1)].max(h[(a - 1, b - 1)]).max(v[(a - 1, b - 1)]);
                m[(a, b)] = diag + config.substitution(sym_a, seq_b.symbol(b - 1));

                h[(a, b)] = (m[(a, b - 1)] + go)
                    .max(h[(a, b - 1)] + ge)
                    .max(v[(a, b - 1)] + go);

                v[(a, b)] = (m[(a - 1, b)] + go)
                    .max(h[(a - 1, b)] + go)
                    .max(v[(a - 1, b)] + ge);
            }
        }

        log::trace!("Filled {}x{} Gotoh matrices", rows, cols);

        Ok(Self { len_a, len_b, m, h, v })
    }

    pub fn len_a(&self) -> usize {
        self.len_a
    }

    pub fn len_b(&self) -> usize {
        self.len_b
    }

    fn check_bounds(&self, a: usize, b: usize) -> GotohResult<()> {
        if a > self.len_a || b > self.len_b {
            return Err(GotohError::OutOfBounds {
                a,
                b,
                len_a: self.len_a,
                len_b: self.len_b,
            });
        }
        Ok(())
    }

    /// Best score over all states for prefixes `A[..a]` and `B[..b]`.
    pub fn prefix_score(&self, a: usize, b: usize) -> GotohResult<Score> {
        self.check_bounds(a, b)?;
        Ok(self.cell_max(a, b))
    }

    /// Unchecked variant for callers iterating within `0..=len`.
    #[inline]
    pub(crate) fn cell_max(&self, a: usize, b: usize) -> Score {
        self.m[(a, b)].max(self.h[(a, b)]).max(self.v[(a, b)])
    }

    /// Score of a single state at prefix `(a, b)`.
    pub fn state_score(&self, state: DpState, a: usize, b: usize) -> GotohResult<Score> {
        self.check_bounds(a, b)?;
        let matrix = match state {
            DpState::Match => &self.m,
            DpState::Horizontal => &self.h,
            DpState::Vertical => &self.v,
        };
        Ok(matrix[(a, b)])
    }

    /// Global optimum over the full sequences.
    pub fn optimal_score(&self) -> Score {
        self.cell_max(self.len_a, self.len_b)
    }
}
