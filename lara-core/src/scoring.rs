//! Scoring configuration for pairwise RNA alignment
//!
//! Scores live on a scaled integer axis: real-valued substitution and gap
//! scores are multiplied by a precision factor and rounded, so the DP runs on
//! exact integers and results are divided back by the same factor for
//! reporting.

use crate::types::Rna5;
use thiserror::Error;

/// Score on the scaled integer axis.
pub type Score = i32;

/// Marks DP states that cannot be reached.
///
/// `PairwiseGotoh::new` rejects inputs whose reachable scores could come
/// within half of this magnitude, so adding a handful of penalties to the
/// sentinel can never overflow or compare as reachable.
pub const NEG_INF: Score = i32::MIN / 4;

/// Default scale between real scores and the integer axis.
pub const DEFAULT_PRECISION_FACTOR: f32 = 100.0;

/// RIBOSUM85-60 substitution scores for unpaired bases (rows/cols A, C, G, U).
const RIBOSUM85_60: [[f32; 4]; 4] = [
    [2.22, -1.86, -1.46, -1.39],
    [-1.86, 1.16, -2.48, -1.05],
    [-1.46, -2.48, 1.03, -1.74],
    [-1.39, -1.05, -1.74, 1.65],
];

/// Errors that can occur while building a score configuration
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Invalid precision factor: {0} (must be finite and positive)")]
    InvalidPrecisionFactor(f32),

    #[error("Score {value} does not fit the integer score axis after scaling by {factor}")]
    Unrepresentable { value: f32, factor: f32 },

    #[error("Unknown scoring preset: {0}")]
    UnknownPreset(String),
}

pub type ScoreResult<T> = Result<T, ScoreError>;

/// Named substitution schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorePreset {
    /// RIBOSUM85-60 unpaired-base matrix
    Ribosum85_60,
    /// Uniform match/mismatch scores
    Simple,
}

impl ScorePreset {
    pub fn name(&self) -> &'static str {
        match self {
            ScorePreset::Ribosum85_60 => "ribosum85-60",
            ScorePreset::Simple => "simple",
        }
    }

    pub fn available() -> Vec<&'static str> {
        vec!["ribosum85-60", "simple"]
    }
}

impl std::str::FromStr for ScorePreset {
    type Err = ScoreError;

    fn from_str(s: &str) -> ScoreResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ribosum85-60" | "ribosum85_60" | "ribosum" => Ok(ScorePreset::Ribosum85_60),
            "simple" => Ok(ScorePreset::Simple),
            _ => Err(ScoreError::UnknownPreset(s.to_string())),
        }
    }
}

/// 5x5 substitution table indexed by [`Rna5::rank`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    scores: [[Score; Rna5::SIZE]; Rna5::SIZE],
}

impl SubstitutionMatrix {
    pub fn new(scores: [[Score; Rna5::SIZE]; Rna5::SIZE]) -> Self {
        Self { scores }
    }

    /// Identical symbols score `match_score`, everything else `mismatch_score`.
    pub fn uniform(match_score: Score, mismatch_score: Score) -> Self {
        let mut scores = [[mismatch_score; Rna5::SIZE]; Rna5::SIZE];
        for (i, row) in scores.iter_mut().enumerate() {
            row[i] = match_score;
        }
        Self { scores }
    }

    /// RIBOSUM85-60 scaled onto the integer axis. `N` scores 0 against everything.
    pub fn ribosum85_60(precision_factor: f32) -> ScoreResult<Self> {
        let mut scores = [[0; Rna5::SIZE]; Rna5::SIZE];
        for (i, row) in RIBOSUM85_60.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                scores[i][j] = scale(value, precision_factor)?;
            }
        }
        Ok(Self { scores })
    }

    #[inline]
    pub fn score(&self, a: Rna5, b: Rna5) -> Score {
        self.scores[a.rank()][b.rank()]
    }

    /// Largest absolute entry.
    pub fn max_abs(&self) -> Score {
        self.scores
            .iter()
            .flatten()
            .map(|s| s.saturating_abs())
            .max()
            .unwrap_or(0)
    }
}

/// Scale a real score onto the integer axis.
pub fn scale(value: f32, precision_factor: f32) -> ScoreResult<Score> {
    let scaled = (value * precision_factor).round();
    if !scaled.is_finite() || scaled > Score::MAX as f32 || scaled < Score::MIN as f32 {
        return Err(ScoreError::Unrepresentable {
            value,
            factor: precision_factor,
        });
    }
    Ok(scaled as Score)
}

/// Substitution table, affine gap scores and the precision factor.
///
/// Shared read-only by every DP run of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    substitution: SubstitutionMatrix,
    gap_open: Score,
    gap_extend: Score,
    precision_factor: f32,
}

impl ScoreConfig {
    pub fn new(
        substitution: SubstitutionMatrix,
        gap_open: Score,
        gap_extend: Score,
        precision_factor: f32,
    ) -> ScoreResult<Self> {
        if !precision_factor.is_finite() || precision_factor <= 0.0 {
            return Err(ScoreError::InvalidPrecisionFactor(precision_factor));
        }
        Ok(Self {
            substitution,
            gap_open,
            gap_extend,
            precision_factor,
        })
    }

    /// Uniform match/mismatch scoring on an unscaled axis (precision factor 1).
    pub fn simple(match_score: Score, mismatch_score: Score, gap_open: Score, gap_extend: Score) -> Self {
        Self {
            substitution: SubstitutionMatrix::uniform(match_score, mismatch_score),
            gap_open,
            gap_extend,
            precision_factor: 1.0,
        }
    }

    /// RIBOSUM85-60 with real-valued gap scores, everything scaled by `precision_factor`.
    pub fn ribosum85_60(gap_open: f32, gap_extend: f32, precision_factor: f32) -> ScoreResult<Self> {
        let substitution = SubstitutionMatrix::ribosum85_60(precision_factor)?;
        Self::new(
            substitution,
            scale(gap_open, precision_factor)?,
            scale(gap_extend, precision_factor)?,
            precision_factor,
        )
    }

    #[inline]
    pub fn substitution(&self, a: Rna5, b: Rna5) -> Score {
        self.substitution.score(a, b)
    }

    pub fn substitution_matrix(&self) -> &SubstitutionMatrix {
        &self.substitution
    }

    #[inline]
    pub fn gap_open(&self) -> Score {
        self.gap_open
    }

    #[inline]
    pub fn gap_extend(&self) -> Score {
        self.gap_extend
    }

    pub fn precision_factor(&self) -> f32 {
        self.precision_factor
    }

    /// Convert a real-valued score (e.g. a tolerance) onto this configuration's axis.
    pub fn to_scaled(&self, value: f32) -> ScoreResult<Score> {
        scale(value, self.precision_factor)
    }

    /// Convert a scaled score back to real units.
    pub fn to_real(&self, score: Score) -> f32 {
        score as f32 / self.precision_factor
    }

    /// Largest magnitude any single DP step can add.
    pub fn max_step(&self) -> i64 {
        let gaps = (self.gap_open as i64).abs().max((self.gap_extend as i64).abs());
        gaps.max(self.substitution.max_abs() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_matrix() {
        let m = SubstitutionMatrix::uniform(2, -1);
        assert_eq!(m.score(Rna5::A, Rna5::A), 2);
        assert_eq!(m.score(Rna5::N, Rna5::N), 2);
        assert_eq!(m.score(Rna5::A, Rna5::U), -1);
        assert_eq!(m.max_abs(), 2);
    }

    #[test]
    fn test_ribosum_scaling() {
        let m = SubstitutionMatrix::ribosum85_60(100.0).unwrap();
        assert_eq!(m.score(Rna5::A, Rna5::A), 222);
        assert_eq!(m.score(Rna5::C, Rna5::G), -248);
        assert_eq!(m.score(Rna5::U, Rna5::U), 165);
        assert_eq!(m.score(Rna5::N, Rna5::A), 0);
        // symmetric
        for a in Rna5::ALL {
            for b in Rna5::ALL {
                assert_eq!(m.score(a, b), m.score(b, a));
            }
        }
    }

    #[test]
    fn test_ribosum_config() {
        let config = ScoreConfig::ribosum85_60(-6.0, -2.0, 100.0).unwrap();
        assert_eq!(config.gap_open(), -600);
        assert_eq!(config.gap_extend(), -200);
        assert_eq!(config.to_scaled(0.5).unwrap(), 50);
        assert!((config.to_real(-600) + 6.0).abs() < 1e-6);
        assert_eq!(config.max_step(), 600);
    }

    #[test]
    fn test_invalid_precision_factor() {
        let m = SubstitutionMatrix::uniform(1, -1);
        assert!(matches!(
            ScoreConfig::new(m.clone(), -3, -1, 0.0),
            Err(ScoreError::InvalidPrecisionFactor(_))
        ));
        assert!(ScoreConfig::new(m, -3, -1, f32::NAN).is_err());
    }

    #[test]
    fn test_unrepresentable_score() {
        assert!(matches!(
            scale(1.0e9, 100.0),
            Err(ScoreError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("RIBOSUM85-60".parse::<ScorePreset>().unwrap(), ScorePreset::Ribosum85_60);
        assert_eq!("simple".parse::<ScorePreset>().unwrap(), ScorePreset::Simple);
        assert!("blosum62".parse::<ScorePreset>().is_err());
    }

    #[test]
    fn test_sentinel_headroom() {
        // a few penalties below the sentinel must not overflow
        let penalty: Score = -1_000_000;
        assert!(NEG_INF.checked_add(penalty * 4).is_some());
    }
}
