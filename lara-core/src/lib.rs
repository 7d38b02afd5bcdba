//! LaRA Core Library
//!
//! Alignment-edge filtering for Lagrangian relaxed structural RNA alignment:
//! a Gotoh affine-gap DP engine, the forward/backward edge admissibility test,
//! an all-pairs batch driver and FASTA input.

pub mod types;
pub mod scoring;
pub mod matrix;
pub mod gotoh;
pub mod edges;
pub mod batch;
pub mod io;

// Re-export commonly used types and functions
pub use types::{Rna5, RnaSequence, Reversed, Symbols};
pub use scoring::{Score, ScoreConfig, ScoreError, ScorePreset, SubstitutionMatrix, NEG_INF, DEFAULT_PRECISION_FACTOR};
pub use matrix::DpMatrix;
pub use gotoh::{DpState, GotohError, PairwiseGotoh};
pub use edges::{generate_edges, generate_edges_with_summary, EdgeError, EdgeMask, EdgeSummary};
pub use batch::{generate_all_pairs, pair_indices, BatchError, BatchParams, FailurePolicy, PairEdges, PairSummary};

/// Version information for the LaRA core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
