//! Property tests for the DP engine and edge filter

use lara_core::*;
use proptest::prelude::*;

fn symbols(max_len: usize) -> impl Strategy<Value = Vec<Rna5>> {
    prop::collection::vec(prop::sample::select(Rna5::ALL.to_vec()), 0..=max_len)
}

/// Gap open no better than gap extend, and a mismatch never worse than two
/// gap extensions, so every optimal alignment can be rewritten to use at
/// least one aligned column.
fn scoring() -> impl Strategy<Value = ScoreConfig> {
    (-4i32..=0, 0i32..=6, 1i32..=5).prop_flat_map(|(ge, extra_open, matched)| {
        (2 * ge..=0).prop_map(move |mismatch| ScoreConfig::simple(matched, mismatch, ge - extra_open, ge))
    })
}

fn mask_for(a: &[Rna5], b: &[Rna5], config: &ScoreConfig, diff: Score) -> EdgeMask {
    let mut mask = EdgeMask::new(a.len(), b.len());
    generate_edges(&mut mask, a, b, config, diff).expect("generate edges");
    mask
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Aligned,
    GapInA,
    GapInB,
}

/// Every alignment of `a` and `b` as a column sequence.
fn all_alignments(len_a: usize, len_b: usize) -> Vec<Vec<Column>> {
    fn walk(i: usize, j: usize, len_a: usize, len_b: usize, path: &mut Vec<Column>, out: &mut Vec<Vec<Column>>) {
        if i == len_a && j == len_b {
            out.push(path.clone());
            return;
        }
        let steps = [
            (Column::Aligned, i < len_a && j < len_b, i + 1, j + 1),
            (Column::GapInA, j < len_b, i, j + 1),
            (Column::GapInB, i < len_a, i + 1, j),
        ];
        for (column, allowed, next_i, next_j) in steps {
            if allowed {
                path.push(column);
                walk(next_i, next_j, len_a, len_b, path, out);
                path.pop();
            }
        }
    }

    let mut out = Vec::new();
    walk(0, 0, len_a, len_b, &mut Vec::new(), &mut out);
    out
}

/// Score of one alignment and the position pairs it aligns.
fn score_alignment(path: &[Column], a: &[Rna5], b: &[Rna5], config: &ScoreConfig) -> (Score, Vec<(usize, usize)>) {
    let (mut i, mut j) = (0, 0);
    let mut score = 0;
    let mut aligned = Vec::new();
    let mut previous = None;
    for &column in path {
        match column {
            Column::Aligned => {
                score += config.substitution(a[i], b[j]);
                aligned.push((i, j));
                i += 1;
                j += 1;
            }
            Column::GapInA => {
                score += if previous == Some(Column::GapInA) { config.gap_extend() } else { config.gap_open() };
                j += 1;
            }
            Column::GapInB => {
                score += if previous == Some(Column::GapInB) { config.gap_extend() } else { config.gap_open() };
                i += 1;
            }
        }
        previous = Some(column);
    }
    (score, aligned)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn forward_and_backward_optima_agree(a in symbols(24), b in symbols(24), config in scoring()) {
        let forward = PairwiseGotoh::new(a.as_slice(), b.as_slice(), &config).unwrap();
        let backward = PairwiseGotoh::new(&Reversed::new(a.as_slice()), &Reversed::new(b.as_slice()), &config).unwrap();
        prop_assert_eq!(forward.optimal_score(), backward.optimal_score());
    }

    #[test]
    fn smaller_tolerance_admits_subset(
        a in symbols(16),
        b in symbols(16),
        config in scoring(),
        low in 0i32..10,
        extra in 0i32..10,
    ) {
        prop_assume!(!a.is_empty() || !b.is_empty());
        let tight = mask_for(&a, &b, &config, low);
        let loose = mask_for(&a, &b, &config, low + extra);
        prop_assert!(tight.is_subset_of(&loose));
    }

    #[test]
    fn zero_tolerance_nonempty_iff_both_nonempty(a in symbols(16), b in symbols(16), config in scoring()) {
        prop_assume!(!a.is_empty() || !b.is_empty());
        let mask = mask_for(&a, &b, &config, 0);
        prop_assert_eq!(!mask.is_empty(), !a.is_empty() && !b.is_empty());
    }

    #[test]
    fn self_alignment_admits_diagonal(a in symbols(20), matched in 1i32..5, mismatch in -5i32..=0) {
        prop_assume!(!a.is_empty());
        let config = ScoreConfig::simple(matched, mismatch, -3, -1);
        let dp = PairwiseGotoh::new(a.as_slice(), a.as_slice(), &config).unwrap();
        prop_assert_eq!(dp.optimal_score(), matched * a.len() as Score);
        let mask = mask_for(&a, &a, &config, 0);
        for i in 0..a.len() {
            prop_assert_eq!(mask.get(i, i), Some(true));
        }
    }

    #[test]
    fn boundary_is_a_single_gap_run(len_a in 0usize..30, len_b in 0usize..30, config in scoring()) {
        let a = vec![Rna5::A; len_a];
        let b = vec![Rna5::C; len_b];
        let dp = PairwiseGotoh::new(a.as_slice(), b.as_slice(), &config).unwrap();
        prop_assert_eq!(dp.prefix_score(0, 0).unwrap(), 0);
        for i in 1..=len_a {
            prop_assert_eq!(dp.prefix_score(i, 0).unwrap(), config.gap_open() + config.gap_extend() * (i as Score - 1));
        }
        for j in 1..=len_b {
            prop_assert_eq!(dp.prefix_score(0, j).unwrap(), config.gap_open() + config.gap_extend() * (j as Score - 1));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn matches_exhaustive_enumeration(a in symbols(4), b in symbols(4), config in scoring(), diff in 0i32..6) {
        prop_assume!(!a.is_empty() || !b.is_empty());
        let scored: Vec<_> = all_alignments(a.len(), b.len())
            .iter()
            .map(|path| score_alignment(path, &a, &b, &config))
            .collect();
        let best = scored.iter().map(|(s, _)| *s).max().unwrap();

        let dp = PairwiseGotoh::new(a.as_slice(), b.as_slice(), &config).unwrap();
        prop_assert_eq!(dp.optimal_score(), best);

        let mut expected = EdgeMask::new(a.len(), b.len());
        for (score, aligned) in &scored {
            if *score >= best - diff {
                for &(i, j) in aligned {
                    expected.set(i, j);
                }
            }
        }
        prop_assert_eq!(mask_for(&a, &b, &config, diff), expected);
    }
}
