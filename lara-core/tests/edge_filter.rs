use lara_core::*;

fn seq(id: &str, residues: &str) -> RnaSequence {
    RnaSequence::from_bytes(id, residues.as_bytes())
}

fn simple() -> ScoreConfig {
    ScoreConfig::simple(2, -1, -3, -1)
}

fn edges_at(a: &RnaSequence, b: &RnaSequence, config: &ScoreConfig, diff: Score) -> EdgeMask {
    let mut mask = EdgeMask::new(a.len(), b.len());
    generate_edges(&mut mask, a, b, config, diff).expect("generate edges");
    mask
}

#[test]
fn identical_triplet_admits_only_diagonal() {
    let a = seq("a", "AUG");
    let b = seq("b", "AUG");
    let config = simple();

    let forward = PairwiseGotoh::new(&a, &b, &config).unwrap();
    assert_eq!(forward.optimal_score(), 6);

    let mask = edges_at(&a, &b, &config, 0);
    assert_eq!(mask.edges().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn single_symbol_against_empty() {
    let a = seq("a", "A");
    let b = seq("b", "");
    let config = simple();

    let mut mask = EdgeMask::new(1, 0);
    let summary = generate_edges_with_summary(&mut mask, &a, &b, &config, 0).unwrap();
    assert_eq!(summary.optimal_score, config.gap_open());
    assert_eq!(summary.admitted, 0);
    assert!(mask.is_empty());
    assert!(summary.identity.is_finite());
    assert!((summary.identity - (-3.0)).abs() < 1e-6);
}

#[test]
fn growing_tolerance_never_shrinks_admission() {
    let a = seq("a", "GGAUCCAGUA");
    let b = seq("b", "GGUCAAGCUA");
    let config = simple();

    let mut previous = edges_at(&a, &b, &config, 0);
    for diff in 1..=20 {
        let current = edges_at(&a, &b, &config, diff);
        assert!(previous.is_subset_of(&current), "tolerance {} lost edges", diff);
        previous = current;
    }
    let everything = edges_at(&a, &b, &config, 1_000);
    assert!(previous.is_subset_of(&everything));
    assert_eq!(everything.count(), a.len() * b.len());
}

#[test]
fn boundary_prefix_scores() {
    let a = seq("a", "ACGUA");
    let b = seq("b", "UUG");
    let config = ScoreConfig::ribosum85_60(-6.0, -2.0, 100.0).unwrap();
    let dp = PairwiseGotoh::new(&a, &b, &config).unwrap();

    assert_eq!(dp.prefix_score(0, 0).unwrap(), 0);
    for i in 1..=a.len() {
        assert_eq!(dp.prefix_score(i, 0).unwrap(), -600 - 200 * (i as Score - 1));
    }
    for j in 1..=b.len() {
        assert_eq!(dp.prefix_score(0, j).unwrap(), -600 - 200 * (j as Score - 1));
    }
    assert!(matches!(dp.prefix_score(6, 0), Err(GotohError::OutOfBounds { .. })));
}

#[test]
fn ribosum_self_alignment_is_diagonal() {
    let a = seq("a", "GGAUCCAU");
    let config = ScoreConfig::ribosum85_60(-6.0, -2.0, 100.0).unwrap();
    let diagonal: Score = a
        .as_slice()
        .iter()
        .map(|&s| config.substitution(s, s))
        .sum();

    let mut mask = EdgeMask::new(a.len(), a.len());
    let summary = generate_edges_with_summary(&mut mask, &a, &a, &config, 0).unwrap();
    assert_eq!(summary.optimal_score, diagonal);
    for i in 0..a.len() {
        assert_eq!(mask.get(i, i), Some(true));
    }
    let expected_identity = config.to_real(diagonal) / a.len() as f32;
    assert!((summary.identity - expected_identity).abs() < 1e-5);
}

#[test]
fn identity_normalised_by_longer_sequence() {
    let a = seq("a", "AUGAUG");
    let b = seq("b", "AUG");
    let config = simple();
    let mut mask = EdgeMask::new(a.len(), b.len());
    let summary = generate_edges_with_summary(&mut mask, &a, &b, &config, 0).unwrap();
    // AUG matched (6) plus one gap of three (-3 -1 -1)
    assert_eq!(summary.optimal_score, 1);
    assert!((summary.identity - 1.0 / 6.0).abs() < 1e-6);
    // both copies of AUG are equally good targets
    assert_eq!(mask.count(), 6);
}

#[test]
fn batch_over_loaded_sequences() {
    let fasta = ">r1 first\nGGAUCC\n>r2\nGGAUC\n>r3\nGAUCC\n";
    let sequences = io::parse_rna_reader(std::io::Cursor::new(fasta)).unwrap();
    let config = simple();
    let params = BatchParams {
        suboptimal_diff: 0,
        on_error: FailurePolicy::Abort,
    };

    let pairs = generate_all_pairs(&sequences, &config, &params).unwrap();
    assert_eq!(pairs.len(), 3);
    for pair in &pairs {
        let a = &sequences[pair.idx_a];
        let b = &sequences[pair.idx_b];
        let expected = edges_at(a, b, &config, 0);
        assert_eq!(pair.mask, expected);
        assert!(!pair.mask.is_empty());
    }
    let summary = pairs[0].to_summary(&sequences, &config, false);
    assert_eq!(summary.seq_a, "r1");
    assert_eq!(summary.seq_b, "r2");
}
