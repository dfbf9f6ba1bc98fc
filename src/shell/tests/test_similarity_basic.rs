use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::shell::{
    ShellParameter, ShellParameters, ShellPreset, SimilarityThresholds, distance, first_mismatch,
    is_similar,
};

#[test]
fn distance_is_zero_on_self_and_symmetric() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let p = ShellParameters::random_with(&mut rng);
        let q = ShellParameters::random_with(&mut rng);
        assert_eq!(distance(&p, &p), 0.0);
        assert_eq!(distance(&p, &q), distance(&q, &p));
        assert!(distance(&p, &q) > 0.0);
    }
}

#[test]
fn distance_is_plain_euclidean() {
    let p = ShellParameters::new();
    let mut q = p;
    q.big_a += 3.0;
    q.omega += 4.0;
    assert_eq!(distance(&p, &q), 5.0);

    // `d` is not part of the vector.
    let mut r = p;
    r.d = -1.0;
    assert_eq!(distance(&p, &r), 0.0);
}

#[test]
fn similarity_is_reflexive() {
    for preset in ShellPreset::ALL {
        let p = ShellParameters::preset(preset);
        assert!(is_similar(&p, &p, &SimilarityThresholds::GAME));
    }
}

#[test]
fn thresholds_are_inclusive() {
    let p = ShellParameters::new();

    let mut q = p;
    q.big_a = p.big_a + 1.5;
    assert!(is_similar(&p, &q, &SimilarityThresholds::GAME));

    q.big_a = p.big_a + 1.51;
    assert!(!is_similar(&p, &q, &SimilarityThresholds::GAME));
    assert!(!is_similar(&q, &p, &SimilarityThresholds::GAME));

    let mut q = p;
    q.theta = p.theta + 0.25;
    assert!(is_similar(&p, &q, &SimilarityThresholds::GAME));
    q.theta = p.theta + 0.26;
    assert!(!is_similar(&p, &q, &SimilarityThresholds::GAME));
}

#[test]
fn unlisted_parameters_are_ignored() {
    let p = ShellParameters::new();
    let mut q = p;
    q.mu = 45.0;
    q.omega = 10.0;
    q.phi = 80.0;
    assert!(is_similar(&p, &q, &SimilarityThresholds::GAME));
    assert_eq!(SimilarityThresholds::GAME.threshold(ShellParameter::Mu), None);
    assert_eq!(SimilarityThresholds::GAME.threshold(ShellParameter::Beta), Some(8.0));
}

#[test]
fn first_mismatch_reports_in_table_order() {
    let p = ShellParameters::new();
    let mut q = p;
    q.b = p.b + 4.0;
    q.alpha = p.alpha + 2.0;

    let mismatch = first_mismatch(&p, &q, &SimilarityThresholds::GAME).unwrap();
    assert_eq!(mismatch.parameter, ShellParameter::Alpha);
    assert_eq!(mismatch.difference, 2.0);
    assert_eq!(mismatch.threshold, 1.5);

    let custom = [(ShellParameter::B, 3.0)];
    let mismatch = first_mismatch(&p, &q, &SimilarityThresholds::new(&custom)).unwrap();
    assert_eq!(mismatch.parameter, ShellParameter::B);
}

#[test]
fn nan_never_counts_as_similar() {
    let p = ShellParameters::new();
    let mut q = p;
    q.big_a = f64::NAN;
    assert!(!is_similar(&p, &q, &SimilarityThresholds::GAME));
}
