use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::shell::{
    GameRound, ParameterError, ParameterRanges, ShellParameter, ShellParameters,
};

#[test]
fn guess_shares_fixed_fields_with_target() {
    let mut rng = StdRng::seed_from_u64(11);
    let round = GameRound::new_with(&mut rng);

    assert!(ParameterRanges::DEFAULT.contains(round.target()));
    for param in GameRound::FIXED {
        assert_eq!(round.guess().get(param), round.target().get(param), "{param}");
    }

    let start = ShellParameters::new();
    for param in [
        ShellParameter::BigA,
        ShellParameter::Alpha,
        ShellParameter::Beta,
        ShellParameter::A,
    ] {
        assert_eq!(round.guess().get(param), start.get(param), "{param}");
    }
}

#[test]
fn seeded_rounds_are_reproducible() {
    let a = GameRound::new_with(&mut StdRng::seed_from_u64(3));
    let b = GameRound::new_with(&mut StdRng::seed_from_u64(3));
    assert_eq!(a, b);
}

#[test]
fn fixed_fields_are_refused_and_others_clamped() {
    let mut round = GameRound::with_target(ShellParameters::new());

    assert_eq!(
        round.set_guess(ShellParameter::Theta, 5.0),
        Err(ParameterError::FixedParameter(ShellParameter::Theta))
    );
    assert_eq!(
        round.set_guess(ShellParameter::BigA, f64::NAN),
        Err(ParameterError::NonFiniteValue(ShellParameter::BigA))
    );

    assert_eq!(round.set_guess(ShellParameter::BigA, 99.0), Ok(13.0));
    assert_eq!(round.guess().big_a, 13.0);
    assert_eq!(round.set_guess(ShellParameter::Alpha, 10.0), Ok(80.0));
}

#[test]
fn matching_the_target_wins() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut round = GameRound::new_with(&mut rng);
    let target = *round.target();

    for param in ShellParameter::ALL {
        if !GameRound::is_fixed(param) {
            round.set_guess(param, target.get(param)).unwrap();
        }
    }
    assert!(round.is_won());
    assert_eq!(round.distance(), 0.0);
    assert_eq!(round.mismatch(), None);
}

#[test]
fn far_guess_loses_with_a_reason() {
    let mut target = ShellParameters::new();
    target.big_a = 13.0;
    let round = GameRound::with_target(target);

    assert!(!round.is_won());
    assert_eq!(round.distance(), 8.0);
    let mismatch = round.mismatch().unwrap();
    assert_eq!(mismatch.parameter, ShellParameter::BigA);
    assert_eq!(mismatch.difference, 8.0);
}
