//! Statistical checks on dealing.
//!
//! A sort driven by a random comparator clusters cards near where they
//! started. These tests count where each symbol lands over many deals and
//! compare against a uniform permutation with a chi-square statistic.

use memorama::game::{Difficulty, deal};
use rand::SeedableRng;
use rand::rngs::StdRng;

const TRIALS: usize = 12_000;

/// Far beyond any plausible value for a uniform deal at these degrees of freedom
/// (11 for Easy, 23 for Hard), while a positional bias blows well past it.
fn critical_value(positions: usize) -> f64 {
    match positions {
        12 => 45.0,
        24 => 70.0,
        other => panic!("no critical value for {other} positions"),
    }
}

fn chi_square(observed: &[usize], expected: f64) -> f64 {
    observed
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// For each symbol, how many times it landed in each position.
fn position_counts(difficulty: Difficulty, seed: u64) -> Vec<Vec<usize>> {
    let symbols = difficulty.symbols();
    let cards = difficulty.card_count();
    let mut counts = vec![vec![0usize; cards]; symbols.len()];
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..TRIALS {
        for card in deal(difficulty, &mut rng) {
            let symbol = symbols.iter().position(|s| s.id == card.symbol).unwrap();
            counts[symbol][card.id] += 1;
        }
    }
    counts
}

fn assert_uniform(difficulty: Difficulty, seed: u64) {
    let cards = difficulty.card_count();
    // Each deal places two copies of a symbol among `cards` slots.
    let expected = (TRIALS * 2) as f64 / cards as f64;

    for (symbol, observed) in position_counts(difficulty, seed).iter().enumerate() {
        assert_eq!(observed.iter().sum::<usize>(), TRIALS * 2);
        let statistic = chi_square(observed, expected);
        assert!(
            statistic < critical_value(cards),
            "{:?} symbol {} looks position-biased: chi2 = {statistic:.2}",
            difficulty,
            difficulty.symbols()[symbol].id,
        );
    }
}

#[test]
fn easy_deal_has_no_positional_bias() {
    assert_uniform(Difficulty::Easy, 0x5eed);
}

#[test]
fn hard_deal_has_no_positional_bias() {
    assert_uniform(Difficulty::Hard, 0xface);
}

#[test]
fn first_card_symbol_is_uniform() {
    let difficulty = Difficulty::Medium;
    let symbols = difficulty.symbols();
    let mut rng = StdRng::seed_from_u64(77);
    let mut counts = vec![0usize; symbols.len()];

    for _ in 0..TRIALS {
        let deck = deal(difficulty, &mut rng);
        let symbol = symbols.iter().position(|s| s.id == deck[0].symbol).unwrap();
        counts[symbol] += 1;
    }

    // 7 degrees of freedom.
    let statistic = chi_square(&counts, TRIALS as f64 / symbols.len() as f64);
    assert!(statistic < 35.0, "first card biased: chi2 = {statistic:.2}");
}
