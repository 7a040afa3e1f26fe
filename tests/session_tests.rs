//! Game session integration tests.
//!
//! Every test drives a seeded [`Game`] with a [`Timeline`], so deals and timer
//! firings are reproducible.

use std::collections::HashMap;
use std::time::Duration;

use memorama::game::{
    CardId, Difficulty, FlipOutcome, Game, ScheduledTask, Session, TaskKind, Timeline,
};
use memorama::{AssetKind, CardFace, GameConfig, SymbolAssets};

const SECOND: Duration = Duration::from_secs(1);

fn start(difficulty: Difficulty, seed: u64) -> (Game, Timeline) {
    let mut game = Game::with_seed(GameConfig::default(), seed);
    let mut timeline = Timeline::new();
    game.start_game(Some(difficulty), &mut timeline).unwrap();
    (game, timeline)
}

fn session(game: &Game) -> &Session {
    game.session().expect("a game should be running")
}

/// Both positions of every symbol, in symbol-table order.
fn pairs(session: &Session) -> Vec<(CardId, CardId)> {
    let mut positions: HashMap<&str, Vec<CardId>> = HashMap::new();
    for card in session.deck() {
        positions.entry(card.symbol).or_default().push(card.id);
    }
    session
        .difficulty()
        .symbols()
        .iter()
        .map(|symbol| {
            let ids = &positions[symbol.id];
            (ids[0], ids[1])
        })
        .collect()
}

fn mismatched(session: &Session) -> (CardId, CardId) {
    let first = &session.deck()[0];
    let second = session
        .deck()
        .iter()
        .find(|card| card.symbol != first.symbol)
        .unwrap();
    (first.id, second.id)
}

// =============================================================================
// Matching
// =============================================================================

/// Find a seed whose Easy deal puts a pair in positions 0 and 1, then play it.
#[test_log::test]
fn easy_pair_in_first_two_positions_matches() {
    let seed = (0..10_000u64)
        .find(|&seed| {
            let (game, _) = start(Difficulty::Easy, seed);
            let deck = session(&game).deck();
            deck[0].symbol == deck[1].symbol
        })
        .expect("some seed deals a pair up front");
    let (mut game, mut timeline) = start(Difficulty::Easy, seed);

    assert_eq!(game.flip_card(0, &mut timeline), FlipOutcome::Revealed);
    assert_eq!(game.flip_card(1, &mut timeline), FlipOutcome::Matched);

    let session = session(&game);
    assert!(session.deck()[0].matched && session.deck()[1].matched);
    assert_eq!(session.matched_pairs(), 1);
    assert_eq!(session.move_count(), 1);
    assert!(session.pending().is_empty());
}

#[test_log::test]
fn mismatch_turns_back_after_the_delay() {
    let (mut game, mut timeline) = start(Difficulty::Easy, 5);
    let (a, b) = mismatched(session(&game));

    game.flip_card(a, &mut timeline);
    assert_eq!(game.flip_card(b, &mut timeline), FlipOutcome::Mismatch);
    {
        let session = session(&game);
        assert!(session.deck()[a].face_up && session.deck()[b].face_up);
        assert_eq!(session.pending(), &[a, b]);
    }

    timeline.advance(&mut game, Duration::from_millis(999));
    assert!(session(&game).deck()[a].face_up);

    timeline.advance(&mut game, Duration::from_millis(1));
    let session = session(&game);
    assert!(!session.deck()[a].face_up && !session.deck()[b].face_up);
    assert!(session.pending().is_empty());
    assert!(!session.is_evaluating());
    assert_eq!(session.move_count(), 1);
    assert_eq!(session.matched_pairs(), 0);
}

#[test]
fn third_flip_during_evaluation_is_ignored() {
    let (mut game, mut timeline) = start(Difficulty::Medium, 8);
    let (a, b) = mismatched(session(&game));
    let c = (0..16).find(|&id| id != a && id != b).unwrap();

    game.flip_card(a, &mut timeline);
    game.flip_card(b, &mut timeline);
    assert_eq!(game.flip_card(c, &mut timeline), FlipOutcome::Ignored);
    assert!(!session(&game).deck()[c].face_up);
    assert_eq!(session(&game).pending().len(), 2);
}

// =============================================================================
// Winning
// =============================================================================

#[test_log::test]
fn perfect_game_wins_and_freezes() {
    for difficulty in Difficulty::ALL {
        let (mut game, mut timeline) = start(difficulty, 21);
        let pairs = pairs(session(&game));
        let last = pairs.len() - 1;

        for (n, (a, b)) in pairs.into_iter().enumerate() {
            timeline.advance(&mut game, SECOND);
            assert!(!game.has_won());
            game.flip_card(a, &mut timeline);
            let expected = if n == last { FlipOutcome::Won } else { FlipOutcome::Matched };
            assert_eq!(game.flip_card(b, &mut timeline), expected);
        }

        assert!(game.has_won());
        let stats = session(&game).stats();
        assert_eq!(stats.moves as usize, difficulty.pair_count());
        assert_eq!(stats.pairs_found, stats.total_pairs);
        assert_eq!(stats.elapsed_secs as usize, difficulty.pair_count());

        // The clock is stopped and nothing else responds.
        assert!(timeline.is_idle());
        timeline.advance(&mut game, SECOND * 10);
        for id in 0..difficulty.card_count() {
            assert_eq!(game.flip_card(id, &mut timeline), FlipOutcome::Ignored);
        }
        assert_eq!(session(&game).stats(), stats);
    }
}

#[test]
fn has_won_is_false_on_the_menu() {
    let game = Game::with_seed(GameConfig::default(), 0);
    assert!(!game.is_started());
    assert!(!game.has_won());
}

// =============================================================================
// Timer
// =============================================================================

#[test]
fn elapsed_counts_one_per_second() {
    let (mut game, mut timeline) = start(Difficulty::Hard, 2);
    for expected in 1..=90 {
        timeline.advance(&mut game, SECOND);
        assert_eq!(session(&game).elapsed_secs(), expected);
    }
    assert_eq!(session(&game).stats().clock(), "01:30");
}

#[test]
fn timer_respects_configured_interval() {
    let config = GameConfig {
        tick_interval_ms: 250,
        ..GameConfig::default()
    };
    let mut game = Game::with_seed(config, 4);
    let mut timeline = Timeline::new();
    game.start_game(Some(Difficulty::Easy), &mut timeline);

    timeline.advance(&mut game, SECOND);
    assert_eq!(session(&game).elapsed_secs(), 4);
}

#[test]
fn starting_again_resets_the_clock() {
    let (mut game, mut timeline) = start(Difficulty::Easy, 3);
    timeline.advance(&mut game, SECOND * 7);
    game.start_game(Some(Difficulty::Hard), &mut timeline);
    assert_eq!(session(&game).elapsed_secs(), 0);
    assert_eq!(session(&game).deck().len(), 24);

    timeline.advance(&mut game, SECOND);
    assert_eq!(session(&game).elapsed_secs(), 1);
}

// =============================================================================
// Session replacement
// =============================================================================

/// A mismatch pending at restart must not touch the new deal.
#[test_log::test]
fn restart_cancels_pending_mismatch() {
    let (mut game, mut timeline) = start(Difficulty::Easy, 13);
    let (a, b) = mismatched(session(&game));
    game.flip_card(a, &mut timeline);
    game.flip_card(b, &mut timeline);

    let new_id = game.restart(&mut timeline).unwrap();
    let kinds: Vec<_> = timeline.pending().map(|task| (task.session, task.kind)).collect();
    assert_eq!(kinds, vec![(new_id, TaskKind::Tick)]);

    let first = game.flip_card(0, &mut timeline);
    assert_eq!(first, FlipOutcome::Revealed);
    timeline.advance(&mut game, SECOND * 2);
    let session = session(&game);
    assert_eq!(session.pending(), &[0]);
    assert!(session.deck()[0].face_up);
    assert_eq!(session.move_count(), 0);
}

#[test]
fn stale_resolution_does_not_hide_new_cards() {
    let (mut game, mut timeline) = start(Difficulty::Easy, 13);
    let (a, b) = mismatched(session(&game));
    game.flip_card(a, &mut timeline);
    game.flip_card(b, &mut timeline);
    let stale = ScheduledTask {
        session: session(&game).id(),
        kind: TaskKind::ResolveMismatch,
        delay: SECOND,
    };

    game.restart(&mut timeline);
    let (c, d) = mismatched(session(&game));
    game.flip_card(c, &mut timeline);
    game.flip_card(d, &mut timeline);

    // A host that failed to cancel still cannot reach the new session.
    game.deliver(stale, &mut timeline);
    assert!(session(&game).is_evaluating());
    assert!(session(&game).deck()[c].face_up);
}

#[test]
fn menu_clears_everything() {
    let (mut game, mut timeline) = start(Difficulty::Medium, 1);
    let (a, b) = mismatched(session(&game));
    game.flip_card(a, &mut timeline);
    game.flip_card(b, &mut timeline);

    game.return_to_menu(&mut timeline);
    assert!(game.session().is_none());
    assert!(timeline.is_idle());
    assert_eq!(timeline.advance(&mut game, SECOND * 5), 0);
    assert_eq!(game.flip_card(0, &mut timeline), FlipOutcome::Ignored);
    assert_eq!(game.restart(&mut timeline), None);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn both_asset_kinds_render_the_same_session() {
    let (mut game, mut timeline) = start(Difficulty::Easy, 30);
    game.flip_card(4, &mut timeline);
    let session = session(&game);
    let symbol = session.deck()[4].symbol;

    let glyphs = SymbolAssets::new(AssetKind::Glyph, "cards");
    let images = SymbolAssets::new(AssetKind::Image, "cards");
    assert!(matches!(glyphs.for_card(&session.deck()[4]), CardFace::Glyph(g) if g != "❓"));
    assert_eq!(
        images.for_card(&session.deck()[4]),
        CardFace::Image(format!("cards/{symbol}.png").into())
    );
    assert_eq!(images.for_card(&session.deck()[5]), images.back());
}
