//! Integration tests for the Shax engine and computer opponent
//!
//! Drives full games through the public crate surface the way the CLI does.

use shax_core::{
    ai::{apply, AlphaBetaAI},
    game::{GameConfig, GameState, Phase},
    piece::Player,
    Action,
};

// ============================================================================
// HELPERS
// ============================================================================

/// Play one engine-vs-engine game, checking state invariants after every
/// action; returns the action log
fn play_game(config: GameConfig, depth: u32, cap: usize) -> (GameState, Vec<Action>) {
    let mut state = GameState::new(config);
    let ai = AlphaBetaAI::new(depth);
    let mut log = Vec::new();

    while state.phase() != Phase::Stopped && log.len() < cap {
        let Some(action) = ai.best_action(&mut state) else {
            break;
        };
        apply(&mut state, action).expect("searched action must be legal");
        assert_invariants(&state);
        log.push(action);
    }

    (state, log)
}

fn assert_invariants(state: &GameState) {
    let white = state.piece_count(Player::White) as usize;
    let black = state.piece_count(Player::Black) as usize;
    assert_eq!(white + black, state.pieces().count());

    let max = state.config().max_pieces() as usize;
    assert!(white <= max && black <= max);

    for (_, id) in state.pieces() {
        assert_eq!(
            state.pieces().filter(|&(_, other)| other == id).count(),
            1,
            "piece id {:?} occupies more than one cell",
            id
        );
    }
}

// ============================================================================
// FULL GAMES
// ============================================================================

#[test]
fn test_four_piece_game_is_decided_at_first_capture() {
    // Four pieces against a floor of three: the first capture ends it
    let (state, log) = play_game(GameConfig::new(3, 4), 2, 50);

    assert_eq!(state.phase(), Phase::Stopped);
    assert_eq!(log.len(), 9); // 8 placements + 1 removal
    assert!(state.winner().is_some());
}

#[test]
fn test_six_piece_game_progresses_past_placement() {
    let (state, log) = play_game(GameConfig::new(3, 6), 2, 200);

    // Placement and both first removals must have happened
    assert!(log.len() >= 14);
    assert!(log.iter().take(12).all(|a| matches!(a, Action::Place(_))));
    assert!(matches!(log[12], Action::Remove(_)));
    assert!(matches!(log[13], Action::Remove(_)));

    // Either somebody won or the game hit the cap still running
    if state.phase() == Phase::Stopped {
        assert!(state.winner().is_some());
    } else {
        assert_eq!(log.len(), 200);
    }
}

#[test]
fn test_matches_are_deterministic() {
    let (state_a, log_a) = play_game(GameConfig::new(3, 6), 2, 120);
    let (state_b, log_b) = play_game(GameConfig::new(3, 6), 2, 120);

    assert_eq!(log_a, log_b);
    assert_eq!(state_a.export(), state_b.export());
    assert_eq!(state_a.phase(), state_b.phase());
}

#[test]
fn test_forfeit_stops_the_match() {
    let mut state = GameState::new(GameConfig::new(3, 6));
    let ai = AlphaBetaAI::new(2);

    for _ in 0..4 {
        let action = ai.best_action(&mut state).unwrap();
        apply(&mut state, action).unwrap();
    }

    state.stop();
    assert_eq!(state.phase(), Phase::Stopped);
    assert!(ai.best_action(&mut state).is_none());
}
