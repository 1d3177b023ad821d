//! Match command - play game series between two computer players
//!
//! Either side can be the alpha-beta engine or a seeded uniform-random
//! baseline, which makes the command double as a quick strength check.

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use shax_core::{
    enumerate_actions, Action, AlphaBetaAI, GameConfig, GameState, Phase, Player, DEFAULT_DEPTH,
};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Search depth for the alpha-beta players
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// A player dropping to this count loses (floor 3)
    #[arg(long, default_value = "3")]
    pub min_pieces: u8,

    /// Pieces each player places (ceiling 12)
    #[arg(long, default_value = "6")]
    pub max_pieces: u8,

    /// Safety cap on actions per game; a capped game counts as a draw
    #[arg(long, default_value = "400")]
    pub max_actions: usize,

    /// White plays uniformly random legal actions instead of searching
    #[arg(long)]
    pub random_white: bool,

    /// Black plays uniformly random legal actions instead of searching
    #[arg(long)]
    pub random_black: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    winner: Option<Player>,
    actions: usize,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    white_wins: usize,
    black_wins: usize,
    draws: usize,
    avg_actions: f32,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run match command: play every game, then report
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting match: {} games, depth={}, pieces {}..{}",
        args.games,
        args.depth,
        args.min_pieces,
        args.max_pieces
    );

    let results = play_match(&args, seed);
    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs, seed: Option<u64>) -> MatchResults {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_number in 1..=args.games {
        let record = play_single_game(game_number, args, &mut rng);
        tracing::info!(
            "Game {}: {} ({} actions)",
            record.game_number,
            describe_winner(record.winner),
            record.actions
        );
        games.push(record);
    }

    compute_match_statistics(games)
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// STEPS
// ============================================================================

/// Play one game to the stop condition or the action cap
fn play_single_game(game_number: usize, args: &MatchArgs, rng: &mut ChaCha8Rng) -> GameRecord {
    let mut state = GameState::new(GameConfig::new(args.min_pieces, args.max_pieces));
    let ai = AlphaBetaAI::new(args.depth);
    let mut actions = 0;

    while state.phase() != Phase::Stopped && actions < args.max_actions {
        let is_random = match state.turn() {
            Player::White => args.random_white,
            Player::Black => args.random_black,
        };
        let action = if is_random {
            random_action(&state, rng)
        } else {
            ai.best_action(&mut state)
        };

        match action {
            Some(action) => {
                // Enumerated and searched actions are always legal
                shax_core::apply(&mut state, action).expect("chosen action must be legal");
                actions += 1;
            }
            // Both players immobile: nobody can act, score it a draw
            None => break,
        }
    }

    GameRecord { game_number, winner: state.winner(), actions }
}

/// Pick a uniformly random legal action
fn random_action(state: &GameState, rng: &mut ChaCha8Rng) -> Option<Action> {
    let actions = enumerate_actions(state);
    if actions.is_empty() {
        None
    } else {
        Some(actions[rng.gen_range(0..actions.len())])
    }
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let white_wins = games.iter().filter(|g| g.winner == Some(Player::White)).count();
    let black_wins = games.iter().filter(|g| g.winner == Some(Player::Black)).count();
    let draws = games.iter().filter(|g| g.winner.is_none()).count();

    let total_actions: usize = games.iter().map(|g| g.actions).sum();
    let avg_actions = if games.is_empty() {
        0.0
    } else {
        total_actions as f32 / games.len() as f32
    };

    MatchResults { games, white_wins, black_wins, draws, avg_actions }
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Create RNG from seed or entropy
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn describe_winner(winner: Option<Player>) -> &'static str {
    match winner {
        Some(Player::White) => "White wins",
        Some(Player::Black) => "Black wins",
        None => "Draw",
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: Option<Player>,
        actions: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        white_wins: usize,
        black_wins: usize,
        draws: usize,
        avg_actions: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        white_wins: results.white_wins,
        black_wins: results.black_wins,
        draws: results.draws,
        avg_actions: results.avg_actions,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                winner: g.winner,
                actions: g.actions,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();
    let percent = |count: usize| {
        if total > 0 {
            count as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    };

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("White wins:  {} ({:.1}%)", results.white_wins, percent(results.white_wins));
    println!("Black wins:  {} ({:.1}%)", results.black_wins, percent(results.black_wins));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws));
    println!("Avg actions: {:.1}", results.avg_actions);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} in {} actions",
            game.game_number,
            describe_winner(game.winner),
            game.actions
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
