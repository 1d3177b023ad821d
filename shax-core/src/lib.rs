//! Shax Core - Rules engine and computer opponent
//!
//! This crate provides the core game logic for Shax:
//! - Board graph (three nested squares on a 7x7 grid, 24 nodes)
//! - Piece identity and per-player bookkeeping
//! - Mill ("jare") detection
//! - Phase state machine: placement, first removal, removal, movement
//! - Material evaluation
//! - Fixed-depth alpha-beta opponent

pub mod board;
pub mod piece;
pub mod mill;
pub mod game;
pub mod eval;
pub mod ai;

// Re-exports for convenient access
pub use board::{adjacency, neighbors, Node, BOARD_SIZE, NODES};
pub use piece::{PieceId, Player, PLAYER_BITS};
pub use game::{
    GameConfig, GameState, MoveOutcome, Phase, PlaceOutcome, RemoveOutcome, RuleViolation,
    Snapshot, MAX_PIECES_CEIL, MIN_PIECES_FLOOR,
};
pub use eval::evaluate;
pub use ai::{apply, enumerate_actions, Action, AlphaBetaAI, DEFAULT_DEPTH};
