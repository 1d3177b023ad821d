//! Fixed-depth alpha-beta opponent
//!
//! The search drives the live engine through snapshot/apply/restore cycles:
//! every candidate action is played through the normal game operations, the
//! subtree is scored, and the engine is rewound before the next sibling.
//! Enumeration order is the canonical board order, so results are
//! reproducible and ties break the same way every run.

use crate::board::{Node, NODES};
use crate::eval::evaluate;
use crate::game::{GameState, Phase, RuleViolation};
use crate::piece::{PieceId, Player};
use serde::{Deserialize, Serialize};

/// Default search depth
pub const DEFAULT_DEPTH: u32 = 3;

/// One legal action in whatever phase is active
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Place(Node),
    Remove(PieceId),
    Move { piece: PieceId, to: Node },
}

/// All legal actions for the player to act, in canonical order: empty nodes
/// row-major (placement), opponent pieces row-major (removal phases),
/// (piece, destination) pairs in row-major x neighbor-table order (movement).
pub fn enumerate_actions(state: &GameState) -> Vec<Action> {
    match state.phase() {
        Phase::Placement => NODES
            .iter()
            .copied()
            .filter(|&node| state.is_empty_node(node))
            .map(Action::Place)
            .collect(),
        Phase::FirstRemoval | Phase::Removal => state
            .removable_pieces(state.turn())
            .into_iter()
            .map(Action::Remove)
            .collect(),
        Phase::Movement => {
            let mut actions = Vec::new();
            for piece in state.pieces_of(state.turn()) {
                for to in state.possible_moves(piece) {
                    actions.push(Action::Move { piece, to });
                }
            }
            actions
        }
        Phase::Stopped => Vec::new(),
    }
}

/// Apply an action through the matching engine operation, as the player to act
pub fn apply(state: &mut GameState, action: Action) -> Result<(), RuleViolation> {
    let player = state.turn();
    match action {
        Action::Place(node) => state.place(node, player).map(|_| ()),
        Action::Remove(piece) => state.remove(piece, player).map(|_| ()),
        Action::Move { piece, to } => state.move_to(piece, to, player).map(|_| ()),
    }
}

/// Alpha-beta opponent. Works for either side: Black maximizes the material
/// score, White minimizes it.
#[derive(Clone, Copy, Debug)]
pub struct AlphaBetaAI {
    pub depth: u32,
}

impl AlphaBetaAI {
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }

    /// Best action for the player to act, `None` when there is none.
    ///
    /// The engine is mutated during the search but is back in its entry
    /// state when this returns.
    pub fn best_action(&self, state: &mut GameState) -> Option<Action> {
        let (_, action) = minimax(state, self.depth, i32::MIN, i32::MAX);
        action
    }
}

impl Default for AlphaBetaAI {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

fn minimax(state: &mut GameState, depth: u32, mut alpha: i32, mut beta: i32) -> (i32, Option<Action>) {
    if depth == 0 || state.phase() == Phase::Stopped {
        return (evaluate(state), None);
    }

    let actions = enumerate_actions(state);
    if actions.is_empty() {
        // Only reachable when both players are immobile; score it statically
        return (evaluate(state), None);
    }

    let maximizing = state.turn() == Player::Black;
    let snapshot = state.snapshot();
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_action = None;

    for action in actions {
        apply(state, action).expect("enumerated action must be legal");
        let (score, _) = minimax(state, depth - 1, alpha, beta);
        state.restore(&snapshot);

        if maximizing {
            if score > best_score {
                best_score = score;
                best_action = Some(action);
            }
            alpha = alpha.max(score);
        } else {
            if score < best_score {
                best_score = score;
                best_action = Some(action);
            }
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    (best_score, best_action)
}
