//! Position evaluation

use crate::game::GameState;
use crate::piece::Player;

/// Material difference, positive when Black is ahead.
///
/// Black is the conventional engine side and maximizes this score; White
/// minimizes it. Captured material is all the game is scored on.
pub fn evaluate(state: &GameState) -> i32 {
    state.piece_count(Player::Black) as i32 - state.piece_count(Player::White) as i32
}
