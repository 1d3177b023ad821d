//! Mill ("jare") detection
//!
//! A mill is three allied pieces on a straight line of the board graph.
//! Counting is a single pass in the canonical node order, so the result is
//! reproducible and re-running it on an unchanged board gives the same total.

use crate::board::{neighbors, Node, NODES};
use crate::piece::{PieceId, Player};
use rustc_hash::FxHashMap;

/// Count the player's mills on the board.
///
/// Each of the player's nodes not already part of a counted mill looks for
/// two not-yet-counted allied neighbors, walking the neighbor table front to
/// back; on success all three nodes are consumed for the rest of the pass.
/// Straightness of the triple is a structural property of the fixed graph
/// and is not re-verified here.
pub fn count_mills(board: &FxHashMap<Node, PieceId>, player: Player) -> usize {
    let mut consumed: Vec<Node> = Vec::new();
    let mut total = 0;

    for &node in NODES.iter() {
        if !owned_by(board, node, player) || consumed.contains(&node) {
            continue;
        }

        let mut ally: Option<Node> = None;
        for &neighbor in neighbors(node).unwrap_or(&[]) {
            if consumed.contains(&neighbor) || !owned_by(board, neighbor, player) {
                continue;
            }
            match ally {
                None => ally = Some(neighbor),
                Some(first) => {
                    total += 1;
                    consumed.extend([node, neighbor, first]);
                    break;
                }
            }
        }
    }

    total
}

fn owned_by(board: &FxHashMap<Node, PieceId>, node: Node, player: Player) -> bool {
    board.get(&node).is_some_and(|id| id.owner() == player)
}
