//! Fixed board graph for Shax
//!
//! The board is a 7x7 grid of which only 24 intersections are playable:
//! three concentric squares whose edge midpoints are joined by four spokes.
//! Adjacency is the only geometry the engine consults; every straight
//! capture line is reachable through the neighbor lists alone.

use serde::{Deserialize, Serialize};

/// The length/width of the board's grid
pub const BOARD_SIZE: i8 = 7;

/// Grid coordinates of a board intersection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub x: i8,
    pub y: i8,
}

impl Node {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if this coordinate is one of the 24 playable nodes
    pub fn is_valid(self) -> bool {
        neighbors(self).is_some()
    }
}

const fn n(x: i8, y: i8) -> Node {
    Node::new(x, y)
}

/// All playable nodes in row-major grid order.
///
/// This is the canonical scan order: mill detection, legal-move queries and
/// the search all enumerate the board through this table so that results are
/// reproducible.
pub const NODES: [Node; 24] = [
    n(0, 0), n(3, 0), n(6, 0),
    n(1, 1), n(3, 1), n(5, 1),
    n(2, 2), n(3, 2), n(4, 2),
    n(0, 3), n(1, 3), n(2, 3), n(4, 3), n(5, 3), n(6, 3),
    n(2, 4), n(3, 4), n(4, 4),
    n(1, 5), n(3, 5), n(5, 5),
    n(0, 6), n(3, 6), n(6, 6),
];

/// Adjacency lists, grouped square by square.
///
/// The list order is fixed and load-bearing: destination enumeration and the
/// ally scan in mill detection both walk it front to back.
static ADJACENCY: [(Node, &[Node]); 24] = [
    // Outer square
    (n(0, 0), &[n(0, 3), n(3, 0)]),
    (n(0, 3), &[n(0, 0), n(1, 3), n(0, 6)]),
    (n(0, 6), &[n(0, 3), n(3, 6)]),
    (n(3, 6), &[n(0, 6), n(3, 5), n(6, 6)]),
    (n(6, 6), &[n(3, 6), n(6, 3)]),
    (n(6, 3), &[n(6, 6), n(5, 3), n(6, 0)]),
    (n(6, 0), &[n(6, 3), n(3, 0)]),
    (n(3, 0), &[n(6, 0), n(3, 1), n(0, 0)]),

    // Middle square
    (n(1, 1), &[n(1, 3), n(3, 1)]),
    (n(1, 3), &[n(1, 1), n(2, 3), n(0, 3), n(1, 5)]),
    (n(1, 5), &[n(1, 3), n(3, 5)]),
    (n(3, 5), &[n(1, 5), n(3, 4), n(3, 6), n(5, 5)]),
    (n(5, 5), &[n(3, 5), n(5, 3)]),
    (n(5, 3), &[n(5, 5), n(4, 3), n(6, 3), n(5, 1)]),
    (n(5, 1), &[n(5, 3), n(3, 1)]),
    (n(3, 1), &[n(5, 1), n(3, 2), n(3, 0), n(1, 1)]),

    // Inner square
    (n(2, 2), &[n(3, 2), n(2, 3)]),
    (n(2, 3), &[n(2, 2), n(1, 3), n(2, 4)]),
    (n(2, 4), &[n(2, 3), n(3, 4)]),
    (n(3, 4), &[n(2, 4), n(3, 5), n(4, 4)]),
    (n(4, 4), &[n(3, 4), n(4, 3)]),
    (n(4, 3), &[n(4, 4), n(5, 3), n(4, 2)]),
    (n(4, 2), &[n(4, 3), n(3, 2)]),
    (n(3, 2), &[n(4, 2), n(3, 1), n(2, 2)]),
];

/// Neighbor list for a node, `None` off the graph
pub fn neighbors(node: Node) -> Option<&'static [Node]> {
    ADJACENCY
        .iter()
        .find(|(that, _)| *that == node)
        .map(|(_, adjacent)| *adjacent)
}

/// Static graph export (node -> neighbors) for clients rendering the board
pub fn adjacency() -> impl Iterator<Item = (Node, &'static [Node])> {
    NODES
        .iter()
        .map(|&node| (node, neighbors(node).expect("NODES entries are on the graph")))
}
