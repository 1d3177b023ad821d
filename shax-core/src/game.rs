//! Game state and the phase state machine
//!
//! One [`GameState`] value is one match. All mutation goes through the three
//! game actions ([`place`], [`remove`], [`move_to`]) plus [`stop`]; a failed
//! call returns a [`RuleViolation`] and leaves the state untouched.
//!
//! [`place`]: GameState::place
//! [`remove`]: GameState::remove
//! [`move_to`]: GameState::move_to
//! [`stop`]: GameState::stop

use crate::board::{self, Node, NODES};
use crate::mill;
use crate::piece::{PieceId, Player};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Hard floor on the piece minimum (three pieces are needed for a mill)
pub const MIN_PIECES_FLOOR: u8 = 3;

/// Hard ceiling on the pieces each player places
pub const MAX_PIECES_CEIL: u8 = 12;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game phase; `Stopped` is terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Placement,
    FirstRemoval,
    Removal,
    Movement,
    Stopped,
}

/// Match configuration, clamped at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    min_pieces: u8,
    max_pieces: u8,
}

impl GameConfig {
    pub fn new(min_pieces: u8, max_pieces: u8) -> Self {
        Self {
            min_pieces: min_pieces.max(MIN_PIECES_FLOOR),
            max_pieces: max_pieces.min(MAX_PIECES_CEIL),
        }
    }

    /// A player dropping to this count loses the match
    pub fn min_pieces(&self) -> u8 {
        self.min_pieces
    }

    /// Pieces each player places before removal begins
    pub fn max_pieces(&self) -> u8 {
        self.max_pieces
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(MIN_PIECES_FLOOR, MAX_PIECES_CEIL)
    }
}

/// Why an action was rejected; rejection never mutates the state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RuleViolation {
    #[error("the game is not in the right phase for this action")]
    WrongPhase,
    #[error("it is not this player's turn")]
    NotPlayersTurn,
    #[error("target is not an empty node on the board")]
    InvalidTarget,
    #[error("target is not adjacent to the piece")]
    NonAdjacentTarget,
    #[error("no such piece on the board")]
    PieceNotFound,
    #[error("cannot remove one's own piece")]
    OwnPiece,
    #[error("cannot move an opponent's piece")]
    OpponentPiece,
}

/// Per-player bookkeeping: pieces on the board and the mill baseline used to
/// spot newly formed mills
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PlayerState {
    pieces: u8,
    mills: u8,
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// Outcome of a successful placement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOutcome {
    /// Identity assigned to the new piece
    pub piece: PieceId,
    pub node: Node,
    pub turn: Player,
    pub phase: Phase,
    /// Pieces the next actor can act with (capture targets once placement
    /// has ended, empty while placement continues)
    pub active: Vec<PieceId>,
}

/// Outcome of a successful capture
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveOutcome {
    pub piece: PieceId,
    /// The capture brought the loser down to the minimum
    pub ended: bool,
    pub turn: Player,
    pub phase: Phase,
    /// Capture targets while the first-removal round continues, movable
    /// pieces on entry to the movement phase
    pub active: Vec<PieceId>,
}

/// Outcome of a successful move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub piece: PieceId,
    pub node: Node,
    pub turn: Player,
    pub phase: Phase,
    /// Capture targets when the move completed a mill, otherwise the next
    /// mover's movable pieces
    pub active: Vec<PieceId>,
}

/// Value snapshot of the mutable engine state.
///
/// Taken with [`GameState::snapshot`] and written back with
/// [`GameState::restore`]; the search relies on this to explore sibling
/// branches against an identical baseline.
#[derive(Clone, Debug)]
pub struct Snapshot {
    board: FxHashMap<Node, PieceId>,
    players: [PlayerState; 2],
    turn: Player,
    first_to_mill: Option<Player>,
    phase: Phase,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Full state of one match
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    config: GameConfig,

    /// Board occupancy (sparse: absent node = empty cell)
    board: FxHashMap<Node, PieceId>,

    players: [PlayerState; 2],

    /// Player to act
    turn: Player,

    /// Who formed the first mill during placement; breaks the tie for the
    /// first capture turn
    first_to_mill: Option<Player>,

    phase: Phase,
}

impl GameState {
    /// Start a match: empty board, White to place
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: FxHashMap::default(),
            players: [PlayerState::default(); 2],
            turn: Player::White,
            first_to_mill: None,
            phase: Phase::Placement,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn first_to_mill(&self) -> Option<Player> {
        self.first_to_mill
    }

    pub fn piece_count(&self, player: Player) -> u8 {
        self.players[player.index()].pieces
    }

    pub fn piece_at(&self, node: Node) -> Option<PieceId> {
        self.board.get(&node).copied()
    }

    /// Current location of a piece, `None` once captured
    pub fn node_of(&self, piece: PieceId) -> Option<Node> {
        NODES
            .iter()
            .copied()
            .find(|node| self.board.get(node) == Some(&piece))
    }

    /// Occupied cells in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Node, PieceId)> + '_ {
        NODES
            .iter()
            .filter_map(move |node| self.board.get(node).map(|&id| (*node, id)))
    }

    /// Board export for rendering clients, row-major
    pub fn export(&self) -> Vec<(Node, PieceId)> {
        self.pieces().collect()
    }

    /// The winner once the piece minimum stopped the game
    pub fn winner(&self) -> Option<Player> {
        if self.phase != Phase::Stopped {
            return None;
        }
        [Player::White, Player::Black]
            .into_iter()
            .find(|p| self.players[p.index()].pieces <= self.config.min_pieces)
            .map(|loser| loser.opponent())
    }

    // ========================================================================
    // LEGAL-MOVE QUERIES
    // ========================================================================

    /// A valid, currently empty node
    pub fn is_empty_node(&self, node: Node) -> bool {
        node.is_valid() && !self.board.contains_key(&node)
    }

    /// Empty destinations adjacent to the piece, in neighbor-table order
    pub fn possible_moves(&self, piece: PieceId) -> Vec<Node> {
        match self.node_of(piece) {
            Some(origin) => board::neighbors(origin)
                .unwrap_or(&[])
                .iter()
                .copied()
                .filter(|&node| self.is_empty_node(node))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The player's pieces in row-major board order
    pub fn pieces_of(&self, player: Player) -> Vec<PieceId> {
        self.pieces()
            .filter(|(_, id)| id.owner() == player)
            .map(|(_, id)| id)
            .collect()
    }

    /// Pieces the player may capture: all of the opponent's pieces
    pub fn removable_pieces(&self, player: Player) -> Vec<PieceId> {
        self.pieces_of(player.opponent())
    }

    /// The player's pieces that have at least one empty adjacent node
    pub fn movable_pieces(&self, player: Player) -> Vec<PieceId> {
        self.pieces()
            .filter(|&(node, id)| id.owner() == player && self.has_empty_neighbor(node))
            .map(|(_, id)| id)
            .collect()
    }

    fn has_empty_neighbor(&self, node: Node) -> bool {
        board::neighbors(node)
            .unwrap_or(&[])
            .iter()
            .any(|&other| self.is_empty_node(other))
    }

    // ========================================================================
    // GAME ACTIONS
    // ========================================================================

    /// Place a new piece during the placement phase.
    ///
    /// The turn always passes to the other player; a mill formed here is not
    /// an immediate capture, it only accrues toward the first-removal order.
    /// Once both players are at the configured maximum the phase advances to
    /// first removal, with the first-to-mill player (or the non-starting
    /// player when nobody milled) to act.
    pub fn place(&mut self, node: Node, player: Player) -> Result<PlaceOutcome, RuleViolation> {
        if self.phase != Phase::Placement {
            return Err(RuleViolation::WrongPhase);
        }
        if player != self.turn {
            return Err(RuleViolation::NotPlayersTurn);
        }
        if !self.is_empty_node(node) {
            return Err(RuleViolation::InvalidTarget);
        }

        let piece = PieceId::new(player, self.players[player.index()].pieces);
        self.board.insert(node, piece);
        self.players[player.index()].pieces += 1;

        if self.made_new_mill(player) && self.first_to_mill.is_none() {
            self.first_to_mill = Some(player);
        }

        let mut active = Vec::new();
        if self.players.iter().all(|p| p.pieces >= self.config.max_pieces) {
            self.phase = Phase::FirstRemoval;
            // Without a placement mill, the non-starting player removes first
            self.turn = self.first_to_mill.unwrap_or(Player::Black);
            active = self.removable_pieces(self.turn);
            tracing::debug!(turn = ?self.turn, "placement complete, first removal begins");
        } else {
            self.turn = self.turn.opponent();
        }

        Ok(PlaceOutcome { piece, node, turn: self.turn, phase: self.phase, active })
    }

    /// Capture an opponent piece during a removal phase.
    ///
    /// Removing one's own piece is always rejected; whether the target sits
    /// in a standing mill is irrelevant. Bringing the opponent down to the
    /// minimum stops the game on the spot.
    pub fn remove(&mut self, piece: PieceId, player: Player) -> Result<RemoveOutcome, RuleViolation> {
        if self.phase != Phase::Removal && self.phase != Phase::FirstRemoval {
            return Err(RuleViolation::WrongPhase);
        }
        if player != self.turn {
            return Err(RuleViolation::NotPlayersTurn);
        }
        let node = self.node_of(piece).ok_or(RuleViolation::PieceNotFound)?;
        if piece.owner() == player {
            return Err(RuleViolation::OwnPiece);
        }

        self.board.remove(&node);
        self.players[piece.owner().index()].pieces -= 1;

        if self.min_reached() {
            self.phase = Phase::Stopped;
            tracing::debug!(loser = ?piece.owner(), "piece minimum reached, game over");
            return Ok(RemoveOutcome {
                piece,
                ended: true,
                turn: self.turn,
                phase: self.phase,
                active: Vec::new(),
            });
        }

        let active;
        if self.phase == Phase::FirstRemoval {
            // Every player gets exactly one first-removal turn
            self.turn = self.turn.opponent();
            let movement_begins = match self.first_to_mill {
                Some(first) => self.turn == first,
                None => self.turn == Player::Black,
            };
            if movement_begins {
                self.phase = Phase::Movement;
                active = self.movable_pieces(self.turn);
                tracing::debug!(turn = ?self.turn, "first removals done, movement begins");
            } else {
                active = self.removable_pieces(self.turn);
            }
        } else {
            // The capturer keeps the turn
            self.phase = Phase::Movement;
            active = self.movable_pieces(self.turn);
        }

        Ok(RemoveOutcome {
            piece,
            ended: false,
            turn: self.turn,
            phase: self.phase,
            active,
        })
    }

    /// Move a piece to an adjacent empty node during the movement phase.
    ///
    /// A newly completed mill keeps the turn and opens a capture
    /// ([`Phase::Removal`]); otherwise the turn passes, reverting once if the
    /// new mover has no legal move.
    pub fn move_to(
        &mut self,
        piece: PieceId,
        dest: Node,
        player: Player,
    ) -> Result<MoveOutcome, RuleViolation> {
        if self.phase != Phase::Movement {
            return Err(RuleViolation::WrongPhase);
        }
        if player != self.turn {
            return Err(RuleViolation::NotPlayersTurn);
        }
        if !self.is_empty_node(dest) {
            return Err(RuleViolation::InvalidTarget);
        }
        let origin = self.node_of(piece).ok_or(RuleViolation::PieceNotFound)?;
        if piece.owner() != player {
            return Err(RuleViolation::OpponentPiece);
        }
        let adjacent = board::neighbors(origin).unwrap_or(&[]);
        if !adjacent.contains(&dest) {
            return Err(RuleViolation::NonAdjacentTarget);
        }

        self.board.remove(&origin);
        self.board.insert(dest, piece);

        let active;
        if self.made_new_mill(player) {
            self.phase = Phase::Removal;
            active = self.removable_pieces(self.turn);
            tracing::debug!(player = ?player, "new mill, capture turn");
        } else {
            self.turn = self.turn.opponent();
            let movable = self.movable_pieces(self.turn);
            if movable.is_empty() {
                // Stuck players forfeit the turn back, once
                tracing::debug!(stuck = ?self.turn, "no legal moves, turn passes back");
                self.turn = self.turn.opponent();
                active = self.movable_pieces(self.turn);
            } else {
                active = movable;
            }
        }

        Ok(MoveOutcome { piece, node: dest, turn: self.turn, phase: self.phase, active })
    }

    /// Force the game to its terminal phase (forfeit or disconnect upstream)
    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }

    // ========================================================================
    // SNAPSHOT / RESTORE
    // ========================================================================

    /// Value copy of everything mutable; the config is immutable and excluded
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            players: self.players,
            turn: self.turn,
            first_to_mill: self.first_to_mill,
            phase: self.phase,
        }
    }

    /// Rewind to a snapshot taken from this match
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.board = snapshot.board.clone();
        self.players = snapshot.players;
        self.turn = snapshot.turn;
        self.first_to_mill = snapshot.first_to_mill;
        self.phase = snapshot.phase;
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    /// Re-count the player's mills and report a strict increase over the
    /// stored baseline. The new total becomes the baseline either way, so a
    /// second call on an unchanged board never re-signals.
    fn made_new_mill(&mut self, player: Player) -> bool {
        let total = mill::count_mills(&self.board, player) as u8;
        let baseline = &mut self.players[player.index()].mills;
        let formed = total > *baseline;
        *baseline = total;
        formed
    }

    fn min_reached(&self) -> bool {
        self.players.iter().any(|p| p.pieces <= self.config.min_pieces)
    }
}

// ============================================================================
// TESTS
// ============================================================================
