//! Play command - interactive game against the computer
//!
//! The human plays White and opens the game; the engine answers as Black.
//! Pieces are addressed by label (W0, B3), nodes by grid coordinates.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use shax_core::{
    AlphaBetaAI, Action, GameConfig, GameState, Node, Phase, PieceId, Player, BOARD_SIZE,
    DEFAULT_DEPTH,
};

#[derive(Args)]
pub struct PlayArgs {
    /// Engine search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// A player dropping to this count loses (floor 3)
    #[arg(long, default_value = "3")]
    pub min_pieces: u8,

    /// Pieces each player places (ceiling 12)
    #[arg(long, default_value = "6")]
    pub max_pieces: u8,
}

/// A parsed human command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Act(Action),
    Help,
    Quit,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let mut state = GameState::new(GameConfig::new(args.min_pieces, args.max_pieces));
    let ai = AlphaBetaAI::new(args.depth);

    println!("You are White; the engine is Black.");
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while state.phase() != Phase::Stopped {
        if state.turn() == Player::White {
            print!("{}", render_board(&state));
            println!("Phase: {:?}. Your turn.", state.phase());
            print!("> ");
            io::stdout().flush().context("flushing prompt")?;

            let line = match lines.next() {
                Some(line) => line.context("reading command")?,
                None => break, // EOF ends the session
            };

            match parse_command(&line) {
                Some(Command::Quit) => {
                    state.stop();
                    println!("Game forfeited.");
                }
                Some(Command::Help) => print_help(),
                Some(Command::Act(action)) => match shax_core::apply(&mut state, action) {
                    Ok(()) => {}
                    Err(violation) => println!("Illegal: {}", violation),
                },
                None => println!("Unrecognized command; try 'help'."),
            }
        } else {
            match ai.best_action(&mut state) {
                Some(action) => {
                    println!("Engine: {}", describe_action(action));
                    shax_core::apply(&mut state, action)
                        .expect("engine actions must be legal");
                }
                None => {
                    println!("Neither side can act; game drawn.");
                    break;
                }
            }
        }
    }

    print!("{}", render_board(&state));
    match state.winner() {
        Some(Player::White) => println!("You win!"),
        Some(Player::Black) => println!("The engine wins."),
        None => println!("No winner."),
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  place X Y      place a piece (e.g. 'place 0 3')");
    println!("  remove ID      capture an engine piece (e.g. 'remove B2')");
    println!("  move ID X Y    move a piece to an adjacent node (e.g. 'move W0 3 0')");
    println!("  help           show this message");
    println!("  quit           forfeit the game");
}

/// Parse a human command line; `None` if it does not parse
fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match words.next()? {
        "place" => {
            let x = words.next()?.parse().ok()?;
            let y = words.next()?.parse().ok()?;
            Command::Act(Action::Place(Node::new(x, y)))
        }
        "remove" => Command::Act(Action::Remove(parse_piece(words.next()?)?)),
        "move" => {
            let piece = parse_piece(words.next()?)?;
            let x = words.next()?.parse().ok()?;
            let y = words.next()?.parse().ok()?;
            Command::Act(Action::Move { piece, to: Node::new(x, y) })
        }
        "help" => Command::Help,
        "quit" => Command::Quit,
        _ => return None,
    };
    // Trailing junk invalidates the command
    if words.next().is_some() {
        return None;
    }
    Some(command)
}

/// Parse a piece label like W0 or B11
fn parse_piece(label: &str) -> Option<PieceId> {
    let owner = match label.chars().next()? {
        'W' | 'w' => Player::White,
        'B' | 'b' => Player::Black,
        _ => return None,
    };
    let seq = label[1..].parse().ok()?;
    Some(PieceId::new(owner, seq))
}

/// Piece label shown on the board and accepted by commands
fn label(piece: PieceId) -> String {
    let owner = match piece.owner() {
        Player::White => 'W',
        Player::Black => 'B',
    };
    format!("{}{}", owner, piece.seq())
}

fn describe_action(action: Action) -> String {
    match action {
        Action::Place(node) => format!("places at {} {}", node.x, node.y),
        Action::Remove(piece) => format!("captures {}", label(piece)),
        Action::Move { piece, to } => format!("moves {} to {} {}", label(piece), to.x, to.y),
    }
}

/// ASCII rendering of the 7x7 grid: '+' is an empty node, labels are pieces,
/// blanks are off-graph coordinates
fn render_board(state: &GameState) -> String {
    let mut out = String::from("\n  x  0    1    2    3    4    5    6\n");
    for y in 0..BOARD_SIZE {
        out.push_str(&format!("y{} ", y));
        for x in 0..BOARD_SIZE {
            let node = Node::new(x, y);
            let cell = if !node.is_valid() {
                "     ".to_string()
            } else {
                match state.piece_at(node) {
                    Some(piece) => format!("{:<5}", label(piece)),
                    None => "+    ".to_string(),
                }
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}
