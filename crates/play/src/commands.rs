//! Parsing of the lines typed at the prompt.

use chess_core::{coord_to_sq, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// SAN (`Nf3`, `exd5`, `O-O`) or coordinates (`e2e4`, `e7e8q`).
    Move(String),
    Select(u8),
    Promote(PieceKind),
    CancelPromotion,
    Undo,
    /// Show the position after this ply (1-based); `None` is the start.
    View(Option<usize>),
    Back,
    Forward,
    Live,
    Hints(bool),
    Board,
    Fen,
    History,
    Save,
    Saves,
    Stats,
    NewGame,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  <move>            play a move in SAN (Nf3, O-O) or coordinates (e2e4, e7e8q)
  select <square>   click a square (select a piece, then its destination)
  promote q|r|b|n   finish a pending promotion; cancel drops it
  undo              take back a move (two against the computer)
  view <n>|start    review the position after ply n
  back, forward     step through the game; live returns to the latest move
  hint on|off       toggle move hints
  board, fen, history, stats, saves
  save              save the game; new starts over; quit leaves";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };
    let arg = words.next();
    let cmd = match (head.to_ascii_lowercase().as_str(), arg) {
        ("quit" | "exit" | "q", None) => Command::Quit,
        ("help" | "?", None) => Command::Help,
        ("board" | "b", None) => Command::Board,
        ("fen", None) => Command::Fen,
        ("history" | "moves", None) => Command::History,
        ("undo" | "u", None) => Command::Undo,
        ("back", None) => Command::Back,
        ("forward" | "fwd", None) => Command::Forward,
        ("live", None) => Command::Live,
        ("save", None) => Command::Save,
        ("saves", None) => Command::Saves,
        ("stats", None) => Command::Stats,
        ("new", None) => Command::NewGame,
        ("cancel", None) => Command::CancelPromotion,
        ("view", Some("start")) => Command::View(None),
        ("view", Some(n)) => match n.parse::<usize>() {
            Ok(0) => Command::View(None),
            Ok(ply) => Command::View(Some(ply)),
            Err(_) => return Err(format!("not a ply number: {n}")),
        },
        ("hint" | "hints", Some("on")) => Command::Hints(true),
        ("hint" | "hints", Some("off")) => Command::Hints(false),
        ("select" | "sel", Some(sq)) => match coord_to_sq(&sq.to_ascii_lowercase()) {
            Some(sq) => Command::Select(sq),
            None => return Err(format!("not a square: {sq}")),
        },
        ("promote", Some(p)) => match p.chars().next().and_then(PieceKind::from_letter) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Command::Promote(kind),
            _ => return Err(format!("cannot promote to {p}")),
        },
        (_, None) => Command::Move(head.to_string()),
        _ => return Err(format!("unknown command: {}", line.trim())),
    };
    Ok(cmd)
}
