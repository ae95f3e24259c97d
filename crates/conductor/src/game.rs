//! Game state holder: the canonical board plus everything the session keeps
//! about it (who plays what, history, selection, mute).

use std::fmt;

use chess_core::{Color, Game, Piece, RulesEngine, Square};

use crate::classify::ClassifiedMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Human,
    Computer,
}

/// Which color the human plays; the computer has the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAssignment {
    human: Color,
}

impl PlayerAssignment {
    pub fn new(human: Color) -> Self {
        Self { human }
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn computer(&self) -> Color {
        self.human.other()
    }

    pub fn controller(&self, color: Color) -> Controller {
        if color == self.human {
            Controller::Human
        } else {
            Controller::Computer
        }
    }

    pub fn switch(&mut self) {
        self.human = self.human.other();
    }
}

#[derive(Debug, Clone)]
pub struct GameState<R = Game> {
    pub rules: R,
    pub players: PlayerAssignment,
    history: Vec<String>,
    pub selected: Option<Square>,
    pub last_move: Option<(Square, Square)>,
    pub muted: bool,
}

impl<R: RulesEngine + Default> GameState<R> {
    pub fn new(human: Color, muted: bool) -> Self {
        Self::with_rules(R::default(), human, muted)
    }

    /// Back to the starting position. Player assignment and mute survive.
    pub fn reset(&mut self) {
        self.rules = R::default();
        self.history.clear();
        self.selected = None;
        self.last_move = None;
    }
}

impl<R: RulesEngine> GameState<R> {
    pub fn with_rules(rules: R, human: Color, muted: bool) -> Self {
        Self {
            rules,
            players: PlayerAssignment::new(human),
            history: Vec::new(),
            selected: None,
            last_move: None,
            muted,
        }
    }

    pub fn turn(&self) -> Color {
        self.rules.current_turn()
    }

    pub fn to_move(&self) -> Controller {
        self.players.controller(self.turn())
    }

    /// Whether `sq` holds a piece of the human's color.
    pub fn is_human_piece(&self, sq: Square) -> bool {
        self.rules
            .piece_at(sq)
            .is_some_and(|p| p.color == self.players.human())
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Record a committed move. The only way history grows.
    pub fn record(&mut self, m: &ClassifiedMove) {
        self.history.push(m.notation.clone());
        self.last_move = Some((m.from, m.to));
        self.selected = None;
    }
}

// =============================================================================
// Board view for the surface
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub squares: [Option<Piece>; 64],
    pub turn: Color,
    pub human: Color,
    pub selected: Option<Square>,
    pub last_move: Option<(Square, Square)>,
    pub status: String,
    pub history: Vec<String>,
    pub muted: bool,
}

impl BoardView {
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// History as numbered move pairs: `1. e4 e5 2. Nf3`.
    pub fn history_line(&self) -> String {
        let mut out = String::new();
        for (i, pair) in self.history.chunks(2).enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{}. {}", i + 1, pair.join(" ")));
        }
        out
    }
}

/// Plain-text board, drawn from the human's side.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks: Vec<i8> = match self.human {
            Color::White => (0..8).rev().collect(),
            Color::Black => (0..8).collect(),
        };
        let files: Vec<i8> = match self.human {
            Color::White => (0..8).collect(),
            Color::Black => (0..8).rev().collect(),
        };

        for &rank in &ranks {
            write!(f, "{} ", rank + 1)?;
            for &file in &files {
                let Some(sq) = Square::at(file, rank) else {
                    continue;
                };
                let glyph = self.piece_at(sq).map_or('.', |p| p.fen_char());
                let marked = self.selected == Some(sq)
                    || self.last_move.is_some_and(|(from, to)| from == sq || to == sq);
                if marked {
                    write!(f, "[{glyph}]")?;
                } else {
                    write!(f, " {glyph} ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for &file in &files {
            write!(f, " {} ", (b'a' + file as u8) as char)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.status)
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
