//! A game as a sequence of immutable positions.
//!
//! Every committed move appends a new shared frame; earlier frames are never
//! touched again. Snapshots and speculative lines clone the frame list, which
//! only bumps reference counts, so the canonical game is never mutated by a
//! "what if" probe.

use std::sync::Arc;

use crate::board::Position;
use crate::error::FenError;
use crate::movegen::{has_legal_move, legal_moves};
use crate::san::move_to_san;
use crate::types::*;
use crate::uci::find_legal;
use crate::RulesEngine;

/// A legal move for the side to move, with everything a caller needs to rank
/// it without touching the board again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMove {
    pub mv: Move,
    pub piece: Piece,
    /// Piece removed by this move, including the pawn taken en passant.
    pub captured: Option<Piece>,
    pub san: String,
}

impl LegalMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Whether the notation marks the move as giving check (or mate).
    pub fn gives_check(&self) -> bool {
        self.san.ends_with('+') || self.san.ends_with('#')
    }
}

/// A move the rules accepted and committed to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub san: String,
}

#[derive(Debug)]
pub struct Frame {
    pub position: Position,
    pub hash: u64,
}

impl Frame {
    fn new(position: Position) -> Arc<Frame> {
        let hash = position.position_hash();
        Arc::new(Frame { position, hash })
    }
}

/// Cheap, immutable copy of a game at some ply.
#[derive(Debug, Clone)]
pub struct Snapshot {
    frames: Vec<Arc<Frame>>,
}

impl Snapshot {
    pub fn ply(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn position(&self) -> &Position {
        &self.frames[self.frames.len() - 1].position
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    frames: Vec<Arc<Frame>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_position(position: Position) -> Self {
        Self {
            frames: vec![Frame::new(position)],
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    fn frame(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    /// Current position.
    pub fn position(&self) -> &Position {
        &self.frame().position
    }

    /// Number of moves played since the game's starting position.
    pub fn ply(&self) -> usize {
        self.frames.len() - 1
    }

    /// Position after `ply` moves, `None` past the end of the game.
    pub fn position_at(&self, ply: usize) -> Option<&Position> {
        self.frames.get(ply).map(|f| &f.position)
    }

    /// The game as it would stand after the move, leaving `self` untouched.
    pub fn speculate(
        &self,
        from: Square,
        to: Square,
        promo: Option<PieceKind>,
    ) -> Option<(Game, AppliedMove)> {
        let mut line = self.clone();
        let applied = line.play(from, to, promo)?;
        Some((line, applied))
    }

    pub fn candidates(&self, from: Option<Square>) -> Vec<LegalMove> {
        let pos = self.position();
        legal_moves(pos)
            .into_iter()
            .filter(|m| from.is_none_or(|s| m.from == s))
            .filter_map(|mv| {
                let piece = pos.piece_at(mv.from)?;
                let mut after = pos.clone();
                let captured = after.make_move(mv)?.captured;
                Some(LegalMove {
                    mv,
                    piece,
                    captured,
                    san: move_to_san(pos, mv),
                })
            })
            .collect()
    }

    /// Commit a move if it is legal; `None` leaves the game unchanged.
    pub fn play(&mut self, from: Square, to: Square, promo: Option<PieceKind>) -> Option<AppliedMove> {
        let pos = self.position();
        let mv = find_legal(pos, from, to, promo)?;
        let san = move_to_san(pos, mv);
        let mut next = pos.clone();
        let undo = next.make_move(mv)?;
        self.frames.push(Frame::new(next));
        Some(AppliedMove {
            mv,
            piece: undo.moved_piece,
            captured: undo.captured,
            san,
        })
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.frame().hash;
        self.frames.iter().filter(|f| f.hash == current).count() >= 3
    }

    fn side_has_no_moves(&self) -> bool {
        !has_legal_move(self.position())
    }
}

impl RulesEngine for Game {
    fn current_turn(&self) -> Color {
        self.position().side_to_move
    }

    fn legal_moves(&self, from: Option<Square>) -> Vec<LegalMove> {
        self.candidates(from)
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position().piece_at(sq)
    }

    fn apply_move(&mut self, from: Square, to: Square, promo: Option<PieceKind>) -> Option<AppliedMove> {
        self.play(from, to, promo)
    }

    fn is_check(&self) -> bool {
        let pos = self.position();
        pos.in_check(pos.side_to_move)
    }

    fn is_checkmate(&self) -> bool {
        self.is_check() && self.side_has_no_moves()
    }

    fn is_stalemate(&self) -> bool {
        !self.is_check() && self.side_has_no_moves()
    }

    fn is_draw(&self) -> bool {
        let pos = self.position();
        self.is_stalemate()
            || pos.is_fifty_move_draw()
            || pos.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            frames: self.frames.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.frames = snapshot.frames;
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
