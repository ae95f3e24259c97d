//! Move classification
//!
//! The rules layer only says whether a move was legal and what it captured.
//! Everything the sonification needs beyond that (castling, en passant, the
//! end-of-move game state) is derived here from a snapshot of the two squares
//! taken before the move and from rules queries made after it.

use chess_core::{AppliedMove, Piece, PieceKind, RulesEngine, Square};

/// A request to move a piece, from a board click, a typed move or the
/// computer policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }
}

/// The source and destination squares as they stood before the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreMove {
    pub source: Option<Piece>,
    pub destination: Option<Piece>,
}

impl PreMove {
    pub fn capture(rules: &impl RulesEngine, request: &MoveRequest) -> Self {
        Self {
            source: rules.piece_at(request.from),
            destination: rules.piece_at(request.to),
        }
    }
}

/// Everything known about an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedMove {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castling: bool,
    pub en_passant: bool,
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    /// Any drawn state after the move, stalemate included.
    pub draw: bool,
    pub notation: String,
}

impl ClassifiedMove {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn captured_kind(&self) -> Option<PieceKind> {
        self.captured.map(|p| p.kind)
    }

    /// Whether the move ended the game.
    pub fn is_terminal(&self) -> bool {
        self.checkmate || self.draw
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Rejected,
    Accepted(ClassifiedMove),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted(_))
    }

    pub fn accepted(&self) -> Option<&ClassifiedMove> {
        match self {
            MoveOutcome::Accepted(m) => Some(m),
            MoveOutcome::Rejected => None,
        }
    }
}

/// Derive the full outcome of a move attempt.
///
/// `applied` is what the rules engine returned for the request and `rules`
/// must already reflect it. Legality is never re-derived: a `None` result is
/// a rejection no matter what the snapshot says.
pub fn classify(
    pre: &PreMove,
    request: &MoveRequest,
    applied: Option<&AppliedMove>,
    rules: &impl RulesEngine,
) -> MoveOutcome {
    let Some(applied) = applied else {
        return MoveOutcome::Rejected;
    };
    let Some(piece) = pre.source else {
        tracing::error!(
            from = %request.from,
            to = %request.to,
            san = %applied.san,
            "rules accepted a move from an empty square"
        );
        return MoveOutcome::Rejected;
    };

    let file_distance = (request.to.file() - request.from.file()).abs();
    let castling = piece.kind == PieceKind::King && file_distance > 1;
    let en_passant =
        piece.kind == PieceKind::Pawn && file_distance != 0 && pre.destination.is_none();

    MoveOutcome::Accepted(ClassifiedMove {
        from: request.from,
        to: request.to,
        piece,
        captured: applied.captured.or(pre.destination),
        castling,
        en_passant,
        check: rules.is_check(),
        checkmate: rules.is_checkmate(),
        stalemate: rules.is_stalemate(),
        draw: rules.is_draw(),
        notation: applied.san.clone(),
    })
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod classify_tests;
