use thiserror::Error;

/// A string that does not name a board square.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square: {0:?}")]
pub struct SquareParseError(pub String);

/// Errors raised while parsing Forsyth-Edwards Notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece character {0:?}")]
    Piece(char),

    #[error("invalid side to move {0:?}")]
    SideToMove(String),

    #[error("invalid castling character {0:?}")]
    Castling(char),

    #[error("invalid en passant square {0:?}")]
    EnPassant(String),

    #[error("invalid move counter {0:?}")]
    Counter(String),

    #[error("{0} king missing or duplicated")]
    Kings(crate::Color),
}
