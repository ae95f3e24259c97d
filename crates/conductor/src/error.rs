use chess_core::Square;
use thiserror::Error;

/// Why the orchestrator refused a message. None of these are fatal; the
/// board is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("illegal move {from}{to}")]
    InvalidMove { from: Square, to: Square },

    #[error("it is not the human's turn")]
    NotHumanTurn,

    #[error("the computer is still thinking")]
    ComputerThinking,

    #[error("the game is over; start a new game")]
    GameOver,

    #[error("rules and board snapshot disagree about {from}{to}")]
    InternalInconsistency { from: Square, to: Square },
}
