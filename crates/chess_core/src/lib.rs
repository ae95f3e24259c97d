pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod san;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use game::*;
pub use movegen::*;
pub use san::move_to_san;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Rules trait: what the rest of the workspace may ask of the chess rules
// =============================================================================

/// Legality, move application and game-termination queries.
///
/// Consumers only ever talk to the rules through this trait, so a different
/// rules implementation (or a scripted fake in tests) can stand in for
/// [`Game`].
pub trait RulesEngine {
    /// Color whose turn it is.
    fn current_turn(&self) -> Color;

    /// Legal moves for the side to move, optionally only those leaving `from`.
    fn legal_moves(&self, from: Option<Square>) -> Vec<LegalMove>;

    fn piece_at(&self, sq: Square) -> Option<Piece>;

    /// Commit the move if legal. `None` means rejected and nothing changed.
    fn apply_move(&mut self, from: Square, to: Square, promo: Option<PieceKind>) -> Option<AppliedMove>;

    fn is_check(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;

    /// Any drawn state: stalemate, fifty-move rule, threefold repetition or
    /// insufficient material.
    fn is_draw(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    fn snapshot(&self) -> Snapshot;
    fn restore(&mut self, snapshot: Snapshot);
}

// =============================================================================
// Engine trait: implemented by computer opponents
// =============================================================================

/// A computer opponent that picks one of the legal candidates it is handed.
pub trait Engine: Send {
    /// Choose a move, or `None` when there is nothing to play.
    fn choose_move(&mut self, candidates: &[LegalMove]) -> Option<LegalMove>;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
