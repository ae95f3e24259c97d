//! Chess conductor
//!
//! Plays a game of chess against a weak computer opponent and turns every
//! move into music: squares are pitches, pieces are instruments, and special
//! moves (check, mate, castling, en passant, stalemate) get their own phrase.
//!
//! The pieces, leaves first:
//! - [`sonify`]: pure mapping from classified moves to audio events
//! - [`classify`]: derives the move taxonomy the rules layer does not report
//! - [`orchestrator`]: the turn state machine, the only thing that mutates a game
//! - [`audio`]: playback backends behind an init/dispose lifecycle
//! - [`session`]: the tokio event loop that runs the orchestrator's timers

pub mod audio;
pub mod classify;
pub mod command;
pub mod config;
pub mod error;
pub mod game;
pub mod orchestrator;
pub mod scheduler;
pub mod session;
pub mod sonify;

pub use audio::{AudioBackend, AudioEngine, AudioError, AudioState, LogBackend, RecordingBackend};
pub use classify::{classify, ClassifiedMove, MoveOutcome, MoveRequest, PreMove};
pub use config::{ConductorConfig, ConfigError, Side};
pub use error::TurnError;
pub use game::{BoardView, Controller, GameState, PlayerAssignment};
pub use orchestrator::{Conductor, Message, TurnState};
pub use scheduler::{Effect, Epoch, ScheduledMove};
pub use session::Session;
