//! Sonification: squares become pitches, pieces become instruments, and
//! special moves earn a short phrase.
//!
//! Everything here is pure. The same outcome and mute flag always produce the
//! same event list.

pub mod instrument;
pub mod mapper;
pub mod note;
pub mod phrase;

pub use instrument::{Envelope, Instrument};
pub use mapper::*;
pub use note::{NoteLength, Pitch, Step, Velocity};
pub use phrase::{Phrase, PhraseNote};
