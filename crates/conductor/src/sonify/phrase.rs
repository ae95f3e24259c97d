//! Fixed motifs for game events, kept as static tables.

use std::fmt;

use super::instrument::Instrument;
use super::note::{NoteLength, Pitch, Step, Velocity};

/// One chord (or single note) inside a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseNote {
    pub pitches: &'static [Pitch],
    pub length: NoteLength,
    pub velocity: Velocity,
    /// Start time relative to the phrase start.
    pub at_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phrase {
    Opening,
    Checkmate,
    Check,
    Stalemate,
    Castling,
    EnPassant,
}

const fn chord(pitches: &'static [Pitch], length: NoteLength, velocity: u8, at_ms: u32) -> PhraseNote {
    PhraseNote {
        pitches,
        length,
        velocity: Velocity(velocity),
        at_ms,
    }
}

const C4: Pitch = Pitch::new(Step::C, 4);
const D4: Pitch = Pitch::new(Step::D, 4);
const E4: Pitch = Pitch::new(Step::E, 4);
const F4: Pitch = Pitch::new(Step::F, 4);
const G4: Pitch = Pitch::new(Step::G, 4);
const A4: Pitch = Pitch::new(Step::A, 4);
const C5: Pitch = Pitch::new(Step::C, 5);
const D5: Pitch = Pitch::new(Step::D, 5);
const E5: Pitch = Pitch::new(Step::E, 5);
const F5: Pitch = Pitch::new(Step::F, 5);
const G6: Pitch = Pitch::new(Step::G, 6);
const A6: Pitch = Pitch::new(Step::A, 6);

use NoteLength::{Eighth, Half, Quarter, Sixteenth};

const OPENING: &[PhraseNote] = &[chord(&[C4, E4, G4, C5], Quarter, 127, 0)];

const CHECKMATE: &[PhraseNote] = &[
    chord(&[C4, E4, G4, C5, E5], Eighth, 102, 0),
    chord(&[D4, F4, A4, D5, F5], Quarter, 114, 300),
];

const CHECK: &[PhraseNote] = &[chord(&[C5, G4], Eighth, 89, 0)];

const STALEMATE: &[PhraseNote] = &[
    chord(&[C4], Eighth, 127, 0),
    chord(&[C4], Eighth, 127, 300),
    chord(&[C4], Half, 64, 600),
];

const CASTLING: &[PhraseNote] = &[
    chord(&[C4], Eighth, 127, 0),
    chord(&[G4], Eighth, 127, 100),
    chord(&[C5], Quarter, 127, 200),
];

const EN_PASSANT: &[PhraseNote] = &[chord(&[G6], Sixteenth, 127, 0), chord(&[A6], Sixteenth, 127, 100)];

impl Phrase {
    pub fn notes(self) -> &'static [PhraseNote] {
        match self {
            Phrase::Opening => OPENING,
            Phrase::Checkmate => CHECKMATE,
            Phrase::Check => CHECK,
            Phrase::Stalemate => STALEMATE,
            Phrase::Castling => CASTLING,
            Phrase::EnPassant => EN_PASSANT,
        }
    }

    /// Time from the phrase start until its last note has finished.
    pub fn span_ms(self, bpm: u32) -> u32 {
        self.notes()
            .iter()
            .map(|n| n.at_ms + n.length.millis(bpm))
            .max()
            .unwrap_or(0)
    }

    /// The synth the phrase is played on.
    pub fn instrument(self) -> Instrument {
        match self {
            Phrase::EnPassant => Instrument::Fm,
            Phrase::Stalemate => Instrument::Am,
            Phrase::Opening | Phrase::Checkmate | Phrase::Check | Phrase::Castling => Instrument::Poly,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phrase::Opening => "opening",
            Phrase::Checkmate => "checkmate",
            Phrase::Check => "check",
            Phrase::Stalemate => "stalemate",
            Phrase::Castling => "castling",
            Phrase::EnPassant => "en-passant",
        }
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
