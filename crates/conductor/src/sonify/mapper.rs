//! Maps a classified move (or a game event) to the ordered list of notes
//! and phrase cues that should be played for it.

use chess_core::{Piece, Square};

use super::instrument::Instrument;
use super::note::{NoteLength, Pitch, Velocity};
use super::phrase::Phrase;
use crate::classify::{ClassifiedMove, MoveOutcome};

/// Default gap between the captured voice and the capturing voice.
pub const DEFAULT_CAPTURE_STAGGER_MS: u32 = 150;
pub const DEFAULT_TEMPO_BPM: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub tempo_bpm: u32,
    pub capture_stagger_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tempo_bpm: DEFAULT_TEMPO_BPM,
            capture_stagger_ms: DEFAULT_CAPTURE_STAGGER_MS,
        }
    }
}

/// A single voice on one instrument channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub channel: Instrument,
    pub pitch: Pitch,
    pub length: NoteLength,
    pub duration_ms: u32,
    pub velocity: Velocity,
    /// Delay from the moment the event list is handed to the backend.
    pub offset_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseCue {
    pub phrase: Phrase,
    pub offset_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Note(NoteEvent),
    Phrase(PhraseCue),
}

impl AudioEvent {
    pub fn offset_ms(&self) -> u32 {
        match self {
            AudioEvent::Note(n) => n.offset_ms,
            AudioEvent::Phrase(p) => p.offset_ms,
        }
    }
}

/// Channel and pitch of a piece standing on a square.
pub fn voice(piece: Piece, sq: Square) -> (Instrument, Pitch) {
    (Instrument::for_piece(piece.kind), Pitch::for_square(sq))
}

/// The one phrase a move earns, if any.
/// Priority: checkmate, check, stalemate, castling, en passant.
pub fn special_phrase(m: &ClassifiedMove) -> Option<Phrase> {
    if m.checkmate {
        Some(Phrase::Checkmate)
    } else if m.check {
        Some(Phrase::Check)
    } else if m.stalemate {
        Some(Phrase::Stalemate)
    } else if m.castling {
        Some(Phrase::Castling)
    } else if m.en_passant {
        Some(Phrase::EnPassant)
    } else {
        None
    }
}

/// Ordered audio events for a move outcome. Rejected moves and a muted
/// session produce nothing.
pub fn sonify_move(outcome: &MoveOutcome, muted: bool, timing: &Timing) -> Vec<AudioEvent> {
    let Some(m) = outcome.accepted() else {
        return Vec::new();
    };
    if muted {
        return Vec::new();
    }

    let note = |piece: Piece, length: NoteLength, offset_ms: u32| {
        let (channel, pitch) = voice(piece, m.to);
        AudioEvent::Note(NoteEvent {
            channel,
            pitch,
            length,
            duration_ms: length.millis(timing.tempo_bpm),
            velocity: Velocity::FULL,
            offset_ms,
        })
    };

    let mut events = Vec::with_capacity(3);
    let destination_offset = match m.captured {
        Some(victim) => {
            events.push(note(victim, NoteLength::Sixteenth, 0));
            timing.capture_stagger_ms
        }
        None => 0,
    };
    events.push(note(m.piece, NoteLength::Eighth, destination_offset));

    if let Some(phrase) = special_phrase(m) {
        events.push(AudioEvent::Phrase(PhraseCue {
            phrase,
            offset_ms: destination_offset,
        }));
    }
    events
}

/// A standalone phrase cue, e.g. the opening chord on reset.
pub fn sonify_phrase(phrase: Phrase, muted: bool) -> Vec<AudioEvent> {
    if muted {
        return Vec::new();
    }
    vec![AudioEvent::Phrase(PhraseCue {
        phrase,
        offset_ms: 0,
    })]
}
