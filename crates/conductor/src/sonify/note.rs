//! Pitches, note lengths and velocities.

use std::fmt;

use chess_core::Square;

/// Natural note names; the board only ever uses the white keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    /// Semitones above C.
    pub const fn semitone(self) -> u8 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }

    pub fn name(self) -> char {
        match self {
            Step::C => 'C',
            Step::D => 'D',
            Step::E => 'E',
            Step::F => 'F',
            Step::G => 'G',
            Step::A => 'A',
            Step::B => 'B',
        }
    }
}

/// File a..h walks up a C major scale; h is the C an octave above a.
const FILE_STEPS: [(Step, u8); 8] = [
    (Step::C, 0),
    (Step::D, 0),
    (Step::E, 0),
    (Step::F, 0),
    (Step::G, 0),
    (Step::A, 0),
    (Step::B, 0),
    (Step::C, 1),
];

/// A pitch in scientific notation, `C4` being middle C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub step: Step,
    pub octave: u8,
}

impl Pitch {
    pub const fn new(step: Step, octave: u8) -> Self {
        Self { step, octave }
    }

    /// Pitch of a square: the file picks the scale step, rank 1..8 picks
    /// octave 1..8.
    pub fn for_square(sq: Square) -> Self {
        let (step, bump) = FILE_STEPS[sq.file() as usize];
        Self::new(step, octave_for_rank(sq.rank()) + bump)
    }

    /// MIDI note number (C4 = 60).
    pub const fn midi(self) -> u8 {
        (self.octave + 1) * 12 + self.step.semitone()
    }

    /// Equal-tempered frequency with A4 = 440 Hz.
    pub fn frequency(self) -> f64 {
        440.0 * 2f64.powf((self.midi() as f64 - 69.0) / 12.0)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.step.name(), self.octave)
    }
}

/// Octave for a 0-based rank index; rank 1 is the lowest.
pub fn octave_for_rank(rank: i8) -> u8 {
    rank.clamp(0, 7) as u8 + 1
}

/// Musical note values, converted to time through a tempo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteLength {
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteLength {
    /// Duration in milliseconds at `bpm` quarter notes per minute.
    pub fn millis(self, bpm: u32) -> u32 {
        let quarter = 60_000 / bpm.max(1);
        match self {
            NoteLength::Half => quarter * 2,
            NoteLength::Quarter => quarter,
            NoteLength::Eighth => quarter / 2,
            NoteLength::Sixteenth => quarter / 4,
        }
    }

    /// Tracker-style name (`2n`, `4n`, `8n`, `16n`).
    pub fn name(self) -> &'static str {
        match self {
            NoteLength::Half => "2n",
            NoteLength::Quarter => "4n",
            NoteLength::Eighth => "8n",
            NoteLength::Sixteenth => "16n",
        }
    }
}

/// MIDI-style velocity, 0..=127.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Velocity(pub u8);

impl Velocity {
    pub const FULL: Velocity = Velocity(127);

    /// Velocity as a gain in `[0, 1]`.
    pub fn gain(self) -> f32 {
        f32::from(self.0.min(127)) / 127.0
    }
}
