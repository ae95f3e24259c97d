//! One timbre family per piece kind, plus the synths phrases are played on.

use std::fmt;

use chess_core::PieceKind;

/// ADSR envelope; sustain is a level in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    pub attack_ms: u32,
    pub decay_ms: u32,
    pub sustain_pct: u8,
    pub release_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    /// Pawn: plain triangle-wave synth.
    Triangle,
    /// Knight: frequency-modulated synth.
    Fm,
    /// Bishop: amplitude-modulated shimmer.
    Am,
    /// Rook: deep membrane drum.
    Membrane,
    /// Queen: rich polyphonic synth.
    Poly,
    /// King: bell-like metallic synth.
    Metal,
}

impl Instrument {
    pub fn for_piece(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => Instrument::Triangle,
            PieceKind::Knight => Instrument::Fm,
            PieceKind::Bishop => Instrument::Am,
            PieceKind::Rook => Instrument::Membrane,
            PieceKind::Queen => Instrument::Poly,
            PieceKind::King => Instrument::Metal,
        }
    }

    pub fn envelope(self) -> Envelope {
        let (attack_ms, decay_ms, sustain_pct, release_ms) = match self {
            Instrument::Triangle => (10, 100, 20, 500),
            Instrument::Fm => (10, 200, 20, 400),
            Instrument::Am => (20, 100, 30, 800),
            Instrument::Membrane => (10, 400, 10, 1400),
            Instrument::Poly => (5, 100, 30, 1000),
            Instrument::Metal => (1, 1400, 0, 200),
        };
        Envelope {
            attack_ms,
            decay_ms,
            sustain_pct,
            release_ms,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Triangle => "triangle",
            Instrument::Fm => "fm",
            Instrument::Am => "am",
            Instrument::Membrane => "membrane",
            Instrument::Poly => "poly",
            Instrument::Metal => "metal",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
