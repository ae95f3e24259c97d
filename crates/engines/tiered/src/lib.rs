//! Tiered Random Chess Engine
//!
//! A deliberately weak opponent. It never looks ahead; it only sorts the
//! legal candidates into tiers and draws from the best non-empty one:
//! - Checking moves (by notation) are always preferred
//! - Captures are taken about half of the time
//! - Otherwise any legal move, uniformly at random
//!
//! The random source is injected so games can be replayed from a seed.

use chess_core::{Engine, LegalMove};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod lib_tests;

/// Default chance of taking a capture when no check is available.
pub const DEFAULT_CAPTURE_CHANCE: f64 = 0.5;

/// Which tier a choice was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Check,
    Capture,
    Any,
}

#[derive(Debug, Clone)]
pub struct TieredEngine<R = StdRng> {
    rng: R,
    capture_chance: f64,
}

impl TieredEngine<StdRng> {
    /// Engine seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Engine whose choices are fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for TieredEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TieredEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            capture_chance: DEFAULT_CAPTURE_CHANCE,
        }
    }

    /// Probability in `[0, 1]`; values outside are clamped, NaN keeps the default.
    pub fn with_capture_chance(mut self, chance: f64) -> Self {
        if !chance.is_nan() {
            self.capture_chance = chance.clamp(0.0, 1.0);
        }
        self
    }

    pub fn capture_chance(&self) -> f64 {
        self.capture_chance
    }

    /// Pick a candidate and report the tier it came from.
    pub fn choose_tiered<'a>(&mut self, candidates: &'a [LegalMove]) -> Option<(&'a LegalMove, Tier)> {
        if candidates.is_empty() {
            return None;
        }

        let checks: Vec<&LegalMove> = candidates.iter().filter(|c| c.gives_check()).collect();
        if let Some(&pick) = checks.choose(&mut self.rng) {
            return Some((pick, Tier::Check));
        }

        let captures: Vec<&LegalMove> = candidates.iter().filter(|c| c.is_capture()).collect();
        if !captures.is_empty() && self.rng.gen_bool(self.capture_chance) {
            if let Some(&pick) = captures.choose(&mut self.rng) {
                return Some((pick, Tier::Capture));
            }
        }

        candidates.choose(&mut self.rng).map(|pick| (pick, Tier::Any))
    }
}

impl<R: Rng + Send> Engine for TieredEngine<R> {
    fn choose_move(&mut self, candidates: &[LegalMove]) -> Option<LegalMove> {
        let (pick, tier) = self.choose_tiered(candidates)?;
        tracing::debug!(san = %pick.san, ?tier, candidates = candidates.len(), "engine picked move");
        Some(pick.clone())
    }

    fn name(&self) -> &str {
        "Tiered Random v1.0"
    }
}
