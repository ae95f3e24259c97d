//! Deferred work handed from the orchestrator to whoever drives it.
//!
//! The orchestrator never sleeps. It describes what should happen later as an
//! [`Effect`], stamped with the current [`Epoch`]; anything that comes back
//! carrying an older epoch is ignored.

use std::fmt;
use std::time::Duration;

use crate::classify::MoveRequest;

/// Session generation. Bumped on every reset and whenever pending work is
/// abandoned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    pub fn bump(&mut self) -> Epoch {
        self.0 = self.0.wrapping_add(1);
        *self
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A computer move that has been chosen and waits out the thinking delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledMove {
    pub epoch: Epoch,
    pub request: MoveRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Message::ComputerMoveReady(scheduled)` after `delay`.
    Schedule {
        delay: Duration,
        scheduled: ScheduledMove,
    },
    /// Any pending scheduled move is stale and may be dropped.
    CancelPending,
}
