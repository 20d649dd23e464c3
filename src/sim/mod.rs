//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only; the scheduler lives outside (browser timers in
//!   production, direct calls in tests)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod reward;
pub mod rng;
pub mod scratch;
pub mod serving;
pub mod slots;
pub mod snake;

pub use reward::{RewardIssuer, RewardSink};
pub use rng::ArcadeRng;
pub use scratch::ScratchCard;
pub use serving::{Customer, CustomerStatus, ServingGame};
pub use slots::{ReelSymbol, SlotMachine, SpinOutcome};
pub use snake::{GridPos, Heading, SnakeGame};

use serde::{Deserialize, Serialize};

/// Lifecycle shared by every game session.
///
/// `Won`, `Lost` and `Closed` are all terminal; `Closed` is reachable from
/// any phase through `close()` when the hosting view goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Won,
    Lost,
    Closed,
}

impl Phase {
    /// Terminal phases never transition again (except to `Closed`).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Won | Phase::Lost | Phase::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases() {
        assert!(!Phase::Idle.is_terminal());
        assert!(!Phase::Running.is_terminal());
        assert!(Phase::Won.is_terminal());
        assert!(Phase::Lost.is_terminal());
        assert!(Phase::Closed.is_terminal());
    }
}
