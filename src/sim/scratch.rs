//! Scratch-card discount widget.
//!
//! One click reveals a random entry from a fixed discount table; the reveal
//! stands for a fixed number of ticks and then clears itself. "TRY AGAIN" is
//! the only losing outcome.

use crate::consts::SCRATCH_RESET_TICKS;
use crate::sim::rng::ArcadeRng;

/// The discount table, as printed on the card.
pub const SCRATCH_OUTCOMES: [&str; 5] =
    ["10% OFF", "15% OFF", "20% OFF", "FREE LOGO", "TRY AGAIN"];

const LOSING_OUTCOME: &str = "TRY AGAIN";

/// One scratch card. Re-scratchable after each reveal times out.
pub struct ScratchCard {
    revealed: Option<&'static str>,
    reset_ticks: u32,
    rng: ArcadeRng,
}

impl ScratchCard {
    pub fn new(seed: u64) -> Self {
        Self {
            revealed: None,
            reset_ticks: 0,
            rng: ArcadeRng::seeded(seed),
        }
    }

    /// Reveal a random outcome. A no-op while a reveal is still up.
    pub fn scratch(&mut self) -> Option<&'static str> {
        if self.revealed.is_some() {
            return None;
        }
        let outcome = *self.rng.pick(&SCRATCH_OUTCOMES);
        self.revealed = Some(outcome);
        self.reset_ticks = SCRATCH_RESET_TICKS;
        Some(outcome)
    }

    /// Count the reveal down and clear it when the timer runs out.
    pub fn tick(&mut self) {
        if self.revealed.is_none() {
            return;
        }
        self.reset_ticks = self.reset_ticks.saturating_sub(1);
        if self.reset_ticks == 0 {
            self.revealed = None;
        }
    }

    pub fn revealed(&self) -> Option<&'static str> {
        self.revealed
    }

    /// True while a winning discount is showing.
    pub fn is_winner(&self) -> bool {
        matches!(self.revealed, Some(o) if o != LOSING_OUTCOME)
    }
}
