//! Three-reel promotional slot machine.
//!
//! A spin costs one credit and runs a fixed number of randomized draws, one
//! per tick. Spins on the final credit finish on a pinned jackpot symbol:
//! the promotion always pays out before the player walks away empty-handed.
//! Credits and the claimed flag persist across page loads through the
//! injected key-value store.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::flags::{KvStore, SessionFlags};
use crate::sim::Phase;
use crate::sim::reward::RewardIssuer;
use crate::sim::rng::ArcadeRng;

/// Reel symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReelSymbol {
    Cherry,
    Lemon,
    Bell,
    Star,
    Seven,
}

impl ReelSymbol {
    pub const ALL: [ReelSymbol; 5] = [
        ReelSymbol::Cherry,
        ReelSymbol::Lemon,
        ReelSymbol::Bell,
        ReelSymbol::Star,
        ReelSymbol::Seven,
    ];

    /// The symbol a last-credit spin settles on.
    pub const JACKPOT: ReelSymbol = ReelSymbol::Seven;

    /// Display glyph for the reel window.
    pub fn glyph(self) -> &'static str {
        match self {
            ReelSymbol::Cherry => "🍒",
            ReelSymbol::Lemon => "🍋",
            ReelSymbol::Bell => "🔔",
            ReelSymbol::Star => "⭐",
            ReelSymbol::Seven => "7️⃣",
        }
    }
}

/// Result of a settled spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinOutcome {
    /// Three of a kind: coupon issued, machine locks.
    Jackpot,
    /// Two of a kind: a small fixed discount, no coupon.
    TwoOfAKind,
    Miss,
}

impl SpinOutcome {
    /// Banner line shown under the reels.
    pub fn label(self) -> &'static str {
        match self {
            SpinOutcome::Jackpot => "JACKPOT! Your coupon is on its way",
            SpinOutcome::TwoOfAKind => "Two of a kind: mention this spin for 5% off",
            SpinOutcome::Miss => "No luck this time",
        }
    }
}

/// Tunables, defaulted from `consts` and overridden in tests.
#[derive(Debug, Clone, Copy)]
pub struct SlotsConfig {
    pub start_credits: u32,
    pub spin_draws: u32,
    pub forced_draws: u32,
    /// The last-credit payout guarantee. On by default; the promotion is
    /// intentionally biased and must stay that way.
    pub force_last_credit_win: bool,
    pub reward_prefix: &'static str,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            start_credits: SLOT_START_CREDITS,
            spin_draws: SLOT_SPIN_DRAWS,
            forced_draws: SLOT_FORCED_DRAWS,
            force_last_credit_win: true,
            reward_prefix: SLOT_REWARD_PREFIX,
        }
    }
}

struct SpinState {
    draws_left: u32,
    last_credit: bool,
}

/// One slot machine session bound to a persistent flags store.
pub struct SlotMachine {
    config: SlotsConfig,
    phase: Phase,
    reels: [ReelSymbol; 3],
    credits: u32,
    spin: Option<SpinState>,
    outcome: Option<SpinOutcome>,
    reward: Option<String>,
    store: Box<dyn KvStore>,
    rng: ArcadeRng,
    rewards: RewardIssuer,
}

impl SlotMachine {
    pub fn new(seed: u64, rewards: RewardIssuer, store: Box<dyn KvStore>) -> Self {
        Self::with_config(SlotsConfig::default(), seed, rewards, store)
    }

    pub fn with_config(
        config: SlotsConfig,
        seed: u64,
        rewards: RewardIssuer,
        store: Box<dyn KvStore>,
    ) -> Self {
        let flags = SessionFlags::load(store.as_ref());
        // A claimed promotion keeps the machine locked across reloads.
        let phase = if flags.promo_claimed {
            Phase::Won
        } else {
            Phase::Idle
        };
        Self {
            config,
            phase,
            reels: [ReelSymbol::Cherry; 3],
            credits: flags.credits.min(config.start_credits),
            spin: None,
            outcome: None,
            reward: None,
            store,
            rng: ArcadeRng::seeded(seed),
            rewards,
        }
    }

    /// Begin a spin. Refused while one is running, in a terminal phase, or
    /// with no credits left; refusal changes no state.
    pub fn spin(&mut self) -> bool {
        if self.spin.is_some() || self.phase.is_terminal() || self.credits == 0 {
            return false;
        }
        self.phase = Phase::Running;
        self.credits -= 1;
        self.persist_flags();
        self.outcome = None;
        self.spin = Some(SpinState {
            draws_left: self.config.spin_draws,
            last_credit: self.credits == 0 && self.config.force_last_credit_win,
        });
        true
    }

    /// Advance the running spin by one draw. No-op otherwise.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(state) = self.spin.as_mut() else {
            return;
        };

        state.draws_left -= 1;
        if state.last_credit && state.draws_left < self.config.forced_draws {
            self.reels = [ReelSymbol::JACKPOT; 3];
        } else {
            for slot in &mut self.reels {
                *slot = *self.rng.pick(&ReelSymbol::ALL);
            }
        }

        if state.draws_left == 0 {
            self.spin = None;
            self.settle();
        }
    }

    /// Score the stopped reels and transition.
    fn settle(&mut self) {
        let [a, b, c] = self.reels;
        let outcome = if a == b && b == c {
            SpinOutcome::Jackpot
        } else if a == b || b == c || a == c {
            SpinOutcome::TwoOfAKind
        } else {
            SpinOutcome::Miss
        };
        self.outcome = Some(outcome);

        if outcome == SpinOutcome::Jackpot {
            let code = self.rewards.issue(self.config.reward_prefix, &mut self.rng);
            log::info!("slots jackpot, coupon {code}");
            self.reward = Some(code);
            self.phase = Phase::Won;
            self.persist_flags();
        } else if self.credits == 0 {
            self.phase = Phase::Lost;
        }
    }

    /// Restore full credits and wipe the persisted flags.
    pub fn reset(&mut self) {
        self.credits = self.config.start_credits;
        self.phase = Phase::Idle;
        self.spin = None;
        self.outcome = None;
        self.reward = None;
        self.reels = [ReelSymbol::Cherry; 3];
        SessionFlags::default().save(self.store.as_mut());
    }

    /// The hosting view went away; all later calls are no-ops.
    pub fn close(&mut self) {
        self.phase = Phase::Closed;
        self.spin = None;
    }

    fn persist_flags(&mut self) {
        SessionFlags {
            credits: self.credits,
            promo_claimed: self.phase == Phase::Won,
        }
        .save(self.store.as_mut());
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reels(&self) -> [ReelSymbol; 3] {
        self.reels
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn outcome(&self) -> Option<SpinOutcome> {
        self.outcome
    }

    /// The issued coupon code, once a jackpot has landed.
    pub fn reward_code(&self) -> Option<&str> {
        self.reward.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::MemoryStore;
    use crate::sim::reward::testing::{matches_code_pattern, recording_issuer};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn machine(seed: u64) -> SlotMachine {
        SlotMachine::new(seed, RewardIssuer::silent(), Box::new(MemoryStore::new()))
    }

    fn run_spin(m: &mut SlotMachine) {
        assert!(m.spin(), "spin refused");
        while m.is_spinning() {
            m.tick();
        }
    }

    #[test]
    fn spin_costs_exactly_one_credit() {
        let mut m = machine(1);
        let before = m.credits();
        assert!(m.spin());
        assert_eq!(m.credits(), before - 1);
    }

    #[test]
    fn spin_refused_while_spinning() {
        let mut m = machine(1);
        assert!(m.spin());
        let credits = m.credits();
        assert!(!m.spin());
        assert_eq!(m.credits(), credits);
    }

    #[test]
    fn spin_refused_at_zero_credits_without_state_change() {
        let mut store = MemoryStore::new();
        SessionFlags {
            credits: 0,
            promo_claimed: false,
        }
        .save(&mut store);
        let mut m = SlotMachine::new(9, RewardIssuer::silent(), Box::new(store));
        assert_eq!(m.credits(), 0);
        let reels = m.reels();
        assert!(!m.spin());
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.credits(), 0);
        assert_eq!(m.reels(), reels);
        assert!(!m.is_spinning());
        assert_eq!(m.outcome(), None);
    }

    #[test]
    fn without_the_guarantee_a_last_credit_spin_can_settle_either_way() {
        let mut store = MemoryStore::new();
        SessionFlags {
            credits: 1,
            promo_claimed: false,
        }
        .save(&mut store);
        let mut m = SlotMachine::with_config(
            SlotsConfig {
                force_last_credit_win: false,
                ..SlotsConfig::default()
            },
            2,
            RewardIssuer::silent(),
            Box::new(store),
        );
        run_spin(&mut m);
        assert_eq!(m.credits(), 0);
        match m.outcome().unwrap() {
            SpinOutcome::Jackpot => assert_eq!(m.phase(), Phase::Won),
            _ => assert_eq!(m.phase(), Phase::Lost),
        }
    }

    #[test]
    fn last_credit_spin_lands_the_pinned_jackpot() {
        for seed in 0..16 {
            let mut m = machine(seed);
            while m.credits() > 1 && !m.phase().is_terminal() {
                run_spin(&mut m);
            }
            if m.phase().is_terminal() {
                continue; // an honest jackpot arrived early
            }
            assert_eq!(m.credits(), 1);
            run_spin(&mut m);
            assert_eq!(m.reels(), [ReelSymbol::JACKPOT; 3]);
            assert_eq!(m.outcome(), Some(SpinOutcome::Jackpot));
            assert_eq!(m.phase(), Phase::Won);
        }
    }

    #[test]
    fn three_credit_session_ends_won_with_spins_locked() {
        let (issuer, shown) = recording_issuer();
        let mut m = SlotMachine::new(5, issuer, Box::new(MemoryStore::new()));
        let mut spins = 0;
        while !m.phase().is_terminal() {
            run_spin(&mut m);
            spins += 1;
            assert!(spins <= SLOT_START_CREDITS);
        }
        assert_eq!(m.phase(), Phase::Won);
        assert_eq!(m.credits() + spins, SLOT_START_CREDITS);
        assert!(!m.spin(), "spins must be locked after the win");
        let shown = shown.borrow();
        assert_eq!(shown.len(), 1);
        assert!(matches_code_pattern(&shown[0], SLOT_REWARD_PREFIX));
        assert_eq!(m.reward_code(), Some(shown[0].as_str()));
    }

    #[test]
    fn credits_and_claim_survive_a_reload() {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        let mut m = SlotMachine::new(5, RewardIssuer::silent(), Box::new(store.clone()));
        run_spin(&mut m);
        let credits = m.credits();
        let phase = m.phase();
        drop(m);

        let m2 = SlotMachine::new(6, RewardIssuer::silent(), Box::new(store.clone()));
        assert_eq!(m2.credits(), credits);
        if phase == Phase::Won {
            assert_eq!(m2.phase(), Phase::Won);
            assert!(m2.phase().is_terminal());
        }
    }

    #[test]
    fn claimed_flag_locks_the_machine_on_load() {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        let mut m = SlotMachine::new(5, RewardIssuer::silent(), Box::new(store.clone()));
        while !m.phase().is_terminal() {
            run_spin(&mut m);
        }
        assert_eq!(m.phase(), Phase::Won);
        drop(m);

        let mut m2 = SlotMachine::new(7, RewardIssuer::silent(), Box::new(store.clone()));
        assert_eq!(m2.phase(), Phase::Won);
        assert!(!m2.spin());
    }

    #[test]
    fn reset_restores_credits_and_clears_flags() {
        let store = Rc::new(RefCell::new(MemoryStore::new()));
        let mut m = SlotMachine::new(5, RewardIssuer::silent(), Box::new(store.clone()));
        while !m.phase().is_terminal() {
            run_spin(&mut m);
        }
        m.reset();
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.credits(), SLOT_START_CREDITS);
        assert_eq!(m.outcome(), None);
        assert_eq!(m.reward_code(), None);

        let fresh = SessionFlags::load(&*store.borrow());
        assert_eq!(fresh, SessionFlags::default());
        assert!(m.spin());
    }

    #[test]
    fn close_cancels_a_running_spin() {
        let mut m = machine(3);
        assert!(m.spin());
        assert!(m.is_spinning());
        m.close();
        assert_eq!(m.phase(), Phase::Closed);
        assert!(!m.is_spinning());
        let reels = m.reels();
        m.tick();
        assert_eq!(m.reels(), reels);
        assert!(!m.spin());
    }
}
