//! Click-to-serve counter game.
//!
//! Customers walk across the surface left to right while their patience
//! drains. A click within reach of a walking customer serves them; a customer
//! whose patience runs out turns upset. Five upset customers end the session.
//!
//! Tick order: spawn decision, removal of customers already past the far
//! bound, advance + patience decay, upset flips and click resolution, then
//! the newcomer is appended. A customer therefore never moves, gets
//! hit-tested, or flips on the tick it spawns, and a status transition always
//! lands at least one tick before removal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Phase;
use crate::sim::rng::ArcadeRng;

/// Tri-state customer status. `Served` and `Upset` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerStatus {
    Walking,
    Served,
    Upset,
}

/// One walking customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub pos: Vec2,
    /// Horizontal speed, px per tick.
    pub speed: f32,
    pub patience: f32,
    pub status: CustomerStatus,
}

/// Tunables, defaulted from `consts` and overridden in tests.
#[derive(Debug, Clone, Copy)]
pub struct ServingConfig {
    /// Surface dimensions fixed at construction.
    pub width: f32,
    pub height: f32,
    pub spawn_every: u32,
    pub upset_limit: u32,
}

impl Default for ServingConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 320.0,
            spawn_every: SERVING_SPAWN_TICKS,
            upset_limit: UPSET_LIMIT,
        }
    }
}

/// One serving session. Owns its RNG; holds no timers.
pub struct ServingGame {
    config: ServingConfig,
    phase: Phase,
    customers: Vec<Customer>,
    served: u32,
    upset: u32,
    ticks_until_spawn: u32,
    /// Pointer interactions queued since the last tick.
    clicks: Vec<Vec2>,
    rng: ArcadeRng,
}

impl ServingGame {
    pub fn new(seed: u64) -> Self {
        Self::with_config(ServingConfig::default(), seed)
    }

    pub fn with_config(config: ServingConfig, seed: u64) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            customers: Vec::new(),
            served: 0,
            upset: 0,
            ticks_until_spawn: config.spawn_every,
            clicks: Vec::new(),
            rng: ArcadeRng::seeded(seed),
        }
    }

    /// Reset and begin accepting ticks.
    pub fn start(&mut self) {
        self.phase = Phase::Running;
        self.customers.clear();
        self.clicks.clear();
        self.served = 0;
        self.upset = 0;
        self.ticks_until_spawn = self.config.spawn_every;
    }

    /// The hosting view went away; all later calls are no-ops.
    pub fn close(&mut self) {
        self.phase = Phase::Closed;
    }

    /// Queue a pointer interaction for the next tick.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.phase == Phase::Running {
            self.clicks.push(Vec2::new(x, y));
        }
    }

    /// Advance one step. No-op in any terminal phase.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        // Spawn decision first; the newcomer joins after resolution.
        let newcomer = if self.ticks_until_spawn == 0 {
            self.ticks_until_spawn = self.config.spawn_every;
            Some(self.spawn_customer())
        } else {
            self.ticks_until_spawn -= 1;
            None
        };

        // Customers that crossed the far bound on an earlier tick leave.
        let far = self.config.width + EXIT_MARGIN;
        self.customers.retain(|c| c.pos.x < far);

        for c in &mut self.customers {
            c.pos.x += c.speed;
            if c.status == CustomerStatus::Walking {
                c.patience -= PATIENCE_DECAY;
            }
        }

        for c in &mut self.customers {
            if c.status == CustomerStatus::Walking && c.patience <= 0.0 {
                c.status = CustomerStatus::Upset;
                self.upset += 1;
            }
        }

        for click in std::mem::take(&mut self.clicks) {
            if let Some(c) = self
                .customers
                .iter_mut()
                .find(|c| c.status == CustomerStatus::Walking && c.pos.distance(click) <= SERVE_RADIUS)
            {
                c.status = CustomerStatus::Served;
                self.served += 1;
            }
        }

        if self.upset >= self.config.upset_limit {
            self.phase = Phase::Lost;
        }

        if let Some(c) = newcomer {
            self.customers.push(c);
        }
    }

    fn spawn_customer(&mut self) -> Customer {
        let lane = self
            .rng
            .range_f32(self.config.height * 0.25, self.config.height * 0.85);
        Customer {
            pos: Vec2::new(-EXIT_MARGIN, lane),
            speed: self.rng.range_f32(WALK_SPEED_MIN, WALK_SPEED_MAX),
            patience: PATIENCE_START,
            status: CustomerStatus::Walking,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn served(&self) -> u32 {
        self.served
    }

    pub fn upset(&self) -> u32 {
        self.upset
    }

    pub fn config(&self) -> &ServingConfig {
        &self.config
    }
}
