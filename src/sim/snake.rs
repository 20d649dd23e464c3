//! Grid snake game.
//!
//! Discrete cell movement on a fixed grid: the body grows when the head
//! lands on food, the session is lost on wall or self contact, and a coupon
//! is issued once when the score reaches the configured target. Ticks are
//! driven externally at a fixed period.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Phase;
use crate::sim::reward::RewardIssuer;
use crate::sim::rng::ArcadeRng;

/// A cell coordinate. Column 0 / row 0 is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    fn stepped(self, heading: Heading) -> Self {
        let (dc, dr) = heading.delta();
        Self::new(self.col + dc, self.row + dr)
    }
}

/// Direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// Tunables, defaulted from `consts` and overridden in tests.
#[derive(Debug, Clone, Copy)]
pub struct SnakeConfig {
    pub cols: i32,
    pub rows: i32,
    pub food_target: u32,
    pub reward_prefix: &'static str,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            cols: SNAKE_COLS,
            rows: SNAKE_ROWS,
            food_target: SNAKE_FOOD_TARGET,
            reward_prefix: SNAKE_REWARD_PREFIX,
        }
    }
}

/// One snake session. Owns its RNG and reward issuer; holds no timers.
pub struct SnakeGame {
    config: SnakeConfig,
    phase: Phase,
    /// Body cells, head first. No duplicates while the session runs.
    body: VecDeque<GridPos>,
    /// Unset until the first steer; ticks are no-ops until then.
    heading: Option<Heading>,
    food: GridPos,
    score: u32,
    reward: Option<String>,
    rng: ArcadeRng,
    rewards: RewardIssuer,
}

impl SnakeGame {
    pub fn new(seed: u64, rewards: RewardIssuer) -> Self {
        Self::with_config(SnakeConfig::default(), seed, rewards)
    }

    pub fn with_config(config: SnakeConfig, seed: u64, rewards: RewardIssuer) -> Self {
        let mut game = Self {
            config,
            phase: Phase::Idle,
            body: VecDeque::new(),
            heading: None,
            food: GridPos::new(0, 0),
            score: 0,
            reward: None,
            rng: ArcadeRng::seeded(seed),
            rewards,
        };
        game.reset();
        game
    }

    /// Clear all session state back to `Idle`.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.heading = None;
        self.score = 0;
        self.reward = None;
        self.body.clear();
        let head = GridPos::new(self.config.cols / 2, self.config.rows / 2);
        for i in 0..SNAKE_START_LEN as i32 {
            self.body.push_back(GridPos::new(head.col - i, head.row));
        }
        self.food = self.free_cell();
    }

    /// Reset and begin accepting ticks.
    pub fn start(&mut self) {
        self.reset();
        self.phase = Phase::Running;
    }

    /// The hosting view went away; all later calls are no-ops.
    pub fn close(&mut self) {
        self.phase = Phase::Closed;
    }

    /// Change the direction of travel. A steer that exactly reverses the
    /// current heading is dropped, since it would fold the head into the
    /// neck on the next tick.
    pub fn steer(&mut self, heading: Heading) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(current) = self.heading {
            if heading == current.opposite() {
                return;
            }
        }
        self.heading = Some(heading);
    }

    /// Advance one step. No-op before the first steer and in any terminal
    /// phase.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        let Some(heading) = self.heading else {
            return;
        };

        let head = self.body[0].stepped(heading);
        if !self.in_bounds(head) || self.body.contains(&head) {
            self.phase = Phase::Lost;
            return;
        }

        self.body.push_front(head);
        if head == self.food {
            self.score += 1;
            if self.score >= self.config.food_target {
                let code = self
                    .rewards
                    .issue(self.config.reward_prefix, &mut self.rng);
                log::info!("snake target reached, coupon {code}");
                self.reward = Some(code);
                self.phase = Phase::Won;
            } else {
                self.food = self.free_cell();
            }
        } else {
            self.body.pop_back();
        }
    }

    fn in_bounds(&self, p: GridPos) -> bool {
        p.col >= 0 && p.col < self.config.cols && p.row >= 0 && p.row < self.config.rows
    }

    /// A random cell not covered by the body.
    fn free_cell(&mut self) -> GridPos {
        loop {
            let p = GridPos::new(
                self.rng.below(self.config.cols as u32) as i32,
                self.rng.below(self.config.rows as u32) as i32,
            );
            if !self.body.contains(&p) {
                return p;
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn heading(&self) -> Option<Heading> {
        self.heading
    }

    pub fn body(&self) -> &VecDeque<GridPos> {
        &self.body
    }

    pub fn head(&self) -> GridPos {
        self.body[0]
    }

    pub fn food(&self) -> GridPos {
        self.food
    }

    /// The issued coupon code, once the target has been reached.
    pub fn reward_code(&self) -> Option<&str> {
        self.reward.as_deref()
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::reward::testing::{matches_code_pattern, recording_issuer};
    use proptest::prelude::*;

    fn running_game(config: SnakeConfig, seed: u64) -> SnakeGame {
        let mut game = SnakeGame::with_config(config, seed, RewardIssuer::silent());
        game.start();
        game
    }

    /// Next heading along a fixed tour of every cell: right across row 0,
    /// boustrophedon through columns 1.. on the inner rows, back up column 0.
    /// Valid for an even number of rows.
    fn tour_heading(p: GridPos, cols: i32, rows: i32) -> Heading {
        if p.row == 0 {
            if p.col < cols - 1 {
                Heading::Right
            } else {
                Heading::Down
            }
        } else if p.col == 0 {
            Heading::Up
        } else if p.row % 2 == 1 {
            if p.col > 1 || p.row == rows - 1 {
                Heading::Left
            } else {
                Heading::Down
            }
        } else if p.col < cols - 1 {
            Heading::Right
        } else {
            Heading::Down
        }
    }

    #[test]
    fn ticks_are_noops_until_first_steer() {
        let mut game = running_game(SnakeConfig::default(), 3);
        let body = game.body().clone();
        for _ in 0..10 {
            game.tick();
        }
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(*game.body(), body);
    }

    #[test]
    fn reversal_steer_is_rejected() {
        let mut game = running_game(SnakeConfig::default(), 3);
        game.steer(Heading::Right);
        game.tick();
        game.steer(Heading::Left);
        assert_eq!(game.heading(), Some(Heading::Right));
        // Perpendicular steers are fine
        game.steer(Heading::Up);
        assert_eq!(game.heading(), Some(Heading::Up));
    }

    #[test]
    fn wall_hit_is_lost_and_freezes_state() {
        let mut game = running_game(SnakeConfig::default(), 3);
        game.steer(Heading::Right);
        for _ in 0..SNAKE_COLS {
            game.tick();
        }
        assert_eq!(game.phase(), Phase::Lost);
        let body = game.body().clone();
        let score = game.score();
        for _ in 0..5 {
            game.tick();
            game.steer(Heading::Up);
        }
        assert_eq!(game.phase(), Phase::Lost);
        assert_eq!(*game.body(), body);
        assert_eq!(game.score(), score);
    }

    fn has_room(p: GridPos, d: Heading, n: i32, cols: i32, rows: i32) -> bool {
        let (dc, dr) = d.delta();
        let c = p.col + dc * n;
        let r = p.row + dr * n;
        c >= 0 && c < cols && r >= 0 && r < rows
    }

    #[test]
    fn self_collision_is_lost() {
        // Grow to length 5 so a U-turn fold lands on a body cell, then fold.
        let mut game = running_game(SnakeConfig::default(), 3);
        let cfg = *game.config();
        while game.score() < 2 && game.phase() == Phase::Running {
            game.steer(tour_heading(game.head(), cfg.cols, cfg.rows));
            game.tick();
        }
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.body().len(), SNAKE_START_LEN + 2);

        // Straighten the neck: three moves along a direction with room.
        let h = game.heading().unwrap();
        let d = if has_room(game.head(), h, 4, cfg.cols, cfg.rows) {
            h
        } else {
            let side = match h {
                Heading::Up | Heading::Down => Heading::Left,
                Heading::Left | Heading::Right => Heading::Up,
            };
            if has_room(game.head(), side, 4, cfg.cols, cfg.rows) {
                side
            } else {
                side.opposite()
            }
        };
        for _ in 0..3 {
            game.steer(d);
            game.tick();
            assert_eq!(game.phase(), Phase::Running);
        }

        // U-turn: perpendicular, back, perpendicular again, onto the neck.
        let p = match d {
            Heading::Up | Heading::Down => {
                if has_room(game.head(), Heading::Left, 1, cfg.cols, cfg.rows) {
                    Heading::Left
                } else {
                    Heading::Right
                }
            }
            Heading::Left | Heading::Right => {
                if has_room(game.head(), Heading::Up, 1, cfg.cols, cfg.rows) {
                    Heading::Up
                } else {
                    Heading::Down
                }
            }
        };
        game.steer(p);
        game.tick();
        assert_eq!(game.phase(), Phase::Running);
        game.steer(d.opposite());
        game.tick();
        assert_eq!(game.phase(), Phase::Running);
        game.steer(p.opposite());
        game.tick();
        assert_eq!(game.phase(), Phase::Lost);
    }

    #[test]
    fn close_is_terminal_from_any_phase() {
        let mut game = running_game(SnakeConfig::default(), 3);
        game.steer(Heading::Right);
        game.tick();
        game.close();
        assert_eq!(game.phase(), Phase::Closed);
        let body = game.body().clone();
        game.tick();
        game.steer(Heading::Up);
        assert_eq!(*game.body(), body);
        assert_eq!(game.phase(), Phase::Closed);
    }

    #[test]
    fn tour_collects_target_and_issues_one_coupon() {
        let config = SnakeConfig {
            cols: 8,
            rows: 8,
            food_target: 10,
            reward_prefix: "SNAKE10",
        };
        let (issuer, shown) = recording_issuer();
        let mut game = SnakeGame::with_config(config, 77, issuer);
        game.start();

        let mut ticks = 0;
        while game.phase() == Phase::Running {
            game.steer(tour_heading(game.head(), config.cols, config.rows));
            game.tick();
            ticks += 1;
            assert!(ticks < 20_000, "tour never finished");
        }

        assert_eq!(game.phase(), Phase::Won);
        assert_eq!(game.score(), 10);
        assert_eq!(game.body().len(), SNAKE_START_LEN + 10);

        let shown = shown.borrow();
        assert_eq!(shown.len(), 1, "overlay must trigger exactly once");
        assert!(matches_code_pattern(&shown[0], "SNAKE10"));
        assert_eq!(game.reward_code(), Some(shown[0].as_str()));
    }

    proptest! {
        /// Body length changes by exactly the score delta on every tick.
        #[test]
        fn length_tracks_score(seed in any::<u64>(), steers in prop::collection::vec(0u8..4, 1..120)) {
            let mut game = running_game(SnakeConfig::default(), seed);
            for s in steers {
                let heading = match s {
                    0 => Heading::Up,
                    1 => Heading::Down,
                    2 => Heading::Left,
                    _ => Heading::Right,
                };
                game.steer(heading);
                let len_before = game.body().len();
                let score_before = game.score();
                game.tick();
                prop_assert_eq!(
                    game.body().len(),
                    len_before + (game.score() - score_before) as usize
                );
            }
        }

        /// The applied heading is never the opposite of the previous one.
        #[test]
        fn heading_never_reverses(seed in any::<u64>(), steers in prop::collection::vec(0u8..4, 1..120)) {
            let mut game = running_game(SnakeConfig::default(), seed);
            for s in steers {
                let before = game.heading();
                let heading = match s {
                    0 => Heading::Up,
                    1 => Heading::Down,
                    2 => Heading::Left,
                    _ => Heading::Right,
                };
                game.steer(heading);
                if let (Some(prev), Some(now)) = (before, game.heading()) {
                    prop_assert_ne!(now, prev.opposite());
                }
                game.tick();
            }
        }
    }
}
