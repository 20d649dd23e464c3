//! Promo Arcade - promotional mini-games and pricing widgets
//!
//! Core modules:
//! - `sim`: Deterministic game simulations (snake, serving, slots, scratch)
//! - `render`: Platform-neutral draw-command scenes
//! - `flags`: Persisted session flags behind a key-value capability
//! - `pricing`: Static price tables and quote math
//! - `platform`: Browser/native platform abstraction

pub mod flags;
pub mod platform;
pub mod pricing;
pub mod render;
pub mod sim;

pub use flags::{KvStore, MemoryStore, SessionFlags};
pub use sim::{Phase, ServingGame, SlotMachine, SnakeGame};

/// Game configuration constants
pub mod consts {
    // === Snake game ===
    /// Grid dimensions (cells)
    pub const SNAKE_COLS: i32 = 20;
    pub const SNAKE_ROWS: i32 = 20;
    /// Cell edge in pixels on the production canvas
    pub const SNAKE_CELL_PX: f32 = 20.0;
    /// Fixed tick period (ms)
    pub const SNAKE_TICK_MS: i32 = 200;
    /// Starting body length
    pub const SNAKE_START_LEN: usize = 3;
    /// Food items to collect before the coupon is issued
    pub const SNAKE_FOOD_TARGET: u32 = 10;
    pub const SNAKE_REWARD_PREFIX: &str = "SNAKE10";

    // === Serving game ===
    /// Fixed tick period (ms), ~60 Hz
    pub const SERVING_TICK_MS: i32 = 16;
    /// Ticks between customer spawns
    pub const SERVING_SPAWN_TICKS: u32 = 90;
    /// Patience at spawn and its per-tick decay
    pub const PATIENCE_START: f32 = 100.0;
    pub const PATIENCE_DECAY: f32 = 0.35;
    /// Upset customers that end the session
    pub const UPSET_LIMIT: u32 = 5;
    /// Click hit-test radius (px)
    pub const SERVE_RADIUS: f32 = 40.0;
    /// Walk speed range (px per tick)
    pub const WALK_SPEED_MIN: f32 = 0.8;
    pub const WALK_SPEED_MAX: f32 = 1.8;
    /// How far past the right edge a customer is kept before removal
    pub const EXIT_MARGIN: f32 = 30.0;

    // === Slot machine ===
    /// Delay between reel draws during a spin (ms)
    pub const SLOT_STEP_MS: i32 = 90;
    /// Randomized draws per spin
    pub const SLOT_SPIN_DRAWS: u32 = 18;
    /// Trailing draws pinned to the jackpot symbol on a last-credit spin
    pub const SLOT_FORCED_DRAWS: u32 = 3;
    pub const SLOT_START_CREDITS: u32 = 3;
    pub const SLOT_REWARD_PREFIX: &str = "SLOTS25";

    // === Rewards ===
    /// Random suffix length of a coupon code
    pub const CODE_SUFFIX_LEN: usize = 6;
    /// Delay before the reward overlay is revealed (ms)
    pub const REWARD_REVEAL_DELAY_MS: i32 = 900;

    // === Scratch card ===
    /// Fixed tick period (ms)
    pub const SCRATCH_TICK_MS: i32 = 100;
    /// Ticks a revealed result stays up before resetting (3 s)
    pub const SCRATCH_RESET_TICKS: u32 = 30;

    /// LocalStorage key for persisted session flags
    pub const FLAGS_KEY: &str = "promo_arcade_flags";
}
