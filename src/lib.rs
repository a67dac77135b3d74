//! Game Hub - a menu-driven terminal arcade
//!
//! Core modules:
//! - `arcade`: Mode state machine that owns the active game
//! - `games`: The five game cores (pure state + rules, no rendering)
//! - `rng`: Seeded deterministic RNG shared by every game
//! - `input`: Discrete per-tick input event vocabulary
//! - `results`: Append-only result log sink
//! - `settings`: Validated configuration
//! - `term`: Terminal render/input adapter (consumes core snapshots only)

pub mod arcade;
pub mod games;
pub mod input;
pub mod results;
pub mod rng;
pub mod settings;
pub mod term;

pub use arcade::{Arcade, ArcadeMode, RenderAdapter, Snapshot, TickOutcome};
pub use settings::{ArcadeConfig, ConfigError};

/// Game configuration constants
pub mod consts {
    /// Logical tick length in milliseconds (the adapter paces the loop to this)
    pub const TICK_MS: u64 = 80;

    /// Space Survivor field dimensions (columns x rows)
    pub const FIELD_WIDTH: f32 = 30.0;
    pub const FIELD_HEIGHT: f32 = 15.0;

    /// Asteroid population at the start of a run
    pub const INITIAL_ASTEROIDS: usize = 5;
    /// Hard cap on the asteroid population
    pub const MAX_ASTEROIDS: usize = 12;

    /// Collision radii for the continuous overlap check
    pub const SHIP_RADIUS: f32 = 0.45;
    pub const ASTEROID_MIN_RADIUS: f32 = 0.3;
    pub const ASTEROID_MAX_RADIUS: f32 = 0.5;
    pub const COLLISION_MARGIN: f32 = 0.05;

    /// Asteroids respawn this far above the top edge
    pub const ASTEROID_SPAWN_Y: f32 = -2.0;
    /// Score reward per recycled asteroid
    pub const ASTEROID_REWARD: u32 = 10;
    /// Score interval between difficulty bumps
    pub const DIFFICULTY_STEP: u32 = 200;

    /// Fall speed band at difficulty zero (cells per tick)
    pub const FALL_SPEED_MIN: f32 = 0.55;
    pub const FALL_SPEED_MAX: f32 = 0.95;
    /// Added to both band edges per difficulty level
    pub const SPEED_PER_LEVEL: f32 = 0.08;
    /// Fall speed never exceeds this
    pub const FALL_SPEED_CAP: f32 = 1.8;

    /// Zombie Escape grid is GRID_SIZE x GRID_SIZE
    pub const GRID_SIZE: i32 = 10;

    /// Break The Code secret length and attempt budget
    pub const CODE_LENGTH: usize = 4;
    pub const MAX_ATTEMPTS: u8 = 10;

    /// Swap Cards pair count (board holds PAIR_COUNT * 2 cards)
    pub const PAIR_COUNT: usize = 8;
    /// Ticks a mismatched pair stays face up before flipping back
    pub const REVEAL_WINDOW_TICKS: u32 = 18;
}
