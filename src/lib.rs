//! Centipede - a grid-based arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game phases)
//! - `platform`: Presentation adapter trait plus terminal/headless backends
//! - `renderer`: Draw pass from game state to presentation calls
//! - `ui`: Menu and game-over label layout
//! - `app`: Fixed-step game loop
//! - `settings`: Data-driven configuration

pub mod app;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::App;
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one step per loop iteration)
    pub const SIM_DT: f32 = 0.016;
    /// Artificial delay between loop iterations, in milliseconds
    pub const FRAME_DELAY_MS: u64 = 16;

    /// Field dimensions in pixels
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;
    pub const TILE_SIZE: f32 = 32.0;
    /// Grid dimensions in tiles (partial tiles dropped)
    pub const GRID_WIDTH: u32 = WINDOW_WIDTH as u32 / TILE_SIZE as u32;
    pub const GRID_HEIGHT: u32 = WINDOW_HEIGHT as u32 / TILE_SIZE as u32;
    /// Bottom rows kept free of mushrooms for the ship's lane
    pub const MUSHROOM_FREE_ROWS: u32 = 5;

    /// Ship defaults
    pub const SHIP_WIDTH: f32 = 32.0;
    pub const SHIP_HEIGHT: f32 = 32.0;
    /// 5 px per step at the fixed timestep
    pub const SHIP_SPEED: f32 = 312.5;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    pub const BULLET_SPEED: f32 = 500.0;

    /// Mushroom defaults
    pub const MUSHROOM_HP: u8 = 2;
    pub const MUSHROOM_COUNT: usize = 20;
    /// One mushroom per cell above the ship's lane
    pub const MAX_MUSHROOMS: usize = (GRID_WIDTH * (GRID_HEIGHT - MUSHROOM_FREE_ROWS)) as usize;

    /// Centipede defaults
    pub const CENTIPEDE_SPEED: f32 = 100.0;
    pub const CENTIPEDE_BODY_SEGMENTS: usize = 10;

    /// Points awarded per kill
    pub const MUSHROOM_POINTS: u64 = 1;
    pub const BODY_POINTS: u64 = 10;
    pub const HEAD_POINTS: u64 = 100;
}

/// Convert a grid cell (column, row) to its top-left pixel position
#[inline]
pub fn cell_to_world(column: u32, row: u32) -> glam::Vec2 {
    glam::Vec2::new(
        column as f32 * consts::TILE_SIZE,
        row as f32 * consts::TILE_SIZE,
    )
}
