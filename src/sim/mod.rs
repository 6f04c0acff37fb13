//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (store order, oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod phase;
pub mod state;
pub mod tick;

pub use collision::{BulletHit, bullet_hit, head_blocked};
pub use geom::Aabb;
pub use phase::{Control, MenuAction};
pub use state::{
    Bullet, Centipede, GamePhase, GameState, Heading, Mushroom, Rules, Segment, Ship,
};
pub use tick::{TickInput, tick};
