//! Game state and core simulation types
//!
//! `GameState` is the entity store: it exclusively owns the ship, bullets,
//! mushrooms and centipede, and exposes the spawn/remove operations the
//! movement engine and state machine are built on.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geom::Aabb;
use crate::cell_to_world;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen with Play/Quit
    Menu,
    /// Active gameplay
    Playing,
    /// Centipede reached the bottom; Play Again/Quit
    GameOver,
}

/// Horizontal sweep direction of the centipede
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    Left,
    #[default]
    Right,
}

impl Heading {
    /// Unit sign along the x axis
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
}

impl Ship {
    /// Horizontally centred, resting on the bottom edge
    pub fn start_position() -> Vec2 {
        Vec2::new(
            WINDOW_WIDTH / 2.0 - SHIP_WIDTH / 2.0,
            WINDOW_HEIGHT - SHIP_HEIGHT,
        )
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(SHIP_WIDTH, SHIP_HEIGHT))
    }

    /// Spawn point for a bullet: top-centre of the ship
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + SHIP_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
            self.pos.y,
        )
    }

    /// Shift horizontally and clamp to the field
    pub fn nudge(&mut self, dx: f32) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, WINDOW_WIDTH - SHIP_WIDTH);
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Self::start_position(),
        }
    }
}

/// A player bullet travelling straight up
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

/// A grid-aligned obstacle with its own durability
#[derive(Debug, Clone)]
pub struct Mushroom {
    pub pos: Vec2,
    pub hp: u8,
}

impl Mushroom {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            hp: MUSHROOM_HP,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(TILE_SIZE))
    }

    /// Apply one bullet hit; returns true if the mushroom is now destroyed
    pub fn hit(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }
}

/// One centipede segment with its position from before the current step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub pos: Vec2,
    pub prev: Vec2,
}

impl Segment {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, prev: pos }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(TILE_SIZE))
    }
}

/// The segmented enemy. Index 0 is the head.
#[derive(Debug, Clone)]
pub struct Centipede {
    pub segments: Vec<Segment>,
    pub heading: Heading,
    /// Speed magnitude in pixels per second
    pub speed: f32,
}

impl Default for Centipede {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            heading: Heading::Right,
            speed: CENTIPEDE_SPEED,
        }
    }
}

impl Centipede {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Record every segment's current position as its pre-step position
    pub fn snapshot(&mut self) {
        for segment in &mut self.segments {
            segment.prev = segment.pos;
        }
    }

    /// Move each body segment onto its predecessor's pre-step position
    pub fn follow(&mut self) {
        for i in 1..self.segments.len() {
            self.segments[i].pos = self.segments[i - 1].prev;
        }
    }

    /// Drop down a tile and sweep the other way
    pub fn turn(&mut self) {
        if let Some(head) = self.segments.first_mut() {
            head.pos.x = head.pos.x.clamp(0.0, WINDOW_WIDTH - TILE_SIZE);
            head.pos.y += TILE_SIZE;
        }
        self.heading = self.heading.reversed();
    }
}

/// Tunable rules the simulation reads (built from `Settings`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    /// Mushrooms spawned per game
    pub mushroom_count: usize,
    /// Minimum ticks between shots (0 = unlimited)
    pub fire_cooldown_ticks: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            mushroom_count: MUSHROOM_COUNT,
            fire_cooldown_ticks: 0,
        }
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub rules: Rules,
    pub phase: GamePhase,
    pub score: u64,
    /// Current centipede number (1-based once playing)
    pub wave: u32,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    /// Ticks left before another shot is allowed
    pub fire_cooldown: u32,
    pub bullet_speed: f32,
    pub ship: Ship,
    /// Oldest first
    pub bullets: Vec<Bullet>,
    pub mushrooms: Vec<Mushroom>,
    pub centipede: Centipede,
}

impl GameState {
    /// Create a session in the Menu phase with default rules
    pub fn new(seed: u64) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    pub fn with_rules(seed: u64, rules: Rules) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            phase: GamePhase::Menu,
            score: 0,
            wave: 0,
            time_ticks: 0,
            fire_cooldown: 0,
            bullet_speed: BULLET_SPEED,
            ship: Ship::default(),
            bullets: Vec::new(),
            mushrooms: Vec::new(),
            centipede: Centipede::default(),
        }
    }

    /// Reset the field and enter Playing
    pub fn start_game(&mut self) {
        self.bullets.clear();
        self.mushrooms.clear();
        self.centipede = Centipede::default();
        self.score = 0;
        self.wave = 1;
        self.time_ticks = 0;
        self.fire_cooldown = 0;

        self.spawn_mushrooms(self.rules.mushroom_count);
        self.spawn_centipede();
        self.ship.pos = Ship::start_position();

        self.phase = GamePhase::Playing;
        log::info!(
            "Game started: {} mushrooms, {} segments",
            self.mushrooms.len(),
            self.centipede.len()
        );
    }

    /// Scatter mushrooms over grid cells above the ship's lane
    pub fn spawn_mushrooms(&mut self, count: usize) {
        let rows = GRID_HEIGHT - MUSHROOM_FREE_ROWS;
        self.mushrooms.reserve(count);
        for _ in 0..count {
            let column = self.rng.random_range(0..GRID_WIDTH);
            let row = self.rng.random_range(0..rows);
            self.mushrooms.push(Mushroom::new(cell_to_world(column, row)));
        }
    }

    /// Replace the centipede with a fresh head + body chain on the top row
    pub fn spawn_centipede(&mut self) {
        let column = self
            .rng
            .random_range(0..GRID_WIDTH - CENTIPEDE_BODY_SEGMENTS as u32);
        let head = cell_to_world(column, 0);

        let mut centipede = Centipede::default();
        centipede.segments.push(Segment::new(head));
        for i in 1..=CENTIPEDE_BODY_SEGMENTS {
            let offset = Vec2::new(i as f32 * TILE_SIZE, 0.0);
            centipede.segments.push(Segment::new(head - offset));
        }
        self.centipede = centipede;
    }

    /// Start the next wave after the previous centipede was cleared
    pub fn spawn_next_wave(&mut self) {
        self.wave += 1;
        self.spawn_centipede();
        log::info!("Centipede cleared, wave {} begins", self.wave);
    }

    /// Append a bullet at `origin`
    pub fn fire_bullet(&mut self, origin: Vec2) {
        self.bullets.push(Bullet { pos: origin });
    }

    /// Fire from the ship if the cooldown policy allows; returns true on a shot
    pub fn try_fire(&mut self) -> bool {
        if self.phase != GamePhase::Playing || self.fire_cooldown > 0 {
            return false;
        }
        self.fire_bullet(self.ship.muzzle());
        self.fire_cooldown = self.rules.fire_cooldown_ticks;
        true
    }

    /// Panics if `index` is out of range
    pub fn remove_mushroom(&mut self, index: usize) -> Mushroom {
        self.mushrooms.remove(index)
    }

    /// Panics if `index` is out of range
    pub fn remove_bullet(&mut self, index: usize) -> Bullet {
        self.bullets.remove(index)
    }

    /// Remove a segment; the chain closes up behind it and the next
    /// segment becomes head if index 0 is removed. Panics if out of range.
    pub fn remove_centipede_segment(&mut self, index: usize) -> Segment {
        self.centipede.segments.remove(index)
    }
}
