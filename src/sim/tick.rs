//! Fixed timestep simulation tick
//!
//! Advances ship, bullets and centipede by one step and resolves every
//! interaction. Runs only while the phase is `Playing`.

use super::collision::{BulletHit, bullet_hit, head_blocked};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Held-key state sampled once per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move left key held
    pub left: bool,
    /// Move right key held
    pub right: bool,
}

impl TickInput {
    /// -1, 0 or +1; opposing keys cancel
    pub fn axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.fire_cooldown = state.fire_cooldown.saturating_sub(1);

    state.ship.nudge(input.axis() * SHIP_SPEED * dt);

    update_bullets(state, dt);

    // Nothing left to move this frame; the next centipede starts next tick
    if state.centipede.is_empty() {
        state.spawn_next_wave();
        return;
    }

    advance_centipede(state, dt);
}

/// Move bullets oldest-to-newest, consuming each on its first hit
fn update_bullets(state: &mut GameState, dt: f32) {
    let mut i = 0;
    while i < state.bullets.len() {
        state.bullets[i].pos.y -= state.bullet_speed * dt;

        if state.bullets[i].pos.y < 0.0 {
            state.remove_bullet(i);
            continue;
        }

        let bounds = state.bullets[i].bounds();
        match bullet_hit(&bounds, &state.mushrooms, &state.centipede.segments) {
            Some(BulletHit::Mushroom(m)) => {
                if state.mushrooms[m].hit() {
                    let mushroom = state.remove_mushroom(m);
                    state.score += MUSHROOM_POINTS;
                    log::debug!("Mushroom destroyed at {:?}", mushroom.pos);
                }
                state.remove_bullet(i);
            }
            Some(BulletHit::Segment(s)) => {
                state.score += if s == 0 { HEAD_POINTS } else { BODY_POINTS };
                let segment = state.remove_centipede_segment(s);
                log::debug!("Segment {} destroyed at {:?}", s, segment.pos);
                state.remove_bullet(i);
            }
            None => i += 1,
        }
    }
}

/// Head sweeps and turns on obstacles; the body trails one step behind
fn advance_centipede(state: &mut GameState, dt: f32) {
    let centipede = &mut state.centipede;
    centipede.snapshot();

    let dx = centipede.heading.sign() * centipede.speed * dt;
    centipede.segments[0].pos.x += dx;

    if head_blocked(&centipede.segments[0], centipede.heading, &state.mushrooms) {
        centipede.turn();

        if centipede.segments[0].pos.y >= WINDOW_HEIGHT - TILE_SIZE {
            state.phase = GamePhase::GameOver;
            log::info!("Centipede reached the bottom, game over (score {})", state.score);
        }
    }

    centipede.follow();
}
