//! Draw pass
//!
//! Translates a borrowed `GameState` into presentation calls. Draw order per
//! screen is background first, then entities, then text.

use std::io;

use glam::Vec2;

use crate::consts::WINDOW_WIDTH;
use crate::highscores::HighScores;
use crate::platform::{Presentation, SpriteKind, TextColor};
use crate::sim::{GamePhase, GameState};
use crate::ui::{HUD_SIZE, UiLayout, text_extent};

/// What to overlay besides the game field
#[derive(Debug, Clone, Copy)]
pub struct Overlay {
    pub show_score: bool,
}

impl Default for Overlay {
    fn default() -> Self {
        Self { show_score: true }
    }
}

/// Render one complete frame
pub fn draw_frame<P: Presentation>(
    p: &mut P,
    state: &GameState,
    ui: &UiLayout,
    scores: &HighScores,
    overlay: Overlay,
) -> io::Result<()> {
    p.draw_sprite(SpriteKind::Background, Vec2::ZERO)?;

    match state.phase {
        GamePhase::Playing => {
            draw_field(p, state)?;
            if overlay.show_score {
                let score = format!("SCORE {}", state.score);
                p.draw_text(&score, Vec2::new(8.0, 8.0), HUD_SIZE, TextColor::Yellow)?;
            }
        }
        GamePhase::Menu => draw_labels(p, ui, GamePhase::Menu)?,
        GamePhase::GameOver => {
            draw_labels(p, ui, GamePhase::GameOver)?;
            draw_results(p, state, scores)?;
        }
    }

    p.present()
}

fn draw_field<P: Presentation>(p: &mut P, state: &GameState) -> io::Result<()> {
    for mushroom in &state.mushrooms {
        p.draw_sprite(SpriteKind::Mushroom, mushroom.pos)?;
    }

    for (i, segment) in state.centipede.segments.iter().enumerate() {
        let kind = if i == 0 {
            SpriteKind::CentipedeHead
        } else {
            SpriteKind::CentipedeBody
        };
        p.draw_sprite(kind, segment.pos)?;
    }

    for bullet in &state.bullets {
        p.draw_sprite(SpriteKind::Bullet, bullet.pos)?;
    }

    p.draw_sprite(SpriteKind::Ship, state.ship.pos)
}

fn draw_labels<P: Presentation>(p: &mut P, ui: &UiLayout, phase: GamePhase) -> io::Result<()> {
    for label in ui.labels(phase) {
        p.draw_text(label.text, label.pos, label.size, label.color)?;
    }
    Ok(())
}

/// Final score and session best under the game-over title
fn draw_results<P: Presentation>(
    p: &mut P,
    state: &GameState,
    scores: &HighScores,
) -> io::Result<()> {
    let lines = [
        format!("SCORE {}  WAVE {}", state.score, state.wave),
        format!("BEST {}", scores.top_score().unwrap_or(state.score)),
    ];
    for (i, line) in lines.iter().enumerate() {
        let width = text_extent(line, HUD_SIZE).x;
        let pos = Vec2::new(WINDOW_WIDTH / 2.0 - width / 2.0, 190.0 + i as f32 * 30.0);
        p.draw_text(line, pos, HUD_SIZE, TextColor::Yellow)?;
    }
    Ok(())
}
