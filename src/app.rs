//! Game loop
//!
//! One iteration drains pending input, runs exactly one fixed simulation
//! step, records phase changes and draws once. `run` repeats that with a
//! fixed delay until quit.

use std::io;
use std::thread;
use std::time::Duration;

use crate::consts::SIM_DT;
use crate::highscores::HighScores;
use crate::platform::{InputEvent, Key, Presentation};
use crate::renderer::{self, Overlay};
use crate::settings::Settings;
use crate::sim::{Control, GamePhase, GameState, TickInput, tick};
use crate::ui::UiLayout;

/// Game instance holding all session state
pub struct App {
    pub state: GameState,
    pub ui: UiLayout,
    pub scores: HighScores,
    overlay: Overlay,
    frame_delay: Duration,
    /// Phase seen at the end of the previous frame
    last_phase: GamePhase,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.resolve_seed();
        log::info!("Session seed {}", seed);
        Self::with_state(GameState::with_rules(seed, settings.rules()), settings)
    }

    pub fn with_state(state: GameState, settings: &Settings) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            ui: UiLayout::new(),
            scores: HighScores::new(),
            overlay: settings.overlay(),
            frame_delay: Duration::from_millis(settings.frame_delay_ms),
            last_phase,
        }
    }

    /// Dispatch a single input event
    pub fn handle_event<P: Presentation>(&mut self, p: &P, event: InputEvent) -> Control {
        match event {
            InputEvent::Close => Control::Quit,
            InputEvent::PointerDown(raw) => {
                let world = p.translate_pointer_to_world(raw);
                match self.ui.hit(self.state.phase, world) {
                    Some(action) => self.state.apply_menu_action(action),
                    None => Control::Continue,
                }
            }
            InputEvent::KeyDown(Key::Fire) => {
                self.state.try_fire();
                Control::Continue
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => Control::Continue,
        }
    }

    /// Run one loop iteration
    pub fn step<P: Presentation>(&mut self, p: &mut P) -> io::Result<Control> {
        while let Some(event) = p.poll_input_event()? {
            if self.handle_event(p, event) == Control::Quit {
                return Ok(Control::Quit);
            }
        }

        let input = TickInput {
            left: p.is_key_held(Key::Left),
            right: p.is_key_held(Key::Right),
        };
        tick(&mut self.state, &input, SIM_DT);
        self.track_phase();

        renderer::draw_frame(p, &self.state, &self.ui, &self.scores, self.overlay)?;
        Ok(Control::Continue)
    }

    /// Loop until quit or an I/O failure
    pub fn run<P: Presentation>(&mut self, p: &mut P) -> io::Result<()> {
        while self.step(p)? == Control::Continue {
            thread::sleep(self.frame_delay);
        }
        log::info!("Shutting down");
        Ok(())
    }

    /// Record finished runs on entering GameOver
    fn track_phase(&mut self) {
        let current = self.state.phase;
        if current != self.last_phase {
            if current == GamePhase::GameOver {
                self.scores.add_score(self.state.score, self.state.wave);
            }
            self.last_phase = current;
        }
    }
}
