//! Phase transitions driven by menu selections
//!
//! Menu -> Playing and GameOver -> Playing reset the field. Playing ->
//! GameOver is decided by the tick, never here.

use super::state::{GamePhase, GameState};

/// A clickable menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// "PLAY" on the title screen
    Play,
    /// "PLAY AGAIN" on the game-over screen
    PlayAgain,
    /// "QUIT" on either screen
    Quit,
}

/// Whether the outer loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

impl GameState {
    /// Apply a menu selection for the current phase.
    /// Selections that do not belong to the current screen are ignored.
    pub fn apply_menu_action(&mut self, action: MenuAction) -> Control {
        match (self.phase, action) {
            (GamePhase::Menu, MenuAction::Play) | (GamePhase::GameOver, MenuAction::PlayAgain) => {
                self.start_game();
                Control::Continue
            }
            (GamePhase::Menu | GamePhase::GameOver, MenuAction::Quit) => {
                log::info!("Quit selected from {:?}", self.phase);
                Control::Quit
            }
            (phase, action) => {
                log::debug!("Ignoring {:?} in {:?}", action, phase);
                Control::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_play_starts_game() {
        let mut state = GameState::new(1);
        assert_eq!(state.apply_menu_action(MenuAction::Play), Control::Continue);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_play_again_only_from_game_over() {
        let mut state = GameState::new(1);
        state.apply_menu_action(MenuAction::PlayAgain);
        assert_eq!(state.phase, GamePhase::Menu);

        state.phase = GamePhase::GameOver;
        state.apply_menu_action(MenuAction::PlayAgain);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_from_menu_and_game_over() {
        let mut state = GameState::new(1);
        assert_eq!(state.apply_menu_action(MenuAction::Quit), Control::Quit);
        state.phase = GamePhase::GameOver;
        assert_eq!(state.apply_menu_action(MenuAction::Quit), Control::Quit);
    }

    #[test]
    fn test_menu_actions_ignored_while_playing() {
        let mut state = GameState::new(1);
        state.start_game();
        state.score = 40;
        assert_eq!(state.apply_menu_action(MenuAction::Quit), Control::Continue);
        assert_eq!(state.apply_menu_action(MenuAction::Play), Control::Continue);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_restart_resets_field() {
        let mut state = GameState::new(8);
        state.start_game();
        state.score = 500;
        state.wave = 4;
        state.mushrooms.truncate(3);
        state.centipede.segments.truncate(2);
        state.ship.pos.x = 0.0;
        state.fire_bullet(glam::Vec2::new(5.0, 5.0));
        state.phase = GamePhase::GameOver;

        state.apply_menu_action(MenuAction::PlayAgain);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave, 1);
        assert_eq!(state.mushrooms.len(), 20);
        assert_eq!(state.centipede.len(), 11);
        assert!(state.bullets.is_empty());
        assert_eq!(state.ship.pos, crate::sim::Ship::start_position());
    }
}
