//! Menu and game-over screen layout
//!
//! Labels are laid out in world pixels, centred horizontally. Their boxes are
//! what pointer clicks are tested against.

use glam::Vec2;

use crate::consts::WINDOW_WIDTH;
use crate::platform::TextColor;
use crate::sim::{Aabb, GamePhase, MenuAction};

/// Horizontal advance of one glyph relative to the character size
const GLYPH_ASPECT: f32 = 0.6;

const TITLE_SIZE: f32 = 64.0;
const OPTION_SIZE: f32 = 48.0;
pub const HUD_SIZE: f32 = 20.0;

/// Approximate rendered size of `text` at character size `size`
pub fn text_extent(text: &str, size: f32) -> Vec2 {
    Vec2::new(text.chars().count() as f32 * size * GLYPH_ASPECT, size)
}

/// A piece of screen text, optionally clickable
#[derive(Debug, Clone)]
pub struct Label {
    pub text: &'static str,
    pub pos: Vec2,
    pub size: f32,
    pub color: TextColor,
    pub action: Option<MenuAction>,
}

impl Label {
    /// Label horizontally centred at height `y`
    fn centered(
        text: &'static str,
        y: f32,
        size: f32,
        color: TextColor,
        action: Option<MenuAction>,
    ) -> Self {
        let width = text_extent(text, size).x;
        Self {
            text,
            pos: Vec2::new(WINDOW_WIDTH / 2.0 - width / 2.0, y),
            size,
            color,
            action,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, text_extent(self.text, self.size))
    }
}

/// All labels for the non-playing screens
#[derive(Debug, Clone)]
pub struct UiLayout {
    pub menu: Vec<Label>,
    pub game_over: Vec<Label>,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl UiLayout {
    pub fn new() -> Self {
        let quit = Label::centered(
            "QUIT",
            400.0,
            OPTION_SIZE,
            TextColor::White,
            Some(MenuAction::Quit),
        );

        let menu = vec![
            Label::centered("CENTIPEDE", 100.0, TITLE_SIZE, TextColor::Green, None),
            Label::centered(
                "PLAY",
                300.0,
                OPTION_SIZE,
                TextColor::White,
                Some(MenuAction::Play),
            ),
            quit.clone(),
        ];

        let game_over = vec![
            Label::centered("GAME OVER", 100.0, TITLE_SIZE, TextColor::Red, None),
            Label::centered(
                "PLAY AGAIN",
                300.0,
                OPTION_SIZE,
                TextColor::White,
                Some(MenuAction::PlayAgain),
            ),
            quit,
        ];

        Self { menu, game_over }
    }

    /// Labels shown in `phase` (none while playing)
    pub fn labels(&self, phase: GamePhase) -> &[Label] {
        match phase {
            GamePhase::Menu => &self.menu,
            GamePhase::GameOver => &self.game_over,
            GamePhase::Playing => &[],
        }
    }

    /// Action of the clickable label under `world`, if any
    pub fn hit(&self, phase: GamePhase, world: Vec2) -> Option<MenuAction> {
        self.labels(phase)
            .iter()
            .filter(|label| label.bounds().contains_point(world))
            .find_map(|label| label.action)
    }

    /// Centre of the label carrying `action` in `phase`
    pub fn center_of(&self, phase: GamePhase, action: MenuAction) -> Option<Vec2> {
        self.labels(phase)
            .iter()
            .find(|label| label.action == Some(action))
            .map(|label| label.bounds().center())
    }
}
