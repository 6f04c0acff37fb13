//! Platform abstraction layer
//!
//! The simulation never talks to a window or terminal directly. Everything it
//! needs from the outside world goes through [`Presentation`]:
//! - Sprite and text drawing
//! - Input events and held-key queries
//! - Pointer coordinate translation

pub mod headless;
pub mod terminal;

use std::io;

use glam::Vec2;

pub use headless::Headless;
pub use terminal::Terminal;

/// Drawable sprite kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    Ship,
    Mushroom,
    Bullet,
    CentipedeHead,
    CentipedeBody,
}

/// Text colours used by labels and the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    White,
    Green,
    Red,
    Yellow,
}

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

/// Input reported by the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed or quit requested
    Close,
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer press in raw platform coordinates
    PointerDown(Vec2),
}

/// Rendering and input backend
pub trait Presentation {
    fn draw_sprite(&mut self, kind: SpriteKind, pos: Vec2) -> io::Result<()>;

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: TextColor) -> io::Result<()>;

    /// Finish the current draw pass
    fn present(&mut self) -> io::Result<()>;

    /// Next pending event, or `None` when the queue is drained
    fn poll_input_event(&mut self) -> io::Result<Option<InputEvent>>;

    fn is_key_held(&self, key: Key) -> bool;

    /// Map a raw pointer position into world pixels
    fn translate_pointer_to_world(&self, raw: Vec2) -> Vec2;
}
