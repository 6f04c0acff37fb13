//! Scripted backend with no real output
//!
//! Events are queued up front, held keys are set directly, and every draw
//! call is recorded so a frame can be inspected after the fact.

use std::collections::{HashSet, VecDeque};
use std::io;

use glam::Vec2;

use super::{InputEvent, Key, Presentation, SpriteKind, TextColor};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Sprite(SpriteKind, Vec2),
    Text(String, Vec2),
}

#[derive(Debug, Default)]
pub struct Headless {
    events: VecDeque<InputEvent>,
    held: HashSet<Key>,
    /// Draw calls of the frame in progress
    pending: Vec<DrawCall>,
    /// Draw calls of the last presented frame
    pub frame: Vec<DrawCall>,
    pub frames_presented: u64,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Queue a pointer press at a world position (raw == world here)
    pub fn click(&mut self, pos: Vec2) {
        self.push_event(InputEvent::PointerDown(pos));
    }

    pub fn hold(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Count sprites of `kind` in the last presented frame
    pub fn sprite_count(&self, kind: SpriteKind) -> usize {
        self.frame
            .iter()
            .filter(|call| matches!(call, DrawCall::Sprite(k, _) if *k == kind))
            .count()
    }

    /// Whether the last presented frame contains `text`
    pub fn has_text(&self, text: &str) -> bool {
        self.frame
            .iter()
            .any(|call| matches!(call, DrawCall::Text(t, _) if t == text))
    }
}

impl Presentation for Headless {
    fn draw_sprite(&mut self, kind: SpriteKind, pos: Vec2) -> io::Result<()> {
        self.pending.push(DrawCall::Sprite(kind, pos));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        pos: Vec2,
        _size: f32,
        _color: TextColor,
    ) -> io::Result<()> {
        self.pending.push(DrawCall::Text(text.to_string(), pos));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        Ok(())
    }

    fn poll_input_event(&mut self) -> io::Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn translate_pointer_to_world(&self, raw: Vec2) -> Vec2 {
        raw
    }
}
