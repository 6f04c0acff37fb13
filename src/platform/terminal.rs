//! Terminal backend built on crossterm
//!
//! The 800x600 world is scaled onto the terminal grid and every sprite is a
//! single coloured glyph at the cell under its centre.
//!
//! Held keys: terminals with keyboard-enhancement support send proper
//! `Release` events, classic ones only send repeated `Press` events while a
//! key is down. A key therefore counts as held while its last press/repeat is
//! at most `HOLD_WINDOW` frames old, and is dropped at once on release.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use super::{InputEvent, Key, Presentation, SpriteKind, TextColor};
use crate::consts::*;
use crate::ui::text_extent;

/// Frames a key stays held after its last press/repeat (~130 ms)
const HOLD_WINDOW: u64 = 8;

/// Glyph, colour and world size per sprite
fn sprite_style(kind: SpriteKind) -> (char, Color, Vec2) {
    match kind {
        SpriteKind::Background => (' ', Color::Black, Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
        SpriteKind::Ship => ('A', Color::White, Vec2::new(SHIP_WIDTH, SHIP_HEIGHT)),
        SpriteKind::Mushroom => ('#', Color::Magenta, Vec2::splat(TILE_SIZE)),
        SpriteKind::Bullet => ('|', Color::Cyan, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT)),
        SpriteKind::CentipedeHead => ('@', Color::Red, Vec2::splat(TILE_SIZE)),
        SpriteKind::CentipedeBody => ('o', Color::Green, Vec2::splat(TILE_SIZE)),
    }
}

fn text_color(color: TextColor) -> Color {
    match color {
        TextColor::White => Color::White,
        TextColor::Green => Color::Green,
        TextColor::Red => Color::Red,
        TextColor::Yellow => Color::Yellow,
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

pub struct Terminal<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Key -> frame it was last pressed or repeated
    held: HashMap<Key, u64>,
    frame: u64,
    keyboard_enhanced: bool,
    /// Raw mode is on and must be undone on drop
    raw_mode: bool,
}

impl<W: Write> Terminal<W> {
    /// Switch the terminal into game mode; restored when dropped, including
    /// when a later setup step fails
    pub fn open(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut term = Self::with_size(out, 0, 0);
        term.raw_mode = true;
        term.enter_game_mode()?;
        Ok(term)
    }

    /// Wrap `out` without touching the real terminal
    fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            held: HashMap::new(),
            frame: 0,
            keyboard_enhanced: false,
            raw_mode: false,
        }
    }

    fn enter_game_mode(&mut self) -> io::Result<()> {
        self.out.execute(terminal::EnterAlternateScreen)?;
        self.out.execute(cursor::Hide)?;
        self.out.execute(EnableMouseCapture)?;

        self.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.keyboard_enhanced {
            self.out.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }

        let (cols, rows) = terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        log::info!(
            "Terminal {}x{} (keyboard enhancement: {})",
            cols,
            rows,
            self.keyboard_enhanced
        );
        Ok(())
    }

    /// First cell of `text` printed centred on its world box, so clicks on
    /// the glyphs land inside the box used for hit-testing
    fn text_origin(&self, text: &str, pos: Vec2, size: f32) -> (u16, u16) {
        let center = pos + text_extent(text, size) * 0.5;
        let (col, row) = self.world_to_cell(center);
        let half = (text.chars().count() / 2) as u16;
        (col.saturating_sub(half), row)
    }

    /// Terminal cell under a world position, clamped to the screen
    fn world_to_cell(&self, pos: Vec2) -> (u16, u16) {
        let col = (pos.x / WINDOW_WIDTH * self.cols as f32).floor();
        let row = (pos.y / WINDOW_HEIGHT * self.rows as f32).floor();
        (
            (col.max(0.0) as u16).min(self.cols.saturating_sub(1)),
            (row.max(0.0) as u16).min(self.rows.saturating_sub(1)),
        )
    }

    fn translate(&mut self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                let quit = matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
                    || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    return (kind == KeyEventKind::Press).then_some(InputEvent::Close);
                }

                let key = map_key(code)?;
                match kind {
                    KeyEventKind::Press => {
                        self.held.insert(key, self.frame);
                        Some(InputEvent::KeyDown(key))
                    }
                    KeyEventKind::Repeat => {
                        self.held.insert(key, self.frame);
                        None
                    }
                    KeyEventKind::Release => {
                        self.held.remove(&key);
                        Some(InputEvent::KeyUp(key))
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(InputEvent::PointerDown(Vec2::new(column as f32, row as f32))),
            Event::Resize(cols, rows) => {
                self.cols = cols;
                self.rows = rows;
                None
            }
            _ => None,
        }
    }
}

impl<W: Write> Presentation for Terminal<W> {
    fn draw_sprite(&mut self, kind: SpriteKind, pos: Vec2) -> io::Result<()> {
        if kind == SpriteKind::Background {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            return Ok(());
        }

        let (glyph, color, size) = sprite_style(kind);
        let center = pos + size * 0.5;
        // Body segments still queued off-screen are not drawn
        let on_screen = (0.0..WINDOW_WIDTH).contains(&center.x)
            && (0.0..WINDOW_HEIGHT).contains(&center.y);
        if !on_screen {
            return Ok(());
        }

        let (col, row) = self.world_to_cell(center);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(glyph))?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: TextColor) -> io::Result<()> {
        let (col, row) = self.text_origin(text, pos, size);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(text_color(color)))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        self.frame += 1;
        Ok(())
    }

    fn poll_input_event(&mut self) -> io::Result<Option<InputEvent>> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Some(input) = self.translate(event) {
                return Ok(Some(input));
            }
        }
        Ok(None)
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.held
            .get(&key)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    /// Raw coordinates are (column, row); map to the centre of that cell
    fn translate_pointer_to_world(&self, raw: Vec2) -> Vec2 {
        let cell = Vec2::new(
            WINDOW_WIDTH / self.cols.max(1) as f32,
            WINDOW_HEIGHT / self.rows.max(1) as f32,
        );
        (raw + Vec2::splat(0.5)) * cell
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        if !self.raw_mode {
            return;
        }
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(DisableMouseCapture);
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::ui::UiLayout;

    fn term() -> Terminal<Vec<u8>> {
        Terminal::with_size(Vec::new(), 80, 24)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn with_kind(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn left_click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys_close() {
        let mut t = term();
        assert_eq!(t.translate(press(KeyCode::Char('q'))), Some(InputEvent::Close));
        assert_eq!(t.translate(press(KeyCode::Char('Q'))), Some(InputEvent::Close));
        assert_eq!(t.translate(press(KeyCode::Esc)), Some(InputEvent::Close));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(t.translate(ctrl_c), Some(InputEvent::Close));
        // Plain 'c' is not bound
        assert_eq!(t.translate(press(KeyCode::Char('c'))), None);
        // Releasing q does not close a second time
        let release = with_kind(KeyCode::Char('q'), KeyEventKind::Release);
        assert_eq!(t.translate(release), None);
    }

    #[test]
    fn test_movement_and_fire_keys() {
        let mut t = term();
        for (code, key) in [
            (KeyCode::Left, Key::Left),
            (KeyCode::Char('a'), Key::Left),
            (KeyCode::Char('A'), Key::Left),
            (KeyCode::Right, Key::Right),
            (KeyCode::Char('d'), Key::Right),
            (KeyCode::Char('D'), Key::Right),
            (KeyCode::Char(' '), Key::Fire),
        ] {
            assert_eq!(t.translate(press(code)), Some(InputEvent::KeyDown(key)));
        }
        assert_eq!(t.translate(press(KeyCode::Up)), None);
    }

    #[test]
    fn test_key_held_within_window() {
        let mut t = term();
        t.translate(press(KeyCode::Left));
        assert!(t.is_key_held(Key::Left));
        assert!(!t.is_key_held(Key::Right));

        t.frame = HOLD_WINDOW;
        assert!(t.is_key_held(Key::Left));
        t.frame = HOLD_WINDOW + 1;
        assert!(!t.is_key_held(Key::Left));

        // A repeat refreshes the window without a new KeyDown
        let repeat = with_kind(KeyCode::Left, KeyEventKind::Repeat);
        assert_eq!(t.translate(repeat), None);
        assert!(t.is_key_held(Key::Left));
    }

    #[test]
    fn test_release_drops_key_at_once() {
        let mut t = term();
        t.translate(press(KeyCode::Right));
        let release = with_kind(KeyCode::Right, KeyEventKind::Release);
        assert_eq!(t.translate(release), Some(InputEvent::KeyUp(Key::Right)));
        assert!(!t.is_key_held(Key::Right));
    }

    #[test]
    fn test_present_advances_frame() {
        let mut t = term();
        t.present().unwrap();
        t.present().unwrap();
        assert_eq!(t.frame, 2);
        assert!(!t.out.is_empty());
    }

    #[test]
    fn test_click_and_resize() {
        let mut t = term();
        assert_eq!(
            t.translate(left_click(3, 4)),
            Some(InputEvent::PointerDown(Vec2::new(3.0, 4.0)))
        );
        assert_eq!(t.translate(Event::Resize(100, 50)), None);
        assert_eq!((t.cols, t.rows), (100, 50));
    }

    #[test]
    fn test_pointer_maps_to_cell_centre() {
        let t = term();
        // 80x24 cells over 800x600: 10 x 25 px per cell
        assert_eq!(t.translate_pointer_to_world(Vec2::ZERO), Vec2::new(5.0, 12.5));
        assert_eq!(
            t.translate_pointer_to_world(Vec2::new(79.0, 23.0)),
            Vec2::new(795.0, 587.5)
        );
    }

    #[test]
    fn test_world_to_cell_clamps() {
        let t = term();
        assert_eq!(t.world_to_cell(Vec2::ZERO), (0, 0));
        assert_eq!(t.world_to_cell(Vec2::new(400.0, 300.0)), (40, 12));
        assert_eq!(t.world_to_cell(Vec2::new(799.0, 599.0)), (79, 23));
        assert_eq!(t.world_to_cell(Vec2::new(-50.0, 900.0)), (0, 23));
    }

    #[test]
    fn test_off_screen_sprite_not_drawn() {
        let mut t = term();
        t.draw_sprite(SpriteKind::CentipedeBody, Vec2::new(-64.0, 0.0)).unwrap();
        assert!(t.out.is_empty());
        t.draw_sprite(SpriteKind::CentipedeBody, Vec2::new(64.0, 0.0)).unwrap();
        assert!(!t.out.is_empty());
    }

    #[test]
    fn test_drop_restores_only_after_raw_mode() {
        let mut buf = Vec::new();
        drop(Terminal::with_size(&mut buf, 80, 24));
        assert!(buf.is_empty());

        let mut t = Terminal::with_size(&mut buf, 80, 24);
        // State right after raw mode, before any other setup step
        t.raw_mode = true;
        drop(t);
        let written = String::from_utf8_lossy(&buf);
        assert!(written.contains("\x1b[?25h"), "cursor shown");
        assert!(written.contains("\x1b[?1049l"), "alternate screen left");
        // Flags were never pushed, so none are popped
        assert!(!written.contains("\x1b[<1u"));
    }

    #[test]
    fn test_clicking_printed_label_hits_it() {
        let ui = UiLayout::new();
        for (cols, rows) in [(80, 24), (120, 40), (200, 60)] {
            let t = Terminal::with_size(Vec::new(), cols, rows);
            for phase in [GamePhase::Menu, GamePhase::GameOver] {
                for label in ui.labels(phase) {
                    let Some(action) = label.action else {
                        continue;
                    };
                    let (col, row) = t.text_origin(label.text, label.pos, label.size);
                    for i in 0..label.text.chars().count() as u16 {
                        let raw = Vec2::new((col + i) as f32, row as f32);
                        let world = t.translate_pointer_to_world(raw);
                        assert_eq!(
                            ui.hit(phase, world),
                            Some(action),
                            "{} at {}x{}",
                            label.text,
                            cols,
                            rows
                        );
                    }
                }
            }
        }
    }
}
