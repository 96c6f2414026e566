use anyhow::Result;

use crate::area::{PlayArea, Position, Rect};
use crate::config::{BACKGROUND, BORDER_STROKE, FOREGROUND, LINE_SPACING, SCORE_POSITION};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Q,
    C,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    QuitRequested,
    KeyDown(Key),
}

/// Something the game can draw a frame on. All coordinates are in pixels.
/// Drawing calls only build up the frame; nothing shows until `present`.
pub trait Canvas {
    /// Window size in pixels.
    fn size(&self) -> (i32, i32);

    fn clear(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Outline of `rect`, `width` pixels thick, drawn on its inside.
    fn stroke_rect(&mut self, rect: Rect, width: i32, color: Rgb) {
        let w = width.min(rect.width).min(rect.height);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, w), color);
        self.fill_rect(Rect::new(rect.x, rect.y + rect.height - w, rect.width, w), color);
        self.fill_rect(Rect::new(rect.x, rect.y, w, rect.height), color);
        self.fill_rect(Rect::new(rect.x + rect.width - w, rect.y, w, rect.height), color);
    }

    fn draw_text(&mut self, text: &str, at: Position, color: Rgb);

    /// Width and height `text` would take up, in pixels.
    fn text_size(&self, text: &str) -> (i32, i32);

    fn present(&mut self) -> Result<()>;
}

pub trait Input {
    /// Every event that arrived since the last call. Never blocks.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

pub fn draw_play_area<C: Canvas + ?Sized>(canvas: &mut C, area: &PlayArea) {
    canvas.fill_rect(area.bounds(), BACKGROUND);
    canvas.stroke_rect(area.bounds(), BORDER_STROKE, FOREGROUND);
}

pub fn draw_cell<C: Canvas + ?Sized>(canvas: &mut C, pos: Position, cell: i32) {
    canvas.fill_rect(Rect::new(pos.x, pos.y, cell, cell), FOREGROUND);
}

pub fn draw_score<C: Canvas + ?Sized>(canvas: &mut C, score: u32) {
    canvas.draw_text(&format!("{:04}", score), SCORE_POSITION, FOREGROUND);
}

/// Stacks `lines` in the middle of the window, each one centered horizontally.
pub fn draw_centered_lines<C: Canvas + ?Sized, S: AsRef<str>>(canvas: &mut C, lines: &[S]) {
    let (width, height) = canvas.size();
    let sizes: Vec<(i32, i32)> = lines.iter().map(|line| canvas.text_size(line.as_ref())).collect();

    let total_height = sizes.iter().map(|(_, h)| h).sum::<i32>()
        + LINE_SPACING * (lines.len() as i32 - 1).max(0);
    let mut y = height / 2 - total_height / 2;

    for (line, (w, h)) in lines.iter().zip(sizes) {
        canvas.draw_text(line.as_ref(), Position::new((width - w) / 2, y), FOREGROUND);
        y += h + LINE_SPACING;
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Pretends every character is `glyph` pixels square.
    pub const GLYPH: i32 = 10;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Command {
        Clear(Rgb),
        Fill(Rect, Rgb),
        Stroke(Rect, i32, Rgb),
        Text(String, Position),
        Present,
    }

    /// A canvas that just writes down what it was asked to draw.
    pub struct Recorder {
        pub width: i32,
        pub height: i32,
        pub commands: Vec<Command>,
    }

    impl Recorder {
        pub fn new(width: i32, height: i32) -> Self {
            Recorder { width, height, commands: vec![] }
        }

        pub fn texts(&self) -> Vec<&str> {
            self.commands
                .iter()
                .filter_map(|c| match c {
                    Command::Text(s, _) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn filled(&self) -> Vec<Rect> {
            self.commands
                .iter()
                .filter_map(|c| match c {
                    Command::Fill(rect, _) => Some(*rect),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for Recorder {
        fn size(&self) -> (i32, i32) {
            (self.width, self.height)
        }

        fn clear(&mut self, color: Rgb) {
            self.commands.push(Command::Clear(color));
        }

        fn fill_rect(&mut self, rect: Rect, color: Rgb) {
            self.commands.push(Command::Fill(rect, color));
        }

        fn stroke_rect(&mut self, rect: Rect, width: i32, color: Rgb) {
            self.commands.push(Command::Stroke(rect, width, color));
        }

        fn draw_text(&mut self, text: &str, at: Position, _color: Rgb) {
            self.commands.push(Command::Text(text.to_owned(), at));
        }

        fn text_size(&self, text: &str) -> (i32, i32) {
            (text.chars().count() as i32 * GLYPH, GLYPH)
        }

        fn present(&mut self) -> Result<()> {
            self.commands.push(Command::Present);
            Ok(())
        }
    }
}
