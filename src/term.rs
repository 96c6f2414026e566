use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};

use crate::area::{Position, Rect};
use crate::config::{BACKGROUND, FOREGROUND, WINDOW_TITLE};
use crate::display::{Canvas, Input, InputEvent, Key, Rgb};

/// Draws on the terminal, one grid cell per character. Frames are built in
/// memory and written out in one go by `present`.
pub struct TermManager {
    cols: u16,
    rows: u16,
    cell: i32,
    stdout: Stdout,
    frame: Vec<Cell>,
}

#[derive(Copy, Clone, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

const BLANK: Cell = Cell { ch: ' ', fg: FOREGROUND, bg: BACKGROUND };

impl TermManager {
    pub fn new(cell: i32) -> Result<Self> {
        let (cols, rows) = terminal::size().context("could not read terminal size")?;
        let frame = vec![BLANK; cols as usize * rows as usize];
        Ok(TermManager { cols, rows, cell, stdout: stdout(), frame })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(
            self.stdout,
            EnterAlternateScreen,
            terminal::SetTitle(WINDOW_TITLE),
            cursor::Hide,
            cursor::DisableBlinking
        )
        .context("could not prepare the terminal")?;
        terminal::enable_raw_mode().context("could not enable raw mode")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("could not disable raw mode")?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::EnableBlinking,
            cursor::Show,
            LeaveAlternateScreen
        )
        .context("could not restore the terminal")?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Character cells covered by a pixel rectangle, clipped to the screen.
    fn cells_in(&self, rect: Rect) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let span = |start: i32, len: i32, limit: u16| {
            let first = start.div_euclid(self.cell).max(0);
            let end = (start + len + self.cell - 1).div_euclid(self.cell).min(limit as i32);
            first as usize..end.max(first) as usize
        };

        (span(rect.x, rect.width, self.cols), span(rect.y, rect.height, self.rows))
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> &mut Cell {
        &mut self.frame[row * self.cols as usize + col]
    }
}

impl Canvas for TermManager {
    fn size(&self) -> (i32, i32) {
        (self.cols as i32 * self.cell, self.rows as i32 * self.cell)
    }

    fn clear(&mut self, color: Rgb) {
        for cell in self.frame.iter_mut() {
            *cell = Cell { bg: color, ..BLANK };
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let (cols, rows) = self.cells_in(rect);
        for row in rows {
            for col in cols.clone() {
                *self.cell_mut(col, row) = Cell { bg: color, ..BLANK };
            }
        }
    }

    fn draw_text(&mut self, text: &str, at: Position, color: Rgb) {
        if at.y < 0 || at.y.div_euclid(self.cell) >= self.rows as i32 {
            return;
        }

        let row = at.y.div_euclid(self.cell) as usize;
        let start = at.x.div_euclid(self.cell);

        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i32;
            if col < 0 || col >= self.cols as i32 {
                continue;
            }

            let cell = self.cell_mut(col as usize, row);
            cell.ch = ch;
            cell.fg = color;
        }
    }

    fn text_size(&self, text: &str) -> (i32, i32) {
        (text.chars().count() as i32 * self.cell, self.cell)
    }

    fn present(&mut self) -> Result<()> {
        let mut colors = None;

        for row in 0..self.rows {
            queue!(self.stdout, cursor::MoveTo(0, row))?;

            let start = row as usize * self.cols as usize;
            for cell in &self.frame[start..start + self.cols as usize] {
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.stdout,
                        style::SetForegroundColor(to_color(cell.fg)),
                        style::SetBackgroundColor(to_color(cell.bg))
                    )?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(self.stdout, style::Print(cell.ch))?;
            }
        }

        self.stdout.flush().context("could not flush the frame")?;
        Ok(())
    }
}

impl Input for TermManager {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.extend(translate_key(&ev));
            }
        }

        Ok(events)
    }
}

fn translate_key(ev: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(ev) {
        return Some(InputEvent::QuitRequested);
    }

    let key = match ev.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Char('q') | KeyCode::Char('Q') => Key::Q,
        KeyCode::Char('c') | KeyCode::Char('C') => Key::C,
        _ => return None,
    };

    Some(InputEvent::KeyDown(key))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

fn to_color(Rgb(r, g, b): Rgb) -> style::Color {
    style::Color::Rgb { r, g, b }
}
