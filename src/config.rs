use std::env;
use std::path::{Path, PathBuf};

use crate::area::Position;
use crate::display::Rgb;

/// Size of one grid cell in pixels. The terminal backend maps one cell to
/// one character.
pub const CELL_SIZE: i32 = 10;
pub const BORDER_INSET: i32 = 2 * CELL_SIZE;
pub const BORDER_STROKE: i32 = 5;
pub const TICKS_PER_SECOND: u32 = 15;
pub const LINE_SPACING: i32 = 5;
pub const SCORE_POSITION: Position = Position::new(BORDER_INSET, 0);

pub const BACKGROUND: Rgb = Rgb(184, 213, 68);
pub const FOREGROUND: Rgb = Rgb(0, 0, 0);

pub const WINDOW_TITLE: &str = "Snake";
pub const ASSET_DIR: &str = "assets";
pub const HIGH_SCORE_FILE: &str = "high_score.json";

/// `<dir of the running executable>/assets/<name>`, or `./assets/<name>` if
/// the executable can't be located.
pub fn asset_path(name: &str) -> PathBuf {
    let base = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(ASSET_DIR).join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_live_next_to_the_executable() {
        let path = asset_path(HIGH_SCORE_FILE);
        assert!(path.ends_with("assets/high_score.json"));

        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert!(path.starts_with(exe_dir));
    }

    #[test]
    fn inset_and_score_stay_on_the_grid() {
        assert_eq!(BORDER_INSET % CELL_SIZE, 0);
        assert_eq!(SCORE_POSITION.x % CELL_SIZE, 0);
    }
}
