mod area;
mod config;
mod display;
mod food;
mod game;
mod score;
mod snake;
mod term;

use anyhow::{Context, Result};
use log::info;

use crate::area::PlayArea;
use crate::display::Canvas;
use crate::food::RandomFoodSpawner;
use crate::game::SnakeGame;
use crate::score::HighScoreStore;
use crate::term::TermManager;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let mut term = TermManager::new(config::CELL_SIZE)?;
    term.setup()?;

    let result = play(&mut term);

    // Get the terminal back before anything is printed about an error
    term.restore()?;
    result
}

fn play(term: &mut TermManager) -> Result<()> {
    let (width, height) = term.size();
    let area = PlayArea::from_window(width, height, config::BORDER_INSET, config::CELL_SIZE)
        .context("terminal is too small to play in")?;

    let store = HighScoreStore::new(config::asset_path(config::HIGH_SCORE_FILE));
    info!("high score file at {}", store.path().display());

    let mut game = SnakeGame::new(area, store, RandomFoodSpawner::new());
    game.run(term)
}
