use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::Result;
use log::{debug, info};

use crate::area::{PlayArea, Position};
use crate::config::{BACKGROUND, TICKS_PER_SECOND};
use crate::display::{self, Canvas, Input, InputEvent, Key};
use crate::food::FoodSpawner;
use crate::score::HighScoreStore;
use crate::snake::{Direction, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Over,
    Exited,
}

/// Everything that starts over when the player presses C.
struct Session {
    snake: Snake,
    direction: Option<Direction>,
    food: Position,
    high_score: u32,
    starting_high_score: u32,
    state: State,
}

impl Session {
    fn start<F: FoodSpawner>(area: &PlayArea, store: &HighScoreStore, spawner: &mut F) -> Self {
        let high_score = store.load();

        Session {
            snake: Snake::new(area.center()),
            direction: None,
            food: spawner.spawn(area),
            high_score,
            starting_high_score: high_score,
            state: State::Running,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    pub high_score: u32,
    pub previous_high_score: u32,
}

impl GameOverSummary {
    pub fn is_new_high_score(&self) -> bool {
        self.score == self.high_score && self.high_score > self.previous_high_score
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "GAME OVER".to_owned(),
            format!("SCORE: {}", self.score),
            format!("HIGH SCORE: {}", self.high_score),
            "PRESS Q TO QUIT".to_owned(),
            "PRESS C TO PLAY AGAIN".to_owned(),
        ];

        if self.is_new_high_score() {
            lines.push("A NEW HIGH SCORE!".to_owned());
        }

        lines
    }
}

pub struct SnakeGame<F> {
    area: PlayArea,
    store: HighScoreStore,
    spawner: F,
    session: Session,
}

impl<F: FoodSpawner> SnakeGame<F> {
    pub fn new(area: PlayArea, store: HighScoreStore, mut spawner: F) -> Self {
        let session = Session::start(&area, &store, &mut spawner);
        info!("new game in {:?}, high score {}", area.bounds(), session.high_score);
        SnakeGame { area, store, spawner, session }
    }

    pub fn state(&self) -> State {
        self.session.state
    }

    pub fn score(&self) -> u32 {
        self.session.snake.len() as u32 - 1
    }

    pub fn summary(&self) -> GameOverSummary {
        GameOverSummary {
            score: self.score(),
            high_score: self.session.high_score,
            previous_high_score: self.session.starting_high_score,
        }
    }

    /// Polls, updates and draws at a fixed rate until the player quits.
    pub fn run<T: Canvas + Input>(&mut self, term: &mut T) -> Result<()> {
        let mut ticker = Ticker::new(TICKS_PER_SECOND);

        loop {
            let events = term.poll_events()?;
            self.tick(&events);

            if self.state() == State::Exited {
                break;
            }

            self.render(term);
            term.present()?;
            ticker.wait();
        }

        info!("exiting, high score {}", self.session.high_score);
        Ok(())
    }

    /// Applies one tick's worth of input and, while running, moves the snake.
    pub fn tick(&mut self, events: &[InputEvent]) {
        match self.session.state {
            State::Running => {
                for ev in events {
                    match ev {
                        InputEvent::QuitRequested => {
                            self.session.state = State::Exited;
                            return;
                        }
                        InputEvent::KeyDown(key) => {
                            if let Some(dir) = direction_for(*key) {
                                self.session.direction = Some(dir);
                            }
                        }
                    }
                }

                self.step();
            }
            State::Over => {
                for ev in events {
                    match ev {
                        InputEvent::QuitRequested | InputEvent::KeyDown(Key::Q) => {
                            self.session.state = State::Exited;
                            return;
                        }
                        InputEvent::KeyDown(Key::C) => {
                            self.restart();
                            return;
                        }
                        _ => {}
                    }
                }
            }
            State::Exited => {}
        }
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.clear(BACKGROUND);
        display::draw_play_area(canvas, &self.area);

        match self.session.state {
            State::Running => {
                let cell = self.area.cell();
                display::draw_cell(canvas, self.session.food, cell);
                for pos in self.session.snake.body() {
                    display::draw_cell(canvas, *pos, cell);
                }
            }
            State::Over | State::Exited => {
                let lines = self.summary().lines();
                display::draw_centered_lines(canvas, &lines[..]);
            }
        }

        display::draw_score(canvas, self.score());
    }

    ///////////////////////////////////////////////////////////////////////////

    fn step(&mut self) {
        let head = self.session.snake.head();
        let next = match self.session.direction {
            Some(dir) => dir.step(head, self.area.cell()),
            None => head,
        };

        if !self.area.contains(next) {
            debug!("hit the wall at {:?}", next);
            self.game_over();
            return;
        }

        let grow = next == self.session.food;
        self.session.snake.advance(next, grow);

        if grow {
            self.session.food = self.spawner.spawn(&self.area);
            debug_assert!(self.area.is_aligned(self.session.food));
            debug!("ate food at {:?}, score {}, next food at {:?}", next, self.score(), self.session.food);
        } else if self.session.snake.collides_with_self(next) {
            debug!("ran into itself at {:?}", next);
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.session.state = State::Over;

        let score = self.score();
        if score > self.session.high_score {
            info!("new high score {} (was {})", score, self.session.high_score);
            self.store.save(score);
            self.session.high_score = score;
        } else {
            info!("game over, score {}", score);
        }
    }

    fn restart(&mut self) {
        self.session = Session::start(&self.area, &self.store, &mut self.spawner);
        info!("restarted, high score {}", self.session.high_score);
    }
}

fn direction_for(key: Key) -> Option<Direction> {
    match key {
        Key::Left => Some(Direction::Left),
        Key::Right => Some(Direction::Right),
        Key::Up => Some(Direction::Up),
        Key::Down => Some(Direction::Down),
        Key::Q | Key::C => None,
    }
}

/// Fixed-rate pacing. Sleeps until the next deadline; a late tick restarts
/// the schedule from now instead of trying to catch up.
struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    fn new(per_second: u32) -> Self {
        let interval = Duration::from_secs(1) / per_second.max(1);
        Ticker { interval, next: Instant::now() + interval }
    }

    fn wait(&mut self) {
        let now = Instant::now();

        match self.next.checked_duration_since(now) {
            Some(remaining) => {
                sleep(remaining);
                self.next += self.interval;
            }
            None => self.next = now + self.interval,
        }
    }
}
