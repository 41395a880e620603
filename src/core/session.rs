//! Level progression: owns the maze, the observer and the level counter.
//!
//! States are `Playing(level)` for levels 1 to 4 and `Finished`. Reaching the
//! exit advances a level (bigger maze, fresh layout, spawn pose) or, on the
//! last level, finishes the run. A restart from `Finished` starts over at
//! level 1.
use log::{info, trace};
use rand::Rng;

use crate::core::config::{GameConfig, LEVEL_COUNT, LevelConfig};
use crate::core::maze::{self, Cell, Grid};
use crate::core::player::Player;
use crate::core::process_events::Input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing(u32),
    Finished,
}

/// What an update changed, for the caller to react to (logs, sounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LevelUp { level: u32, size: usize },
    Finished,
    Restarted,
}

pub struct Session<R: Rng> {
    config: GameConfig,
    rng: R,
    grid: Grid,
    exit: (usize, usize),
    size: usize,
    level: u32,
    finished: bool,
    pub player: Player,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let size = config.initial_size;
        let (grid, exit) = build_level(config.level(1), size, &mut rng);
        let player = Player::spawn(config.fov());
        info!("level 1: {size}x{size} maze, exit at {exit:?}");
        Self {
            config,
            rng,
            grid,
            exit,
            size,
            level: 1,
            finished: false,
            player,
        }
    }

    pub fn state(&self) -> GameState {
        if self.finished { GameState::Finished } else { GameState::Playing(self.level) }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn exit(&self) -> (usize, usize) {
        self.exit
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level_config(&self) -> &LevelConfig {
        self.config.level(self.level)
    }

    /// Runs one frame of game logic.
    pub fn update(&mut self, input: &Input) -> Option<SessionEvent> {
        if self.finished {
            if input.restart {
                self.restart();
                return Some(SessionEvent::Restarted);
            }
            if input.any_motion() {
                trace!("movement ignored: run finished");
            }
            return None;
        }

        self.player.update(input, &self.grid);

        if self.player.cell(&self.grid) != Some(Cell::Exit) {
            return None;
        }
        if self.level >= LEVEL_COUNT {
            self.finished = true;
            info!("exit of level {} reached: run finished", self.level);
            return Some(SessionEvent::Finished);
        }
        self.level += 1;
        self.size = maze::next_size(self.size, self.config.size_step);
        self.regenerate();
        Some(SessionEvent::LevelUp { level: self.level, size: self.size })
    }

    fn restart(&mut self) {
        self.level = 1;
        self.size = self.config.initial_size;
        self.finished = false;
        self.regenerate();
    }

    /// The new grid is complete before it replaces the old one.
    fn regenerate(&mut self) {
        let (grid, exit) = build_level(self.config.level(self.level), self.size, &mut self.rng);
        self.grid = grid;
        self.exit = exit;
        self.player.reset();
        info!(
            "level {}: {}x{} maze, exit at {:?}",
            self.level, self.size, self.size, self.exit
        );
    }
}

fn build_level<R: Rng + ?Sized>(level: &LevelConfig, size: usize, rng: &mut R) -> (Grid, (usize, usize)) {
    let mut grid = maze::generate(level, size, rng);
    let exit = maze::place_exit(&mut grid, 1, 1);
    (grid, exit)
}
