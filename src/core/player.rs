//! Observer pose and collision-checked movement.
use raylib::prelude::*;

use crate::core::maze::{Cell, Grid};
use crate::core::process_events::Input;

pub const SPAWN: (f32, f32, f32) = (1.5, 1.5, 0.0);

pub struct Player {
    pub pos: Vector2,
    pub a: f32,          // heading (radians)
    pub fov: f32,
    pub speed: f32,      // grid units per frame
    pub turn_speed: f32, // radians per frame
}

/// Walls and anything outside the grid block movement; exits do not.
fn cell_solid(grid: &Grid, wx: f32, wy: f32) -> bool {
    !matches!(grid.cell_at(wx, wy), Some(Cell::Open | Cell::Exit))
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32, fov: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            a: angle,
            fov,
            speed: 0.1,
            turn_speed: 0.05,
        }
    }

    pub fn spawn(fov: f32) -> Self {
        let (x, y, a) = SPAWN;
        Self::new(x, y, a, fov)
    }

    pub fn reset(&mut self) {
        let (x, y, a) = SPAWN;
        self.pos = Vector2::new(x, y);
        self.a = a;
    }

    /// Applies one frame of input. A move into a solid cell is dropped whole.
    pub fn update(&mut self, input: &Input, grid: &Grid) {
        if input.forward {
            self.try_move(grid, self.speed);
        }
        if input.backward {
            self.try_move(grid, -self.speed);
        }
        if input.turn_left {
            self.a -= self.turn_speed;
        }
        if input.turn_right {
            self.a += self.turn_speed;
        }
    }

    fn try_move(&mut self, grid: &Grid, dist: f32) {
        let nx = self.pos.x + self.a.cos() * dist;
        let ny = self.pos.y + self.a.sin() * dist;
        if !cell_solid(grid, nx, ny) {
            self.pos = Vector2::new(nx, ny);
        }
    }

    /// Grid cell the observer stands in.
    pub fn cell(&self, grid: &Grid) -> Option<Cell> {
        grid.cell_at(self.pos.x, self.pos.y)
    }
}
