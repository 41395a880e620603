//! Fixed-step ray marching over the maze grid.
use crate::core::maze::{Cell, Grid};
use crate::core::player::Player;

/// Distance reported when the ray starts inside a solid cell.
pub const MIN_DISTANCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySample {
    pub distance: f32,
    /// `Wall` or `Exit`; leaving the grid counts as `Wall`.
    pub impact: Cell,
    pub hit_x: f32,
    pub hit_y: f32,
}

/// Marches from `(px, py)` along `a` in increments of `step` until it samples a
/// wall, an exit or leaves the grid.
pub fn cast_ray(grid: &Grid, px: f32, py: f32, a: f32, step: f32) -> RaySample {
    let (sin, cos) = a.sin_cos();
    // Longest in-grid path plus one sample; keeps marching finite for any start.
    let max_steps = (grid.size() as f32 * std::f32::consts::SQRT_2 / step).ceil() as u32 + 1;

    let mut d = 0.0;
    let mut impact = Cell::Wall;
    for i in 0..=max_steps {
        d = i as f32 * step;
        let x = px + cos * d;
        let y = py + sin * d;
        match grid.cell_at(x, y) {
            None => break,
            Some(cell) if cell.is_hit() => {
                impact = cell;
                break;
            }
            Some(_) => {}
        }
    }

    if d == 0.0 {
        d = MIN_DISTANCE;
    }
    RaySample {
        distance: d,
        impact,
        hit_x: px + cos * d,
        hit_y: py + sin * d,
    }
}

/// Angle of screen column `column` out of `columns`, spread over the field of view.
#[inline]
pub fn ray_angle(view: f32, fov: f32, column: u32, columns: u32) -> f32 {
    view - fov * 0.5 + fov * (column as f32 / columns as f32)
}

/// One sample per screen column, left to right.
pub fn cast_columns(grid: &Grid, player: &Player, columns: u32, step: f32) -> Vec<(f32, RaySample)> {
    (0..columns)
        .map(|i| {
            let a = ray_angle(player.a, player.fov, i, columns);
            (a, cast_ray(grid, player.pos.x, player.pos.y, a, step))
        })
        .collect()
}
