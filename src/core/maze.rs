//! Maze generation (depth-first carve + chaos loops) and exit placement.
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::config::LevelConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Open,
    Wall,
    Exit,
}

impl Cell {
    /// Cells a ray stops at.
    #[inline]
    pub fn is_hit(self) -> bool {
        matches!(self, Cell::Wall | Cell::Exit)
    }
}

/// Square occupancy grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn filled(size: usize, cell: Cell) -> Self {
        Self { size, cells: vec![cell; size * size] }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.size + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.size + x] = cell;
    }

    /// Cell under a world point; `None` outside the grid.
    #[inline]
    pub fn cell_at(&self, wx: f32, wy: f32) -> Option<Cell> {
        let (i, j) = (wx.floor(), wy.floor());
        if i < 0.0 || j < 0.0 || i >= self.size as f32 || j >= self.size as f32 {
            return None;
        }
        Some(self.get(i as usize, j as usize))
    }

    #[inline]
    fn is_interior(&self, x: isize, y: isize) -> bool {
        let limit = self.size as isize - 1;
        x > 0 && x < limit && y > 0 && y < limit
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterates `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (i % self.size, i / self.size, c))
    }

    /// Builds a grid from text rows: `#` wall, `E` exit, anything else open.
    /// Rows must form a square.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut grid = Self::filled(size, Cell::Wall);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), size, "row {y} is not {size} cells wide");
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    'E' => Cell::Exit,
                    _ => Cell::Open,
                };
                grid.set(x, y, cell);
            }
        }
        grid
    }
}

const STEPS: [(isize, isize); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];
const NEIGHBORS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Carves a perfect maze from `(1,1)` then opens extra walls per `level`.
///
/// `size` must be odd and at least 3. The result has no exit yet; see
/// [`place_exit`].
pub fn generate<R: Rng + ?Sized>(level: &LevelConfig, size: usize, rng: &mut R) -> Grid {
    assert!(size >= 3 && size % 2 == 1, "maze size must be odd and >= 3, got {size}");

    let mut grid = Grid::filled(size, Cell::Wall);
    carve(&mut grid, rng);
    let opened = inject_chaos(
        &mut grid,
        level.chaos_ratio,
        level.min_open_neighbors,
        level.neighbor_step as isize,
        rng,
    );
    debug!("maze {size}x{size}: chaos opened {opened} walls");
    grid
}

fn carve<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut dirs = STEPS;
    let mut stack = vec![(1isize, 1isize)];
    grid.set(1, 1, Cell::Open);

    while let Some((cx, cy)) = stack.pop() {
        dirs.shuffle(rng);
        for (dx, dy) in dirs {
            let (nx, ny) = (cx + dx, cy + dy);
            if grid.is_interior(nx, ny) && grid.get(nx as usize, ny as usize) == Cell::Wall {
                grid.set(nx as usize, ny as usize, Cell::Open);
                grid.set((cx + dx / 2) as usize, (cy + dy / 2) as usize, Cell::Open);
                stack.push((nx, ny));
            }
        }
    }
}

/// Returns how many walls were knocked out. Neighbors are counted `reach`
/// cells away along each axis.
fn inject_chaos<R: Rng + ?Sized>(
    grid: &mut Grid,
    ratio: f64,
    min_open_neighbors: u8,
    reach: isize,
    rng: &mut R,
) -> usize {
    let size = grid.size();
    let trials = ((size * size) as f64 * ratio) as usize;
    let mut opened = 0;
    for _ in 0..trials {
        let x = rng.gen_range(1..size - 1);
        let y = rng.gen_range(1..size - 1);
        if grid.get(x, y) != Cell::Wall {
            continue;
        }
        let open = NEIGHBORS
            .iter()
            .filter(|(dx, dy)| {
                let (nx, ny) = (x as isize + dx * reach, y as isize + dy * reach);
                grid.is_interior(nx, ny) && grid.get(nx as usize, ny as usize) == Cell::Open
            })
            .count();
        if open >= min_open_neighbors as usize {
            grid.set(x, y, Cell::Open);
            opened += 1;
        }
    }
    opened
}

/// Marks the open interior cell farthest from `(ox, oy)` as the exit.
///
/// Ties go to the first cell in row-major scan order. Returns the exit cell.
pub fn place_exit(grid: &mut Grid, ox: usize, oy: usize) -> (usize, usize) {
    let size = grid.size();
    let mut best: Option<(usize, usize, f64)> = None;
    for y in 1..size - 1 {
        for x in 1..size - 1 {
            if grid.get(x, y) != Cell::Open {
                continue;
            }
            let d = (x as f64 - ox as f64).hypot(y as f64 - oy as f64);
            if best.map_or(true, |b| d > b.2) {
                best = Some((x, y, d));
            }
        }
    }
    let (ex, ey, _) = best.expect("maze has no open interior cell");
    grid.set(ex, ey, Cell::Exit);
    (ex, ey)
}

/// Grows the maze side by `step`, rounding up to the next odd value.
pub fn next_size(size: usize, step: usize) -> usize {
    let next = size + step.max(1);
    if next % 2 == 0 { next + 1 } else { next }
}
