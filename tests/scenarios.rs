use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dream_maze::core::config::GameConfig;
use dream_maze::core::maze::{self, Cell, Grid};
use dream_maze::core::process_events::Input;
use dream_maze::core::session::{GameState, Session, SessionEvent};
use dream_maze::render::casters::cast_ray;

#[test]
fn size_31_level_1_exit_is_farthest_open_cell() {
    let cfg = GameConfig::dream();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut grid = maze::generate(cfg.level(1), 31, &mut rng);

    let mut expected = None;
    let mut best = -1.0f64;
    for (x, y, cell) in grid.iter() {
        if cell == Cell::Open {
            let d = ((x as f64 - 1.0).powi(2) + (y as f64 - 1.0).powi(2)).sqrt();
            if d > best {
                best = d;
                expected = Some((x, y));
            }
        }
    }

    assert_eq!(Some(maze::place_exit(&mut grid, 1, 1)), expected);
    assert_eq!(grid.count(Cell::Exit), 1);
}

#[test]
fn corridor_ahead_of_spawn() {
    // Open cells x=1..=7 on row 1; everything else is wall.
    let mut grid = Grid::filled(11, Cell::Wall);
    for x in 1..=7 {
        grid.set(x, 1, Cell::Open);
    }
    let s = cast_ray(&grid, 1.5, 1.5, 0.0, 0.05);
    assert_eq!(s.impact, Cell::Wall);
    // Face of the wall at x=8 is 6.5 ahead.
    assert!((s.distance - 6.5).abs() <= 0.05 + 1e-4, "distance {}", s.distance);

    grid.set(8, 1, Cell::Exit);
    let s = cast_ray(&grid, 1.5, 1.5, 0.0, 0.05);
    assert_eq!(s.impact, Cell::Exit);
}

#[test]
fn walking_a_level_to_its_exit() {
    let mut s = Session::new(GameConfig::backrooms(), ChaCha8Rng::seed_from_u64(77));
    let (ex, ey) = s.exit();
    // Drop the observer next to the exit, facing it.
    let (sx, sy) = [(ex as isize - 1, ey as isize), (ex as isize + 1, ey as isize), (ex as isize, ey as isize - 1), (ex as isize, ey as isize + 1)]
        .into_iter()
        .find(|&(x, y)| s.grid().get(x as usize, y as usize) == Cell::Open)
        .expect("exit has an open neighbor");
    s.player.pos.x = sx as f32 + 0.5;
    s.player.pos.y = sy as f32 + 0.5;
    s.player.a = (ey as f32 - sy as f32).atan2(ex as f32 - sx as f32);

    let forward = Input { forward: true, ..Input::default() };
    let mut event = None;
    for _ in 0..20 {
        event = s.update(&forward);
        if event.is_some() {
            break;
        }
    }
    assert_eq!(event, Some(SessionEvent::LevelUp { level: 2, size: 41 }));
}

#[test]
fn level_four_exit_finishes_and_freezes_until_restart() {
    let mut s = Session::new(GameConfig::dream(), ChaCha8Rng::seed_from_u64(5));
    let jump_to_exit = |s: &mut Session<ChaCha8Rng>| {
        let (ex, ey) = s.exit();
        s.player.pos.x = ex as f32 + 0.5;
        s.player.pos.y = ey as f32 + 0.5;
    };
    let idle = Input::default();

    for expected in 2..=4 {
        jump_to_exit(&mut s);
        assert!(matches!(s.update(&idle), Some(SessionEvent::LevelUp { level, .. }) if level == expected));
    }
    assert_eq!(s.size(), 67);

    jump_to_exit(&mut s);
    assert_eq!(s.update(&idle), Some(SessionEvent::Finished));
    assert_eq!(s.state(), GameState::Finished);

    let pose = (s.player.pos.x, s.player.pos.y, s.player.a);
    let moves = Input { forward: true, backward: false, turn_left: false, turn_right: true, restart: false };
    for _ in 0..30 {
        assert_eq!(s.update(&moves), None);
    }
    assert_eq!((s.player.pos.x, s.player.pos.y, s.player.a), pose);
    assert_eq!(s.state(), GameState::Finished);

    assert_eq!(s.update(&Input { restart: true, ..idle }), Some(SessionEvent::Restarted));
    assert_eq!(s.state(), GameState::Playing(1));
    assert_eq!(s.size(), 31);
}
