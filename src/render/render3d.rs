//! First-person view: one shaded wall slice per framebuffer column, with
//! sprites painted over exit slices on levels that use them.
use rand::Rng;
use raylib::prelude::*;

use crate::core::config::{ExitStyle, GameConfig, LevelConfig, Rgb, SpriteKey};
use crate::core::maze::{Cell, Grid};
use crate::core::player::Player;
use crate::render::casters::{RaySample, cast_columns};
use crate::render::framebuffer::Framebuffer;
use crate::render::shading::{self, Slice};
use crate::render::textures::TextureManager;

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::new(r, g, b, 255)
    }
}

/// Draws the maze as seen by `player`. Returns how many columns were drawn;
/// columns lost in fog stay background.
pub fn render_3d<R: Rng + ?Sized>(
    fb: &mut Framebuffer,
    grid: &Grid,
    player: &Player,
    config: &GameConfig,
    level: &LevelConfig,
    texman: &TextureManager,
    rng: &mut R,
) -> u32 {
    fb.clear();
    let mut drawn = 0;
    for (i, (ray_a, sample)) in cast_columns(grid, player, fb.width, config.ray_step).into_iter().enumerate() {
        if !shading::visible(sample.distance, level.fog_distance) {
            continue;
        }
        let corrected = shading::corrected_distance(sample.distance, ray_a, player.a);
        let slice = shading::project(corrected, fb.height);
        let color = shading::column_color(&sample, level, config, rng);
        let x = i as u32;
        fb.draw_vline(x, slice.top, slice.bottom, color.into());

        if let (Cell::Exit, ExitStyle::Sprite(key)) = (sample.impact, level.exit) {
            draw_sprite_column(fb, texman, key, x, slice, &sample);
        }
        drawn += 1;
    }
    drawn
}

/// Paints one column of `key`, scaled so its natural height fills the slice.
fn draw_sprite_column(
    fb: &mut Framebuffer,
    texman: &TextureManager,
    key: SpriteKey,
    x: u32,
    slice: Slice,
    sample: &RaySample,
) {
    let (tw, th) = texman.image_size(key);
    let scale = shading::sprite_scale(slice.height, th);
    if scale <= 0.0 {
        return;
    }
    // U from whichever cell edge the hit point is closer to.
    let fx = sample.hit_x.fract().abs();
    let fy = sample.hit_y.fract().abs();
    let u = if fx.min(1.0 - fx) < fy.min(1.0 - fy) { fy } else { fx };
    let tx = (u * tw as f32).clamp(0.0, tw as f32 - 1.0) as u32;

    let y0 = slice.top.max(0);
    let y1 = slice.bottom.min(fb.height as i32 - 1);
    for y in y0..=y1 {
        let ty = ((y - slice.top) as f32 / scale) as u32;
        let color = texman.get_pixel_color(key, tx, ty.min(th - 1));
        if color.a < 8 {
            continue;
        }
        fb.set_pixel_color(x, y as u32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_room(size: usize) -> Grid {
        let mut rows = Vec::new();
        for y in 0..size {
            let row: String = (0..size)
                .map(|x| if x == 0 || y == 0 || x == size - 1 || y == size - 1 { '#' } else { ' ' })
                .collect();
            rows.push(row);
        }
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        Grid::from_rows(&refs)
    }

    #[test]
    fn every_column_drawn_without_fog() {
        let cfg = GameConfig::dream();
        let grid = open_room(9);
        let player = Player::spawn(cfg.fov());
        let mut fb = Framebuffer::new(64, 40);
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let drawn = render_3d(&mut fb, &grid, &player, &cfg, cfg.level(1), &TextureManager::procedural(), &mut rng);
        assert_eq!(drawn, 64);
        // Horizon row is covered in every column.
        assert!((0..64).all(|x| fb.get_pixel(x, 20) != fb.background_color));
    }

    #[test]
    fn fog_hides_distant_walls() {
        let mut cfg = GameConfig::backrooms();
        cfg.levels[0].fog_distance = Some(0.9);
        let grid = open_room(15);
        let player = Player::spawn(cfg.fov());
        let mut fb = Framebuffer::new(32, 20);
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let drawn = render_3d(&mut fb, &grid, &player, &cfg, cfg.level(1), &TextureManager::procedural(), &mut rng);
        assert_eq!(drawn, 0);
        assert!(fb.color_buffer.iter().all(|&c| c == fb.background_color));
    }

    #[test]
    fn solid_exit_paints_its_color() {
        let cfg = GameConfig::backrooms();
        let grid = Grid::from_rows(&[
            "#####", //
            "#  E#", //
            "#####", //
            "#####", //
            "#####",
        ]);
        let player = Player::spawn(cfg.fov());
        let mut fb = Framebuffer::new(33, 20);
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        render_3d(&mut fb, &grid, &player, &cfg, cfg.level(1), &TextureManager::procedural(), &mut rng);
        assert_eq!(fb.get_pixel(16, 10), Color::new(0, 255, 0, 255));
    }
}
