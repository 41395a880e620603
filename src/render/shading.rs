//! Projection and color policy: what each column looks like, not how it is drawn.
use rand::Rng;

use crate::core::config::{ExitStyle, GameConfig, LevelConfig, Rgb, ShadeConfig, Tint};
use crate::core::maze::Cell;
use crate::render::casters::RaySample;

/// Vertical extent of a wall slice in screen rows, centered on the horizon.
/// Not clamped: near walls extend past the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub top: i32,
    pub bottom: i32,
    pub height: i32,
}

/// Removes fisheye by measuring along the view direction instead of the ray.
#[inline]
pub fn corrected_distance(distance: f32, ray_angle: f32, view_angle: f32) -> f32 {
    distance * (ray_angle - view_angle).cos()
}

pub fn project(corrected: f32, viewport_h: u32) -> Slice {
    let h = viewport_h as i32;
    let height = (viewport_h as f32 / corrected.max(f32::EPSILON)).min(i32::MAX as f32 / 2.0) as i32;
    Slice {
        top: h / 2 - height / 2,
        bottom: h / 2 + height / 2,
        height,
    }
}

/// Columns past the fog line are not drawn at all.
#[inline]
pub fn visible(distance: f32, fog_distance: Option<f32>) -> bool {
    fog_distance.map_or(true, |fog| distance <= fog)
}

/// Distance falloff, optionally faded to black by `fog_fade`.
pub fn shade(distance: f32, cfg: &ShadeConfig, fog_fade: Option<f32>) -> u8 {
    let base = (cfg.base / (1.0 + distance * cfg.attenuation)).clamp(0.0, 255.0) as u8;
    match fog_fade {
        Some(fade) => {
            let k = (1.0 - distance / fade).max(0.0);
            (base as f32 * k) as u8
        }
        None => base,
    }
}

pub fn tint<R: Rng + ?Sized>(shade: u8, tint: &Tint, rng: &mut R) -> Rgb {
    let flicker = if tint.flicker > 0 { rng.gen_range(0..tint.flicker) } else { 0 };
    let channel = |i: usize, extra: u8| {
        let v = shade as f32 * tint.mul[i] + tint.add[i] as f32 + extra as f32;
        v.clamp(0.0, 255.0) as u8
    };
    Rgb(channel(0, flicker), channel(1, 0), channel(2, 0))
}

/// Color of a column hit. Solid exits ignore distance; sprite exits get the
/// wall color underneath the sprite.
pub fn column_color<R: Rng + ?Sized>(
    sample: &RaySample,
    level: &LevelConfig,
    config: &GameConfig,
    rng: &mut R,
) -> Rgb {
    if let (Cell::Exit, ExitStyle::Solid(color)) = (sample.impact, level.exit) {
        return color;
    }
    let s = shade(sample.distance, &config.shade, config.fog_fade);
    tint(s, &level.tint, rng)
}

/// Scale that makes a sprite exactly as tall as the slice.
#[inline]
pub fn sprite_scale(slice_height: i32, natural_height: u32) -> f32 {
    slice_height as f32 / natural_height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SpriteKey;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample(distance: f32, impact: Cell) -> RaySample {
        RaySample { distance, impact, hit_x: 0.0, hit_y: 0.0 }
    }

    #[test]
    fn fisheye_correction_shrinks_side_rays() {
        assert_eq!(corrected_distance(4.0, 0.3, 0.3), 4.0);
        let side = corrected_distance(4.0, 0.8, 0.3);
        assert!((side - 4.0 * 0.5f32.cos()).abs() < 1e-6);
    }

    #[test]
    fn slice_is_centered_and_inverse_to_distance() {
        let near = project(2.0, 200);
        assert_eq!(near, Slice { top: 50, bottom: 150, height: 100 });
        let far = project(8.0, 200);
        assert_eq!(far.height, 25);
        assert_eq!(far.top, 100 - 12);
        assert_eq!(far.bottom, 100 + 12);
    }

    #[test]
    fn shade_falls_off_with_distance() {
        let cfg = ShadeConfig::default();
        assert_eq!(shade(0.0, &cfg, None), 200);
        assert_eq!(shade(10.0, &cfg, None), 100);
        assert!(shade(3.0, &cfg, None) > shade(6.0, &cfg, None));
    }

    #[test]
    fn fog_fade_reaches_black() {
        let cfg = ShadeConfig::default();
        assert_eq!(shade(10.0, &cfg, Some(20.0)), 50);
        assert_eq!(shade(25.0, &cfg, Some(20.0)), 0);
    }

    #[test]
    fn fog_cutoff() {
        assert!(visible(16.9, Some(17.0)));
        assert!(!visible(17.1, Some(17.0)));
        assert!(visible(1000.0, None));
    }

    #[test]
    fn tint_saturates_instead_of_wrapping() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(tint(5, &Tint::offset(-10, 0, 20), &mut rng), Rgb(0, 5, 25));
        assert_eq!(tint(250, &Tint::offset(-10, 0, 20), &mut rng), Rgb(240, 250, 255));
        assert_eq!(tint(100, &Tint::scaled(1.2, 1.0, 0.3), &mut rng), Rgb(120, 100, 30));
    }

    #[test]
    fn flicker_only_touches_red() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let t = Tint { flicker: 20, ..Tint::offset(0, -40, -30) };
        for _ in 0..50 {
            let Rgb(r, g, b) = tint(100, &t, &mut rng);
            assert!((100..120).contains(&r));
            assert_eq!((g, b), (60, 70));
        }
    }

    #[test]
    fn backrooms_exit_colors() {
        let cfg = GameConfig::backrooms();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let exit = sample(3.0, Cell::Exit);
        assert_eq!(column_color(&exit, cfg.level(1), &cfg, &mut rng), Rgb(0, 255, 0));
        assert_eq!(column_color(&exit, cfg.level(4), &cfg, &mut rng), Rgb(0, 120, 255));
    }

    #[test]
    fn sprite_exit_uses_wall_shading() {
        let cfg = GameConfig::dream();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(cfg.level(3).exit, ExitStyle::Sprite(SpriteKey::Marker));
        let wall = column_color(&sample(3.0, Cell::Wall), cfg.level(3), &cfg, &mut rng);
        let exit = column_color(&sample(3.0, Cell::Exit), cfg.level(3), &cfg, &mut rng);
        assert_eq!(wall, exit);
    }

    #[test]
    fn sprite_scale_matches_slice() {
        assert_eq!(sprite_scale(64, 32), 2.0);
        assert_eq!(sprite_scale(10, 0), 10.0);
    }
}
