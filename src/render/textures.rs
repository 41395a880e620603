//! Exit sprites: the marker picked up on levels 1-3 and the door of level 4.
//!
//! Images are decoded once into CPU pixmaps so columns can be sampled without
//! touching the GPU. With `allow_fallback`, a missing image is replaced by a
//! generated one instead of aborting startup.
use std::path::{Path, PathBuf};

use log::{info, warn};
use raylib::prelude::*;

use crate::core::config::SpriteKey;
use crate::error::AssetError;

/// An immutable CPU pixmap, sampled per pixel.
#[derive(Clone)]
struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    fn new(w: u32, h: u32, px: Vec<Color>) -> Self {
        Self { w, h, px }
    }

    #[inline]
    fn sample(&self, x: u32, y: u32) -> Color {
        let xi = x.min(self.w - 1) as usize;
        let yi = y.min(self.h - 1) as usize;
        self.px[yi * self.w as usize + xi]
    }
}

pub struct TextureManager {
    marker: Pixmap,
    door: Pixmap,
}

impl SpriteKey {
    pub fn file_name(self) -> &'static str {
        match self {
            SpriteKey::Marker => "banana.png",
            SpriteKey::Door => "door.png",
        }
    }
}

impl TextureManager {
    pub fn load(assets_dir: &Path, allow_fallback: bool) -> Result<Self, AssetError> {
        Ok(Self {
            marker: Self::load_sprite(assets_dir, SpriteKey::Marker, allow_fallback)?,
            door: Self::load_sprite(assets_dir, SpriteKey::Door, allow_fallback)?,
        })
    }

    /// Generated sprites only; no files are read.
    pub fn procedural() -> Self {
        Self {
            marker: Self::fallback(SpriteKey::Marker),
            door: Self::fallback(SpriteKey::Door),
        }
    }

    fn load_sprite(dir: &Path, key: SpriteKey, allow_fallback: bool) -> Result<Pixmap, AssetError> {
        let path: PathBuf = dir.join(key.file_name());
        match Self::read_pixmap(&path) {
            Ok(pm) => {
                info!("loaded sprite {:?} ({}x{})", path, pm.w, pm.h);
                Ok(pm)
            }
            Err(reason) if allow_fallback => {
                warn!("sprite {:?} unavailable ({reason}), using generated {:?}", path, key);
                Ok(Self::fallback(key))
            }
            Err(reason) => Err(AssetError::Sprite { path, reason }),
        }
    }

    fn read_pixmap(path: &Path) -> Result<Pixmap, String> {
        let path_str = path.to_str().ok_or_else(|| "path is not valid UTF-8".to_string())?;
        let img = Image::load_image(path_str).map_err(|e| e.to_string())?;
        let w = img.width().max(1) as u32;
        let h = img.height().max(1) as u32;
        let data = img.get_image_data().to_vec();
        if data.len() < (w * h) as usize {
            return Err("truncated image data".to_string());
        }
        Ok(Pixmap::new(w, h, data))
    }

    fn fallback(key: SpriteKey) -> Pixmap {
        match key {
            SpriteKey::Marker => Self::make_glowing_orb(64, 64, Color::new(255, 230, 60, 255)),
            SpriteKey::Door => Self::make_door(48, 96, Color::new(0, 120, 255, 255)),
        }
    }

    fn pixmap(&self, key: SpriteKey) -> &Pixmap {
        match key {
            SpriteKey::Marker => &self.marker,
            SpriteKey::Door => &self.door,
        }
    }

    /// Natural size of a sprite in pixels.
    pub fn image_size(&self, key: SpriteKey) -> (u32, u32) {
        let pm = self.pixmap(key);
        (pm.w, pm.h)
    }

    pub fn get_pixel_color(&self, key: SpriteKey, tx: u32, ty: u32) -> Color {
        self.pixmap(key).sample(tx, ty)
    }

    /// Round glowing blob on a transparent background.
    fn make_glowing_orb(w: u32, h: u32, color: Color) -> Pixmap {
        let mut px = vec![Color::new(0, 0, 0, 0); (w * h) as usize];
        let cx = w as f32 * 0.5;
        let cy = h as f32 * 0.5;
        let r = w.min(h) as f32 * 0.3;
        for y in 0..h {
            for x in 0..w {
                let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
                let i = (y * w + x) as usize;
                if d <= r {
                    let t = (1.0 - d / r).clamp(0.0, 1.0);
                    px[i] = Self::mix(color, Color::WHITE, (t * 220.0) as u8);
                    px[i].a = 255;
                } else {
                    let t = (1.0 - (d - r) / (r * 0.9)).clamp(0.0, 1.0);
                    if t > 0.0 {
                        px[i] = color;
                        px[i].a = (t * 180.0) as u8;
                    }
                }
            }
        }
        Pixmap::new(w, h, px)
    }

    /// Framed panel with a knob; fully opaque.
    fn make_door(w: u32, h: u32, body: Color) -> Pixmap {
        let frame = Self::mix(body, Color::BLACK, 140);
        let knob = Color::new(255, 215, 0, 255);
        let border = (w / 8).max(2);
        let mut px = vec![body; (w * h) as usize];
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) as usize;
                let on_frame = x < border || y < border || x >= w - border || y >= h - border;
                if on_frame {
                    px[i] = frame;
                } else if ((y - border) / 12) % 2 == 1 {
                    px[i] = Self::mix(body, Color::WHITE, 24);
                }
            }
        }
        let (kx, ky) = (w - border * 2, h / 2);
        for y in ky.saturating_sub(2)..(ky + 2).min(h) {
            for x in kx.saturating_sub(2)..(kx + 1).min(w) {
                px[(y * w + x) as usize] = knob;
            }
        }
        Pixmap::new(w, h, px)
    }

    #[inline]
    fn mix(a: Color, b: Color, t: u8) -> Color {
        let ta = t as u16;
        let na = 255u16 - ta;
        let mixc = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
        Color::new(mixc(a.r, b.r), mixc(a.g, b.g), mixc(a.b, b.b), mixc(a.a, b.a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedural_sprites_report_their_size() {
        let tm = TextureManager::procedural();
        assert_eq!(tm.image_size(SpriteKey::Marker), (64, 64));
        assert_eq!(tm.image_size(SpriteKey::Door), (48, 96));
    }

    #[test]
    fn orb_is_transparent_in_the_corners() {
        let tm = TextureManager::procedural();
        assert_eq!(tm.get_pixel_color(SpriteKey::Marker, 0, 0).a, 0);
        assert_eq!(tm.get_pixel_color(SpriteKey::Marker, 32, 32).a, 255);
    }

    #[test]
    fn sampling_clamps_to_the_edge() {
        let tm = TextureManager::procedural();
        let edge = tm.get_pixel_color(SpriteKey::Door, 47, 95);
        assert_eq!(tm.get_pixel_color(SpriteKey::Door, 500, 500), edge);
    }

    #[test]
    fn missing_sprite_without_fallback_is_an_error() {
        let dir = Path::new("definitely/not/here");
        assert!(matches!(
            TextureManager::load(dir, false),
            Err(AssetError::Sprite { .. })
        ));
        assert!(TextureManager::load(dir, true).is_ok());
    }
}
