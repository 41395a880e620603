//! CPU framebuffer at the logical resolution, uploaded to a GPU texture once per frame.
use log::warn;
use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; (width * height) as usize],
            width,
            height,
            background_color: bg,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_background_color(&mut self, c: Color) {
        self.background_color = c;
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    /// Fills rows `top..=bottom` of column `x`, clipped to the buffer.
    pub fn draw_vline(&mut self, x: u32, top: i32, bottom: i32, color: Color) {
        if x >= self.width || bottom < 0 || top >= self.height as i32 {
            return;
        }
        let y0 = top.max(0) as u32;
        let y1 = bottom.min(self.height as i32 - 1) as u32;
        for y in y0..=y1 {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    /// Pixels as tightly packed RGBA8 bytes.
    pub fn rgba_bytes(&self) -> &[u8] {
        // Color is four packed u8 channels, so the buffer is already RGBA8.
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        unsafe { std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len) }
    }

    /// Copies the pixels into a texture of the same size. A failed upload
    /// keeps the previous frame on screen.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        if let Err(e) = tex.update_texture(self.rgba_bytes()) {
            warn!("framebuffer upload failed: {e}");
        }
    }
}
