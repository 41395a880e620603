//! Text overlays drawn straight to the window: level status and the ending screen.
//!
//! Coordinates are in framebuffer pixels and multiplied by `scale`, so the
//! overlay lines up with the upscaled view.
use raylib::prelude::*;

use crate::core::config::Ending;

const FONT: i32 = 10;
pub const RESTART_PROMPT: &str = "Press R to restart";

#[inline]
fn at(v: i32, scale: f32) -> i32 {
    (v as f32 * scale) as i32
}

/// Left edge that centers `text` in `logical_w` pixels (default font is
/// roughly 0.6 em per glyph).
pub fn centered_x(text: &str, logical_w: i32) -> i32 {
    let width = text.chars().count() as i32 * FONT * 3 / 5;
    ((logical_w - width) / 2).max(0)
}

fn rect(d: &mut RaylibDrawHandle, (x, y, w, h): (i32, i32, i32, i32), c: Color, scale: f32) {
    d.draw_rectangle(at(x, scale), at(y, scale), at(w, scale), at(h, scale), c);
}

pub fn draw_status(d: &mut RaylibDrawHandle, level: u32, message: &str, scale: f32) {
    let size = at(FONT, scale);
    d.draw_text(&format!("Level: {level}"), at(10, scale), at(10, scale), size, Color::WHITE);
    if !message.is_empty() {
        d.draw_text(message, at(10, scale), at(25, scale), size, Color::WHITE);
    }
}

pub fn draw_ending(d: &mut RaylibDrawHandle, ending: &Ending, logical_w: i32, scale: f32) {
    d.clear_background(Color::from(ending.background));
    let size = at(FONT, scale);

    if ending.brain {
        let brain = Color::new(255, 120, 180, 255);
        let shadow = Color::new(200, 80, 140, 255);
        rect(d, (90, 50, 60, 70), brain, scale);
        rect(d, (150, 50, 60, 70), brain, scale);
        rect(d, (130, 80, 40, 30), brain, scale);
        rect(d, (80, 65, 40, 40), shadow, scale);
        rect(d, (170, 65, 40, 40), shadow, scale);
    }

    let text_y = if ending.brain { 150 } else { 20 };
    for (i, line) in [ending.message.as_str(), RESTART_PROMPT].into_iter().enumerate() {
        let x = centered_x(line, logical_w);
        d.draw_text(line, at(x, scale), at(text_y + 15 * i as i32, scale), size, Color::WHITE);
    }
}
