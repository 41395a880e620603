//! Keyboard polling: turns raylib key state into a per-frame [`Input`].
use raylib::prelude::*;

/// Snapshot of the controls for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Input {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Edge-triggered: true only on the frame R goes down.
    pub restart: bool,
}

impl Input {
    pub fn any_motion(&self) -> bool {
        self.forward || self.backward || self.turn_left || self.turn_right
    }
}

pub fn process_events(window: &RaylibHandle) -> Input {
    let down = |a: KeyboardKey, b: KeyboardKey| window.is_key_down(a) || window.is_key_down(b);
    Input {
        forward: down(KeyboardKey::KEY_W, KeyboardKey::KEY_UP),
        backward: down(KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN),
        turn_left: down(KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT),
        turn_right: down(KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT),
        restart: window.is_key_pressed(KeyboardKey::KEY_R),
    }
}
