//! Per-level configuration table and the two built-in game variants.
//!
//! Everything that differs between levels (chaos density, fog, tint, exit
//! look, flavor text) lives in [`LevelConfig`]; a [`GameConfig`] holds four of
//! them plus the settings shared by the whole run. Tables can be loaded from
//! TOML to tune a run without recompiling.
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const LEVEL_COUNT: u32 = 4;

/// Plain RGB triple; converted to a raylib `Color` only at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Which built-in table to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Sprite-marked exits, flickering second level, no fog.
    Dream,
    /// Uniform chaos, shrinking fog, solid exit colors.
    Backrooms,
}

/// Color curve applied to the distance shade: `shade * mul + add`, per channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    #[serde(default = "Tint::unit")]
    pub mul: [f32; 3],
    #[serde(default)]
    pub add: [i16; 3],
    /// Upper bound (exclusive) of a random boost added to red each column.
    #[serde(default)]
    pub flicker: u8,
}

impl Tint {
    fn unit() -> [f32; 3] {
        [1.0, 1.0, 1.0]
    }

    pub const fn offset(r: i16, g: i16, b: i16) -> Self {
        Self { mul: [1.0, 1.0, 1.0], add: [r, g, b], flicker: 0 }
    }

    pub const fn scaled(r: f32, g: f32, b: f32) -> Self {
        Self { mul: [r, g, b], add: [0, 0, 0], flicker: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteKey {
    Marker,
    Door,
}

/// How exit cells are drawn on a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStyle {
    /// Flat color, no distance shading.
    Solid(Rgb),
    /// Wall-shaded slice with a sprite scaled to the slice height on top.
    Sprite(SpriteKey),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Chaos trials per cell: `floor(size² × ratio)` trials in total.
    pub chaos_ratio: f64,
    /// A wall is knocked out only if at least this many neighbors are open.
    pub min_open_neighbors: u8,
    /// Distance to the neighbors counted by the chaos pass: 1 looks at the
    /// adjacent cells, 2 at the cells one carve step away (keeps pillars).
    #[serde(default = "LevelConfig::default_neighbor_step")]
    pub neighbor_step: u8,
    /// Columns farther than this are left as background.
    #[serde(default)]
    pub fog_distance: Option<f32>,
    pub tint: Tint,
    pub exit: ExitStyle,
    #[serde(default)]
    pub message: String,
}

impl LevelConfig {
    fn default_neighbor_step() -> u8 {
        1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadeConfig {
    pub base: f32,
    pub attenuation: f32,
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self { base: 200.0, attenuation: 0.1 }
    }
}

/// Final screen shown once the last exit is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ending {
    pub message: String,
    pub background: Rgb,
    #[serde(default)]
    pub brain: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_title")]
    pub title: String,
    /// Loop `music.mp3` from the assets directory for the whole run.
    #[serde(default)]
    pub music: bool,
    pub initial_size: usize,
    pub size_step: usize,
    #[serde(default = "GameConfig::default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "GameConfig::default_ray_step")]
    pub ray_step: f32,
    #[serde(default)]
    pub shade: ShadeConfig,
    /// Distance at which walls fade to black; `None` disables the fade.
    #[serde(default)]
    pub fog_fade: Option<f32>,
    pub ending: Ending,
    pub levels: Vec<LevelConfig>,
}

/// Shrinking visibility: `base - per_level * level`, never below `floor`.
pub fn fog_distance_for(level: u32, base: f32, per_level: f32, floor: f32) -> f32 {
    (base - per_level * level as f32).max(floor)
}

impl GameConfig {
    fn default_title() -> String {
        "Dream-Maze".to_string()
    }

    fn default_fov() -> f32 {
        60.0
    }

    fn default_ray_step() -> f32 {
        0.05
    }

    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Dream => Self::dream(),
            Variant::Backrooms => Self::backrooms(),
        }
    }

    pub fn dream() -> Self {
        let level = |chaos_ratio, min_open_neighbors, tint, exit, message: &str| LevelConfig {
            chaos_ratio,
            min_open_neighbors,
            neighbor_step: 2,
            fog_distance: None,
            tint,
            exit,
            message: message.to_string(),
        };
        Self {
            title: Self::default_title(),
            music: true,
            initial_size: 31,
            size_step: 12,
            fov_degrees: Self::default_fov(),
            ray_step: Self::default_ray_step(),
            shade: ShadeConfig::default(),
            fog_fade: None,
            ending: Ending {
                message: "You are still alive, Terry.".to_string(),
                background: Rgb(10, 10, 15),
                brain: false,
            },
            levels: vec![
                level(
                    0.2,
                    2,
                    Tint::offset(-10, 0, 20),
                    ExitStyle::Sprite(SpriteKey::Marker),
                    "Brain condition is still critical...",
                ),
                level(
                    0.6,
                    1,
                    Tint { flicker: 20, ..Tint::offset(0, -40, -30) },
                    ExitStyle::Sprite(SpriteKey::Marker),
                    "Brain condition is getting worse...",
                ),
                level(
                    0.1,
                    2,
                    Tint::offset(10, 10, 0),
                    ExitStyle::Sprite(SpriteKey::Marker),
                    "Risk of brain death is gone.",
                ),
                level(
                    0.0,
                    4,
                    Tint::scaled(0.8, 1.1, 0.6),
                    ExitStyle::Sprite(SpriteKey::Door),
                    "...",
                ),
            ],
        }
    }

    pub fn backrooms() -> Self {
        let fog = |level| Some(fog_distance_for(level, 20.0, 3.0, 6.0));
        let exit_marker = ExitStyle::Solid(Rgb(0, 255, 0));
        let level = |n, tint, exit, message: &str| LevelConfig {
            chaos_ratio: 0.25,
            min_open_neighbors: 2,
            neighbor_step: 1,
            fog_distance: fog(n),
            tint,
            exit,
            message: message.to_string(),
        };
        Self {
            title: "IMPOSSIBLE BACKROOMS".to_string(),
            music: false,
            initial_size: 31,
            size_step: 10,
            fov_degrees: Self::default_fov(),
            ray_step: Self::default_ray_step(),
            shade: ShadeConfig::default(),
            fog_fade: Some(20.0),
            ending: Ending {
                message: "After all these years... you finally woke up, Terry".to_string(),
                background: Rgb(15, 0, 25),
                brain: true,
            },
            levels: vec![
                level(
                    1,
                    Tint::offset(-10, 0, 20),
                    exit_marker,
                    "Escape probability extremely low (crying sounds)",
                ),
                level(
                    2,
                    Tint::offset(30, -20, -10),
                    exit_marker,
                    "Brain death probability eliminated (sobbing)",
                ),
                level(
                    3,
                    Tint::offset(10, 10, 0),
                    exit_marker,
                    "Cognitive functions improving (joy screams)",
                ),
                level(
                    4,
                    Tint::scaled(1.2, 1.0, 0.3),
                    ExitStyle::Solid(Rgb(0, 120, 255)),
                    "...",
                ),
            ],
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if self.initial_size < 3 || self.initial_size % 2 == 0 {
            return invalid(format!("initial_size must be odd and >= 3, got {}", self.initial_size));
        }
        if self.size_step == 0 {
            return invalid("size_step must be positive".to_string());
        }
        if self.levels.len() != LEVEL_COUNT as usize {
            return invalid(format!("expected {} levels, got {}", LEVEL_COUNT, self.levels.len()));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid(format!("fov_degrees out of range: {}", self.fov_degrees));
        }
        if !(self.ray_step > 0.0) {
            return invalid(format!("ray_step must be positive, got {}", self.ray_step));
        }
        for (i, lvl) in self.levels.iter().enumerate() {
            if !(lvl.chaos_ratio >= 0.0) {
                return invalid(format!("level {}: negative chaos_ratio", i + 1));
            }
            if lvl.min_open_neighbors > 4 {
                return invalid(format!("level {}: min_open_neighbors above 4", i + 1));
            }
            if !matches!(lvl.neighbor_step, 1 | 2) {
                return invalid(format!("level {}: neighbor_step must be 1 or 2", i + 1));
            }
            if let Some(fog) = lvl.fog_distance {
                if !(fog > 0.0) {
                    return invalid(format!("level {}: fog_distance must be positive", i + 1));
                }
            }
        }
        Ok(())
    }

    /// Config of a 1-based level; levels past the table reuse the last entry.
    pub fn level(&self, level: u32) -> &LevelConfig {
        let idx = (level.max(1) as usize - 1).min(self.levels.len() - 1);
        &self.levels[idx]
    }

    /// Whether any level draws its exit with a sprite.
    pub fn uses_sprites(&self) -> bool {
        self.levels.iter().any(|l| matches!(l.exit, ExitStyle::Sprite(_)))
    }

    pub fn fov(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}
