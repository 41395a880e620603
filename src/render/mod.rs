//! Raycasting and drawing.
//!
//! Re-exports:
//! - `casters`: Fixed-step ray marching
//! - `shading`: Projection, fisheye correction, fog and tint policy
//! - `framebuffer`: CPU framebuffer uploaded to a texture
//! - `textures`: Exit sprites with generated fallbacks
//! - `render3d`: Column renderer for walls and exit sprites
//! - `hud`: Level status and ending overlays

pub mod casters;
pub mod framebuffer;
pub mod hud;
pub mod render3d;
pub mod shading;
pub mod textures;
