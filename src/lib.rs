//! First-person maze runner: four procedurally generated levels drawn with a
//! fixed-step raycaster.

pub mod audio;
pub mod core;
pub mod error;
pub mod render;
