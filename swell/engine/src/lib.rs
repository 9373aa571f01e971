//! CPU renderer for an animated procedural seascape: a ray-marched fractal
//! wave height field under a drifting volumetric cloud sky.
//!
//! Every pixel is a pure function of the frame's [`scene::SceneParameters`]
//! and its own screen position; see [`cpu::Frame::evaluate_pixel`].

pub mod config;
pub mod cpu;
pub mod error;
pub mod march;
pub mod math;
pub mod noise;
pub mod post;
pub mod render;
pub mod scene;
pub mod shading;
pub mod sky;
pub mod surface;
