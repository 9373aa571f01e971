use crate::math::{mix3, Vec2, Vec3};

const GAMMA: f32 = 0.8;
const CONTRAST: f32 = 1.1;
const SATURATION: f32 = 1.3;
const BRIGHTNESS: f32 = 1.3;
const LUMA: Vec3 = Vec3::new(0.2125, 0.7154, 0.0721);

/// Film-style grade: gamma, brightness/saturation/contrast around mid grey,
/// then a soft vignette. `uv` is the screen position in [0, 1]^2.
pub fn post_effects(rgb: Vec3, uv: Vec2) -> Vec3 {
    let rgb = rgb.max(Vec3::ZERO).powf(GAMMA);
    let bright = rgb * BRIGHTNESS;
    let grey = Vec3::splat(LUMA.dot(bright));
    let rgb = mix3(Vec3::splat(0.5), mix3(grey, bright, SATURATION), CONTRAST);
    let edge = 40.0 * uv.x * uv.y * (1.0 - uv.x) * (1.0 - uv.y);
    rgb * (0.4 + (0.5 * edge.max(0.0).powf(0.2)))
}
