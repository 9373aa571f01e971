use crate::math::{Ray, Vec3};
use crate::surface::WaterSurface;

pub const MAX_MARCH_STEPS: u32 = 256;
pub const MAX_TRACE_DISTANCE: f32 = 200.0;
pub const HIT_EPSILON: f32 = 0.003;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarchResult {
    Hit { position: Vec3 },
    Miss,
}

/// Sphere-traces `ray` against the water surface.
///
/// The vertical offset is only a proxy for the true distance, so steep waves
/// seen at grazing angles can be overshot. Running out of steps counts as a miss.
pub fn ray_march(ray: Ray, surface: WaterSurface, time: f32) -> MarchResult {
    let mut t = 0.0;
    for _ in 0..MAX_MARCH_STEPS {
        let p = ray.at(t);
        let d = surface.distance(p, time);
        if d.abs() < HIT_EPSILON {
            return MarchResult::Hit { position: p };
        }
        t += d;
        if t >= MAX_TRACE_DISTANCE {
            break;
        }
    }
    MarchResult::Miss
}
