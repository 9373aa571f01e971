use crate::math::{Vec2, Vec3};
use crate::noise::fractal_noise_2d;

/// Central-difference step for normal estimation. Matches the march epsilon.
pub const NORMAL_EPSILON: f32 = 0.003;

/// Implicit water surface `y = elevation(x, z, t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WaterSurface {
    /// Animated fractal waves.
    Ocean { noise_passes: usize },
    /// Still water at a constant level.
    Flat { level: f32 },
}

impl WaterSurface {
    pub fn elevation(self, x: f32, z: f32, time: f32) -> f32 {
        match self {
            Self::Ocean { noise_passes } => {
                -fractal_noise_2d(Vec2::new(x, z), time, noise_passes)
            }
            Self::Flat { level } => level,
        }
    }

    /// Signed vertical offset from the surface: positive above, negative below.
    pub fn distance(self, pos: Vec3, time: f32) -> f32 {
        pos.y - self.elevation(pos.x, pos.z, time)
    }

    pub fn normal(self, pos: Vec3, time: f32) -> Vec3 {
        let e = NORMAL_EPSILON;
        let dx = self.distance(pos + Vec3::new(e, 0.0, 0.0), time)
            - self.distance(pos - Vec3::new(e, 0.0, 0.0), time);
        let dy = self.distance(pos + Vec3::new(0.0, e, 0.0), time)
            - self.distance(pos - Vec3::new(0.0, e, 0.0), time);
        let dz = self.distance(pos + Vec3::new(0.0, 0.0, e), time)
            - self.distance(pos - Vec3::new(0.0, 0.0, e), time);
        Vec3::new(dx, dy, dz).normalize()
    }
}
