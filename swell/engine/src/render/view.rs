use crate::math::Vec3;
use crate::scene::SceneParameters;

const CAMERA_DRIFT_SPEED: f32 = 0.25;

/// Camera placement for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub origin: Vec3,
    pub look_dir: Vec3,
}

impl View {
    /// The animated camera slides along -z. The look-at target slides with it,
    /// so the view translates without turning.
    pub fn from_params(params: &SceneParameters) -> Self {
        let drift = if params.animate_camera {
            Vec3::new(0.0, 0.0, -params.time * CAMERA_DRIFT_SPEED)
        } else {
            Vec3::ZERO
        };
        Self {
            origin: params.camera_pos + drift,
            look_dir: params.camera_lookat - params.camera_pos,
        }
    }
}
