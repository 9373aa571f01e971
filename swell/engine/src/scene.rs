use crate::config::{vec3_from, RenderFrameConfig};
use crate::error::ParameterError;
use crate::math::{Vec2, Vec3};

const MIN_LIGHT_LENGTH: f32 = 1.0e-6;

/// Frame-constant inputs shared by every pixel of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParameters {
    pub time: f32,
    pub resolution: Vec2,
    pub camera_pos: Vec3,
    pub camera_lookat: Vec3,
    /// Unit vector pointing toward the sun.
    pub light_dir: Vec3,
    /// HDR, not clamped.
    pub light_colour: Vec3,
    pub specular: f32,
    pub specular_hardness: f32,
    pub fog: f32,
    pub diffuse: Vec3,
    pub post_effects: bool,
    pub animate_camera: bool,
    pub reflections: bool,
    pub atten_depth: f32,
    pub atten_scale: f32,
    /// Free tuning value. Carried through untouched; no shading term reads it.
    pub param: f32,
}

impl SceneParameters {
    /// Evening sea looking west over the swell, with a low orange sun.
    pub fn reference(width: u32, height: u32) -> Self {
        Self {
            time: 0.0,
            resolution: Vec2::new(width as f32, height as f32),
            camera_pos: Vec3::new(0.0, 0.75, 0.0),
            camera_lookat: Vec3::new(-125.0, 25.0, -95.0),
            light_dir: Vec3::new(-1.0, 0.8, -1.0).normalize(),
            light_colour: Vec3::new(1.4, 0.8, 0.4),
            specular: 6.0,
            specular_hardness: 512.0,
            fog: 0.175,
            diffuse: Vec3::splat(0.1),
            post_effects: true,
            animate_camera: true,
            reflections: true,
            atten_depth: -0.52,
            atten_scale: 0.2,
            param: 0.2,
        }
    }

    /// Overlays the frame's explicit values on the reference scene, then validates.
    pub fn from_frame(frame: &RenderFrameConfig) -> Result<Self, ParameterError> {
        let mut params = Self::reference(frame.width, frame.height);
        params.time = frame.time;
        if let Some(camera_pos) = frame.camera_pos {
            params.camera_pos = vec3_from(camera_pos);
        }
        if let Some(camera_lookat) = frame.camera_lookat {
            params.camera_lookat = vec3_from(camera_lookat);
        }
        if let Some(light_dir) = frame.light_dir {
            params.light_dir = vec3_from(light_dir);
        }
        if let Some(light_colour) = frame.light_colour {
            params.light_colour = vec3_from(light_colour);
        }
        if let Some(specular) = frame.specular {
            params.specular = specular;
        }
        if let Some(specular_hardness) = frame.specular_hardness {
            params.specular_hardness = specular_hardness;
        }
        if let Some(fog) = frame.fog {
            params.fog = fog;
        }
        if let Some(diffuse) = frame.diffuse {
            params.diffuse = diffuse.to_vec3();
        }
        if let Some(post_effects) = frame.post_effects {
            params.post_effects = post_effects;
        }
        if let Some(animate_camera) = frame.animate_camera {
            params.animate_camera = animate_camera;
        }
        if let Some(reflections) = frame.reflections {
            params.reflections = reflections;
        }
        if let Some(atten_depth) = frame.atten_depth {
            params.atten_depth = atten_depth;
        }
        if let Some(atten_scale) = frame.atten_scale {
            params.atten_scale = atten_scale;
        }
        if let Some(param) = frame.param {
            params.param = param;
        }
        params.validate()
    }

    /// Checks ranges and normalizes the light direction.
    pub fn validate(mut self) -> Result<Self, ParameterError> {
        let vectors = [
            (self.camera_pos, "camera position"),
            (self.camera_lookat, "camera look-at"),
            (self.light_dir, "light direction"),
            (self.light_colour, "light colour"),
            (self.diffuse, "diffuse tint"),
        ];
        for (value, field) in vectors {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite(field));
            }
        }
        let scalars = [
            (self.time, "time"),
            (self.specular, "specular intensity"),
            (self.specular_hardness, "specular hardness"),
            (self.fog, "fog density"),
            (self.atten_depth, "attenuation depth"),
            (self.atten_scale, "attenuation scale"),
            (self.param, "param"),
        ];
        for (value, field) in scalars {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite(field));
            }
        }

        let Vec2 {
            x: width,
            y: height,
        } = self.resolution;
        if !(width >= 1.0 && height >= 1.0) {
            return Err(ParameterError::EmptyResolution { width, height });
        }
        if self.time < 0.0 {
            return Err(ParameterError::NegativeTime(self.time));
        }
        if (self.camera_lookat - self.camera_pos).length() < 1.0e-4 {
            return Err(ParameterError::DegenerateCamera);
        }
        if self.light_dir.length() < MIN_LIGHT_LENGTH {
            return Err(ParameterError::ZeroLightDirection);
        }
        if self.specular < 0.0 {
            return Err(ParameterError::NegativeSpecular(self.specular));
        }
        if self.specular_hardness <= 0.0 {
            return Err(ParameterError::NonPositiveHardness(self.specular_hardness));
        }
        if self.fog < 0.0 {
            return Err(ParameterError::NegativeFog(self.fog));
        }

        self.light_dir = self.light_dir.normalize();
        Ok(self)
    }

    /// Same parameters sampled at another instant.
    pub fn at_time(self, time: f32) -> Self {
        Self { time, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_parameters_validate() {
        let params = SceneParameters::reference(640, 360).validate();
        assert!(params.is_ok());
    }

    #[test]
    fn validation_normalizes_light_direction() {
        let mut params = SceneParameters::reference(8, 8);
        params.light_dir = Vec3::new(0.0, 4.0, 0.0);
        let params = params.validate().unwrap();
        assert_eq!(params.light_dir, Vec3::Y);
    }

    #[test]
    fn rejects_zero_light_direction() {
        let mut params = SceneParameters::reference(8, 8);
        params.light_dir = Vec3::ZERO;
        assert_eq!(params.validate(), Err(ParameterError::ZeroLightDirection));
    }

    #[test]
    fn rejects_out_of_range_surface_terms() {
        let mut params = SceneParameters::reference(8, 8);
        params.specular_hardness = -2.0;
        assert_eq!(
            params.validate(),
            Err(ParameterError::NonPositiveHardness(-2.0))
        );

        let mut params = SceneParameters::reference(8, 8);
        params.fog = -0.1;
        assert_eq!(params.validate(), Err(ParameterError::NegativeFog(-0.1)));

        let mut params = SceneParameters::reference(8, 8);
        params.specular = -1.0;
        assert_eq!(params.validate(), Err(ParameterError::NegativeSpecular(-1.0)));
    }

    #[test]
    fn rejects_non_finite_and_degenerate_inputs() {
        let mut params = SceneParameters::reference(8, 8);
        params.light_colour = Vec3::new(f32::NAN, 0.0, 0.0);
        assert_eq!(
            params.validate(),
            Err(ParameterError::NonFinite("light colour"))
        );

        let mut params = SceneParameters::reference(8, 8);
        params.camera_lookat = params.camera_pos;
        assert_eq!(params.validate(), Err(ParameterError::DegenerateCamera));

        let params = SceneParameters::reference(0, 8);
        assert!(matches!(
            params.validate(),
            Err(ParameterError::EmptyResolution { .. })
        ));
    }

    fn frame(raw: &str) -> RenderFrameConfig {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn frame_overrides_reference_values() {
        let frame = frame(
            r#"{"width": 16, "height": 8, "outputPath": "a.png", "time": 2.5,
                "lightDir": [0.0, 2.0, 0.0], "fog": 0.0, "reflections": false}"#,
        );
        let params = SceneParameters::from_frame(&frame).unwrap();
        assert_eq!(params.time, 2.5);
        assert_eq!(params.resolution, Vec2::new(16.0, 8.0));
        assert_eq!(params.light_dir, Vec3::Y);
        assert_eq!(params.fog, 0.0);
        assert!(!params.reflections);
        assert_eq!(params.specular_hardness, 512.0);
    }

    #[test]
    fn frame_with_zero_light_is_rejected() {
        let frame = frame(
            r#"{"width": 16, "height": 8, "outputPath": "a.png", "lightDir": [0.0, 0.0, 0.0]}"#,
        );
        assert_eq!(
            SceneParameters::from_frame(&frame),
            Err(ParameterError::ZeroLightDirection)
        );
    }

    #[test]
    fn param_is_passed_through_unchanged() {
        let mut params = SceneParameters::reference(8, 8);
        params.param = 42.5;
        assert_eq!(params.validate().unwrap().param, 42.5);
    }
}
