use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::march::{ray_march, MarchResult};
use crate::error::ParameterError;
use crate::math::{Ray, Vec2, Vec3};
use crate::post::post_effects;
use crate::render::{RenderSettings, RenderTuning, View};
use crate::scene::SceneParameters;
use crate::shading::shade;
use crate::sky::sky_clouds;
use crate::surface::WaterSurface;

const WORLD_UP: Vec3 = Vec3::Y;
const FALLBACK_RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Unnormalized ray direction through `screen` ([0, 1]^2, origin bottom-left).
pub fn build_ray(look_dir: Vec3, screen: Vec2, resolution: Vec2) -> Vec3 {
    let x = (screen.x - 0.5) * (resolution.x / resolution.y);
    let y = screen.y - 0.5;

    let dir = look_dir.normalize();
    let cross = WORLD_UP.cross(dir);
    // Looking straight up or down leaves the basis undefined.
    let right = if cross.length() < 1.0e-6 {
        FALLBACK_RIGHT
    } else {
        cross.normalize()
    };
    let up = dir.cross(right).normalize();

    dir + (right * x) + (up * y)
}

/// Everything needed to colour any pixel of one frame.
pub struct Frame {
    params: SceneParameters,
    view: View,
    surface: WaterSurface,
    tuning: RenderTuning,
}

impl Frame {
    /// Validates `params` so per-pixel code never sees a zero light or an empty image.
    pub fn new(
        params: SceneParameters,
        surface: WaterSurface,
        tuning: RenderTuning,
    ) -> Result<Self, ParameterError> {
        let params = params.validate()?;
        Ok(Self {
            view: View::from_params(&params),
            params,
            surface,
            tuning,
        })
    }

    /// Colour seen through `screen` before grading.
    pub fn trace(&self, screen: Vec2) -> Vec3 {
        let params = &self.params;
        let ro = self.view.origin;
        let rd = build_ray(self.view.look_dir, screen, params.resolution).normalize();
        let ray = Ray {
            origin: ro,
            direction: rd,
        };

        match ray_march(ray, self.surface, params.time) {
            MarchResult::Hit { position } => {
                let normal = self.surface.normal(position, params.time);
                shade(params, position, rd, normal, ro)
            }
            MarchResult::Miss => {
                sky_clouds(ro, rd, params.time, params.light_dir, params.light_colour)
            }
        }
    }

    /// Final display colour at `frag_coord` (pixel units, origin bottom-left,
    /// pixel centres at half-integers).
    pub fn evaluate_pixel(&self, frag_coord: Vec2) -> Vec3 {
        let resolution = self.params.resolution;
        let samples = self.tuning.samples_per_pixel.max(1);
        let centre = Vec2::new(frag_coord.x / resolution.x, frag_coord.y / resolution.y);

        let colour = if samples == 1 {
            self.trace(centre)
        } else {
            let step = std::f32::consts::TAU / samples as f32;
            let radius = self.tuning.sample_radius;
            let mut angle = step * 0.33333;
            let mut accumulated = Vec3::ZERO;
            for _ in 0..samples {
                let screen = Vec2::new(
                    (frag_coord.x + (angle.cos() * radius)) / resolution.x,
                    (frag_coord.y + (angle.sin() * radius)) / resolution.y,
                );
                accumulated = accumulated + self.trace(screen);
                angle += step;
            }
            accumulated / samples as f32
        };

        let graded = if self.params.post_effects {
            post_effects(colour, centre)
        } else {
            colour
        };
        graded.clamp01()
    }
}

pub fn render_cpu(
    settings: &RenderSettings,
    params: &SceneParameters,
) -> Result<RgbImage, ParameterError> {
    let frame = Frame::new(*params, settings.surface, settings.tuning)?;
    let Vec2 {
        x: scene_width,
        y: scene_height,
    } = params.resolution;
    if scene_width != settings.width as f32 || scene_height != settings.height as f32 {
        return Err(ParameterError::ResolutionMismatch {
            width: settings.width,
            height: settings.height,
            scene_width,
            scene_height,
        });
    }
    let width = settings.width as usize;
    let height = settings.height as usize;
    let mut image = RgbImage::new(settings.width, settings.height);
    let mut color_buffer = vec![Vec3::ZERO; width * height];

    log::debug!(
        "rendering {}x{} at t={:.3}s ({} noise passes, {} samples/pixel)",
        width,
        height,
        params.time,
        settings.tuning.noise_passes,
        settings.tuning.samples_per_pixel
    );

    // Scanlines are independent; every pixel reads the same frame time.
    color_buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, pixels)| {
            let frag_y = (height - 1 - row) as f32 + 0.5;
            for (x, slot) in pixels.iter_mut().enumerate() {
                *slot = frame.evaluate_pixel(Vec2::new(x as f32 + 0.5, frag_y));
            }
        });

    for y in 0..height {
        for x in 0..width {
            let color = color_buffer[(y * width) + x];
            image.put_pixel(x as u32, y as u32, to_rgb(color));
        }
    }

    Ok(image)
}

fn to_rgb(color: Vec3) -> Rgb<u8> {
    let c = color.clamp01();
    Rgb([
        (c.x * 255.999) as u8,
        (c.y * 255.999) as u8,
        (c.z * 255.999) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::settings::QualityPreset;

    fn flat_overhead_params() -> SceneParameters {
        let mut params = SceneParameters::reference(9, 9);
        params.camera_pos = Vec3::new(0.0, 10.0, 0.0);
        params.camera_lookat = Vec3::ZERO;
        params.light_dir = Vec3::Y;
        params.reflections = false;
        params.post_effects = false;
        params.animate_camera = false;
        params.specular = 0.0;
        params.fog = 0.0;
        params.atten_scale = 0.0;
        params.validate().unwrap()
    }

    fn realtime() -> RenderTuning {
        RenderTuning::for_quality(QualityPreset::Realtime)
    }

    const FLAT: WaterSurface = WaterSurface::Flat { level: 0.0 };

    #[test]
    fn centre_ray_follows_look_direction() {
        let look = Vec3::new(-125.0, 24.25, -95.0);
        let rd = build_ray(look, Vec2::new(0.5, 0.5), Vec2::new(640.0, 360.0));
        assert!((rd - look.normalize()).length() < 1.0e-6);
    }

    #[test]
    fn screen_offsets_are_aspect_corrected() {
        let look = Vec3::new(0.0, 0.0, -1.0);
        let rd = build_ray(look, Vec2::new(1.0, 0.5), Vec2::new(200.0, 100.0));
        // right = up x forward = (-1, 0, 0) for a camera facing -z.
        assert!((rd - Vec3::new(-1.0, 0.0, -1.0)).length() < 1.0e-6);
        let rd = build_ray(look, Vec2::new(0.5, 1.0), Vec2::new(200.0, 100.0));
        assert!((rd - Vec3::new(0.0, 0.5, -1.0)).length() < 1.0e-6);
    }

    #[test]
    fn vertical_look_direction_stays_finite() {
        let rd = build_ray(-Vec3::Y, Vec2::new(0.1, 0.9), Vec2::new(9.0, 9.0));
        assert!(rd.is_finite());
        assert!(rd.y < 0.0);
    }

    #[test]
    fn centre_pixel_over_flat_sea_is_lambertian() {
        let params = flat_overhead_params();
        let frame = Frame::new(params, FLAT, realtime()).unwrap();
        let colour = frame.evaluate_pixel(Vec2::new(4.5, 4.5));
        let expected = (params.diffuse * params.light_colour).clamp01();
        assert!(
            (colour - expected).length() < 1.0e-5,
            "expected {expected:?}, got {colour:?}"
        );
    }

    #[test]
    fn post_effects_grade_the_centre_pixel() {
        let mut params = flat_overhead_params();
        params.post_effects = true;
        let frame = Frame::new(params, FLAT, realtime()).unwrap();
        let colour = frame.evaluate_pixel(Vec2::new(4.5, 4.5));
        let expected = post_effects(params.diffuse * params.light_colour, Vec2::new(0.5, 0.5));
        assert!((colour - expected.clamp01()).length() < 1.0e-5);
    }

    #[test]
    fn upward_view_shows_sky() {
        let mut params = flat_overhead_params();
        params.camera_lookat = Vec3::new(0.0, 20.0, -10.0);
        let frame = Frame::new(params, FLAT, realtime()).unwrap();
        let screen = Vec2::new(0.5, 0.5);
        let rd = build_ray(params.camera_lookat - params.camera_pos, screen, params.resolution)
            .normalize();
        let expected = sky_clouds(
            params.camera_pos,
            rd,
            params.time,
            params.light_dir,
            params.light_colour,
        );
        assert_eq!(frame.trace(screen), expected);
    }

    #[test]
    fn antialiased_flat_sea_matches_single_sample() {
        let params = flat_overhead_params();
        let single = Frame::new(params, FLAT, realtime())
            .unwrap()
            .evaluate_pixel(Vec2::new(4.5, 4.5));
        let tuning = RenderTuning::for_quality(QualityPreset::Antialiased);
        let averaged = Frame::new(params, FLAT, tuning)
            .unwrap()
            .evaluate_pixel(Vec2::new(4.5, 4.5));
        assert!((single - averaged).length() < 1.0e-4);
    }

    #[test]
    fn antialiased_ocean_averages_sixteen_rotated_samples() {
        let mut params = SceneParameters::reference(32, 18).at_time(1.0);
        params.post_effects = false;
        let tuning = RenderTuning::for_quality(QualityPreset::Antialiased);
        let ocean = WaterSurface::Ocean {
            noise_passes: tuning.noise_passes,
        };
        let frame = Frame::new(params, ocean, tuning).unwrap();

        // Below the horizon, so every sample lands on the swell.
        let frag = Vec2::new(16.5, 4.5);
        let step = std::f32::consts::TAU / 16.0;
        let mut sum = Vec3::ZERO;
        for i in 0..16 {
            let angle = (step * 0.33333) + (i as f32 * step);
            let screen = Vec2::new(
                (frag.x + (0.3 * angle.cos())) / 32.0,
                (frag.y + (0.3 * angle.sin())) / 18.0,
            );
            sum = sum + frame.trace(screen);
        }
        let expected = (sum / 16.0).clamp01();

        let averaged = frame.evaluate_pixel(frag);
        assert!(
            (averaged - expected).length() < 1.0e-4,
            "expected {expected:?}, got {averaged:?}"
        );

        let single = Frame::new(params, ocean, realtime())
            .unwrap()
            .evaluate_pixel(frag);
        assert_ne!(single, averaged);
    }

    #[test]
    fn render_fills_every_pixel() {
        let mut params = SceneParameters::reference(6, 4).at_time(3.0);
        params.reflections = false;
        let settings = RenderSettings {
            width: 6,
            height: 4,
            output_path: String::new(),
            tuning: realtime(),
            surface: WaterSurface::Ocean { noise_passes: 6 },
        };
        let image = render_cpu(&settings, &params).unwrap();
        assert_eq!(image.dimensions(), (6, 4));

        let frame = Frame::new(params, settings.surface, settings.tuning).unwrap();
        let expected = to_rgb(frame.evaluate_pixel(Vec2::new(2.5, 3.5)));
        assert_eq!(*image.get_pixel(2, 0), expected);
    }

    fn flat_settings(width: u32, height: u32) -> RenderSettings {
        RenderSettings {
            width,
            height,
            output_path: String::new(),
            tuning: realtime(),
            surface: FLAT,
        }
    }

    #[test]
    fn render_rejects_empty_or_mismatched_images() {
        let params = SceneParameters::reference(0, 4);
        assert!(matches!(
            render_cpu(&flat_settings(0, 4), &params),
            Err(ParameterError::EmptyResolution { .. })
        ));

        let params = SceneParameters::reference(8, 4);
        assert_eq!(
            render_cpu(&flat_settings(6, 4), &params).err(),
            Some(ParameterError::ResolutionMismatch {
                width: 6,
                height: 4,
                scene_width: 8.0,
                scene_height: 4.0,
            })
        );
    }

    #[test]
    fn frame_rejects_unvalidated_parameters() {
        let mut params = flat_overhead_params();
        params.light_dir = Vec3::ZERO;
        assert_eq!(
            Frame::new(params, FLAT, realtime()).err(),
            Some(ParameterError::ZeroLightDirection)
        );
    }
}
