use serde::Deserialize;
use std::path::Path;

use crate::math::Vec3;
use crate::render::settings::{QualityPreset, SurfacePreset};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrameConfig {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    #[serde(default)]
    pub time: f32,
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default = "default_surface")]
    pub surface: String,
    pub camera_pos: Option<[f32; 3]>,
    pub camera_lookat: Option<[f32; 3]>,
    pub light_dir: Option<[f32; 3]>,
    pub light_colour: Option<[f32; 3]>,
    pub specular: Option<f32>,
    pub specular_hardness: Option<f32>,
    pub fog: Option<f32>,
    pub diffuse: Option<DiffuseConfig>,
    pub post_effects: Option<bool>,
    pub animate_camera: Option<bool>,
    pub reflections: Option<bool>,
    pub atten_depth: Option<f32>,
    pub atten_scale: Option<f32>,
    pub param: Option<f32>,
}

/// Diffuse tint, either grey or per channel.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
pub enum DiffuseConfig {
    Grey(f32),
    Rgb([f32; 3]),
}

impl DiffuseConfig {
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Self::Grey(v) => Vec3::splat(v),
            Self::Rgb(rgb) => vec3_from(rgb),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBatchConfig {
    pub frames: Vec<RenderFrameConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncomingConfig {
    Single(RenderFrameConfig),
    Batch(RenderBatchConfig),
}

impl IncomingConfig {
    pub fn into_frames(self) -> Vec<RenderFrameConfig> {
        match self {
            Self::Single(frame) => vec![frame],
            Self::Batch(batch) => batch.frames,
        }
    }
}

fn default_quality() -> String {
    QualityPreset::Realtime.as_str().to_string()
}

fn default_surface() -> String {
    "ocean".to_string()
}

/// Structural checks on a frame. Value ranges of the scene parameters are
/// checked by `SceneParameters::validate`.
pub fn validate_config(config: &RenderFrameConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.width == 0 || config.height == 0 {
        return Err("width and height must be positive".into());
    }

    let output_parent = Path::new(&config.output_path)
        .parent()
        .ok_or("outputPath must include a parent directory")?;

    // A bare file name has an empty parent, meaning the working directory.
    if !output_parent.as_os_str().is_empty() && !output_parent.exists() {
        return Err(format!(
            "output directory does not exist: {}",
            output_parent.display()
        )
        .into());
    }

    if QualityPreset::parse(&config.quality).is_none() {
        return Err(format!(
            "quality must be 'realtime' or 'antialiased', got '{}'",
            config.quality
        )
        .into());
    }

    if SurfacePreset::parse(&config.surface).is_none() {
        return Err(format!(
            "surface must be 'ocean' or 'flat', got '{}'",
            config.surface
        )
        .into());
    }

    Ok(())
}

pub fn vec3_from(value: [f32; 3]) -> Vec3 {
    Vec3::new(value[0], value[1], value[2])
}
