use crate::config::RenderFrameConfig;
use crate::surface::WaterSurface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityPreset {
    /// Single sample per pixel, six wave octaves.
    Realtime,
    /// Sixteen rotated sub-pixel samples, eight wave octaves.
    Antialiased,
}

impl QualityPreset {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("realtime") {
            return Some(Self::Realtime);
        }
        if value.eq_ignore_ascii_case("antialiased") || value.eq_ignore_ascii_case("aa") {
            return Some(Self::Antialiased);
        }
        None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Realtime => "realtime",
            Self::Antialiased => "antialiased",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTuning {
    pub quality: QualityPreset,
    pub noise_passes: usize,
    pub samples_per_pixel: u32,
    /// Radius, in pixels, of the circle the supersamples sit on.
    pub sample_radius: f32,
}

impl RenderTuning {
    pub fn for_quality(quality: QualityPreset) -> Self {
        let (noise_passes, samples_per_pixel) = match quality {
            QualityPreset::Realtime => (6, 1),
            QualityPreset::Antialiased => (8, 16),
        };
        Self {
            quality,
            noise_passes,
            samples_per_pixel,
            sample_radius: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfacePreset {
    Ocean,
    Flat,
}

impl SurfacePreset {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("ocean") {
            return Some(Self::Ocean);
        }
        if value.eq_ignore_ascii_case("flat") {
            return Some(Self::Flat);
        }
        None
    }

    pub fn build(self, tuning: &RenderTuning) -> WaterSurface {
        match self {
            Self::Ocean => WaterSurface::Ocean {
                noise_passes: tuning.noise_passes,
            },
            Self::Flat => WaterSurface::Flat { level: 0.0 },
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    pub tuning: RenderTuning,
    pub surface: WaterSurface,
}

impl RenderSettings {
    /// Expects a frame that already passed `validate_config`; unknown preset
    /// names fall back to the realtime ocean.
    pub fn from_frame(frame: &RenderFrameConfig) -> Self {
        let quality = QualityPreset::parse(&frame.quality).unwrap_or(QualityPreset::Realtime);
        let tuning = RenderTuning::for_quality(quality);
        let surface = SurfacePreset::parse(&frame.surface)
            .unwrap_or(SurfacePreset::Ocean)
            .build(&tuning);
        Self {
            width: frame.width,
            height: frame.height,
            output_path: frame.output_path.clone(),
            tuning,
            surface,
        }
    }
}
