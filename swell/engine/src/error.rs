use thiserror::Error;

/// Rejected scene parameters. Raised once per frame, before any pixel is shaded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{0} must contain finite values")]
    NonFinite(&'static str),

    #[error("resolution must be positive, got {width}x{height}")]
    EmptyResolution { width: f32, height: f32 },

    #[error("time must be >= 0, got {0}")]
    NegativeTime(f32),

    #[error("camera position must differ from the look-at target")]
    DegenerateCamera,

    #[error("light direction must be non-zero")]
    ZeroLightDirection,

    #[error("specular intensity must be >= 0, got {0}")]
    NegativeSpecular(f32),

    #[error("specular hardness must be > 0, got {0}")]
    NonPositiveHardness(f32),

    #[error("fog density must be >= 0, got {0}")]
    NegativeFog(f32),

    #[error("output image is {width}x{height} but the scene resolution is {scene_width}x{scene_height}")]
    ResolutionMismatch {
        width: u32,
        height: u32,
        scene_width: f32,
        scene_height: f32,
    },
}
