use streetpano_core::ImageError;

/// Errors returned by the projector and crop planning.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProjectError {
    #[error("field of view {fov}° outside the supported range [{min}°, {max}°]")]
    InvalidFieldOfView { fov: f64, min: f64, max: f64 },
    #[error("output size must be positive")]
    InvalidOutputSize,
    #[error("{name} must be finite (got {value})")]
    NonFiniteAngle { name: &'static str, value: f64 },
    #[error("heading step {step}° must be in (0°, 360°]")]
    InvalidHeadingStep { step: f64 },
    #[error("crop count must be positive")]
    InvalidCropCount,
    #[error(transparent)]
    Image(#[from] ImageError),
}
