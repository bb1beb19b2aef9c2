/// Construction-time validation failure.
///
/// Invalid parameters never produce a value; the error surfaces directly to
/// the constructing caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("normal or axis vector must be non-zero")]
    ZeroNormal,
    #[error("a polygon needs at least 3 vertices, got {found}")]
    TooFewVertices { found: usize },
    #[error("polygon vertices do not lie on a common plane")]
    NotCoplanar,
    #[error("polygon vertices do not form a convex polygon")]
    NotConvex,
    #[error("mesh needs at least one face")]
    EmptyMesh,
    #[error("radius must be > 0, got {value}")]
    NonPositiveRadius { value: f64 },
    #[error("roughness must be in [0, 1], got {value}")]
    RoughnessOutOfRange { value: f64 },
    #[error("index of refraction must be > 0, got {value}")]
    NonPositiveIor { value: f64 },
    #[error("emission intensity must be >= 0, got {value}")]
    NegativeIntensity { value: f64 },
    #[error("camera eye must be at z > 0, got z = {z}")]
    EyeBehindCanvas { z: f64 },
    #[error("canvas must lie in the z = 0 plane, got z = {z}")]
    CanvasNotAtOrigin { z: f64 },
    #[error("canvas extents must be > 0, got {width} x {height}")]
    InvalidCanvasSize { width: f64, height: f64 },
    #[error("focal length must be > 0, got {value}")]
    NonPositiveFocalLength { value: f64 },
    #[error("aperture must be >= 0, got {value}")]
    NegativeAperture { value: f64 },
    #[error("scale factor must be > 0, got {value}")]
    NonPositiveScale { value: f64 },
    #[error("render distance must be > 0, got {value}")]
    NonPositiveRenderDistance { value: f64 },
}

/// Failure while scheduling or running a render.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("image resolution {width} x {height} contains no pixels")]
    EmptyImage { width: u32, height: u32 },
    #[error("a render worker panicked")]
    WorkerPanicked,
    #[error("failed to spawn a render worker")]
    Spawn(#[from] std::io::Error),
}
