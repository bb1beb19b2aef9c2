mod camera;
mod error;
pub mod geometry;
mod image_buffer;
mod materials;
mod primitives;
mod renderer;
mod scene;
pub mod util;

pub use camera::Camera;
pub use error::{RenderError, ValidationError};
pub use image_buffer::PixelBuffer;
pub use materials::{Material, ScatterSample};
pub use primitives::{
    Axis, Cone, Cuboid, Cylinder, Disk, Hit, Mesh, Plane, Polygon, Primitive, Sphere, Transform,
    Triangle,
};
pub use renderer::{
    Progress, RenderOptions, RenderOutput, RenderSummary, render, render_with_progress,
};
pub use scene::{RenderParams, Scene};
