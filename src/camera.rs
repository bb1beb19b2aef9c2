use std::num::NonZeroU32;

use bon::bon;
use rand_distr::Distribution as _;

use crate::error::ValidationError;
use crate::geometry::{FloatType, WorldPoint, WorldVector};

/// Pinhole-plus-aperture camera.
///
/// The canvas lies in the z = 0 plane and spans from `canvas_origin` along +X
/// and +Y; the eye sits at z > 0 looking through it. Rays converge on a focal
/// plane at `focal_length` and originate from a lens disk of diameter
/// `aperture` around the eye.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    eye: WorldPoint,
    canvas_origin: WorldPoint,
    canvas_width: FloatType,
    canvas_height: FloatType,
    pixels_per_unit: NonZeroU32,
    focal_length: FloatType,
    aperture: FloatType,
    ssaa_factor: NonZeroU32,
    samples_per_ray: NonZeroU32,
}

#[bon]
impl Camera {
    #[builder]
    pub fn new(
        eye: WorldPoint,
        canvas_origin: WorldPoint,
        canvas_width: FloatType,
        canvas_height: FloatType,
        pixels_per_unit: NonZeroU32,
        focal_length: FloatType,
        #[builder(default = 0.0)] aperture: FloatType,
        #[builder(default = NonZeroU32::MIN)] ssaa_factor: NonZeroU32,
        #[builder(default = NonZeroU32::MIN)] samples_per_ray: NonZeroU32,
    ) -> Result<Self, ValidationError> {
        if eye.z <= 0.0 {
            return Err(ValidationError::EyeBehindCanvas { z: eye.z });
        }
        if canvas_origin.z != 0.0 {
            return Err(ValidationError::CanvasNotAtOrigin { z: canvas_origin.z });
        }
        if canvas_width <= 0.0 || canvas_height <= 0.0 {
            return Err(ValidationError::InvalidCanvasSize {
                width: canvas_width,
                height: canvas_height,
            });
        }
        if focal_length <= 0.0 {
            return Err(ValidationError::NonPositiveFocalLength {
                value: focal_length,
            });
        }
        if aperture < 0.0 {
            return Err(ValidationError::NegativeAperture { value: aperture });
        }

        Ok(Camera {
            eye,
            canvas_origin,
            canvas_width,
            canvas_height,
            pixels_per_unit,
            focal_length,
            aperture,
            ssaa_factor,
            samples_per_ray,
        })
    }
}

impl Camera {
    /// Image dimensions in pixels, canvas extents times pixel density, floored.
    pub fn resolution(&self) -> (u32, u32) {
        let density = self.pixels_per_unit.get() as FloatType;
        (
            (self.canvas_width * density) as u32,
            (self.canvas_height * density) as u32,
        )
    }

    pub fn ssaa_factor(&self) -> u32 {
        self.ssaa_factor.get()
    }

    pub fn samples_per_ray(&self) -> u32 {
        self.samples_per_ray.get()
    }

    /// Canvas-plane point for pixel (x, y) with a sub-pixel offset in [0, 1)².
    ///
    /// Pixel coordinates are domain-space: y grows upwards from the canvas
    /// origin.
    pub(crate) fn canvas_point(
        &self,
        x: u32,
        y: u32,
        offset: (FloatType, FloatType),
        resolution: (u32, u32),
    ) -> WorldPoint {
        let horizontal = (x as FloatType + offset.0) / resolution.0 as FloatType * self.canvas_width;
        let vertical = (y as FloatType + offset.1) / resolution.1 as FloatType * self.canvas_height;
        self.canvas_origin + WorldVector::new(horizontal, vertical, 0.0)
    }

    /// Point on the focal plane that all lens samples for this canvas point
    /// converge on.
    pub(crate) fn focal_point(&self, canvas_point: &WorldPoint) -> WorldPoint {
        let direction = (canvas_point - self.eye).normalize();
        self.eye + direction * self.focal_length
    }

    /// Ray origin jittered uniformly on the lens disk (radius aperture / 2)
    /// in the canvas plane.
    pub(crate) fn lens_origin(&self, rng: &mut impl rand::Rng) -> WorldPoint {
        if self.aperture == 0.0 {
            return self.eye;
        }
        let [u, v]: [FloatType; 2] = rand_distr::UnitDisc.sample(rng);
        let radius = self.aperture / 2.0;
        self.eye + WorldVector::new(u * radius, v * radius, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;
    use rand::SeedableRng as _;
    use rand::rngs::SmallRng;
    use test_case::test_case;

    fn valid_camera() -> Camera {
        Camera::builder()
            .eye(WorldPoint::new(2.5, 2.0, 6.0))
            .canvas_origin(WorldPoint::new(0.0, 0.0, 0.0))
            .canvas_width(5.0)
            .canvas_height(4.0)
            .pixels_per_unit(NonZeroU32::new(100).unwrap())
            .focal_length(8.0)
            .build()
            .unwrap()
    }

    #[test]
    fn resolution_is_floored_canvas_times_density() {
        let camera = Camera::builder()
            .eye(WorldPoint::new(0.0, 0.0, 1.0))
            .canvas_origin(WorldPoint::new(0.0, 0.0, 0.0))
            .canvas_width(1.5)
            .canvas_height(0.65)
            .pixels_per_unit(NonZeroU32::new(10).unwrap())
            .focal_length(1.0)
            .build()
            .unwrap();
        assert!(camera.resolution() == (15, 6));
    }

    #[test_case(0.0 ; "eye on canvas plane")]
    #[test_case(-1.0 ; "eye behind canvas")]
    fn rejects_bad_eye(z: f64) {
        let result = Camera::builder()
            .eye(WorldPoint::new(0.0, 0.0, z))
            .canvas_origin(WorldPoint::new(0.0, 0.0, 0.0))
            .canvas_width(1.0)
            .canvas_height(1.0)
            .pixels_per_unit(NonZeroU32::MIN)
            .focal_length(1.0)
            .build();
        assert!(result.unwrap_err() == ValidationError::EyeBehindCanvas { z });
    }

    #[test]
    fn rejects_canvas_off_the_z_plane() {
        let result = Camera::builder()
            .eye(WorldPoint::new(0.0, 0.0, 1.0))
            .canvas_origin(WorldPoint::new(0.0, 0.0, 0.5))
            .canvas_width(1.0)
            .canvas_height(1.0)
            .pixels_per_unit(NonZeroU32::MIN)
            .focal_length(1.0)
            .build();
        assert!(result.unwrap_err() == ValidationError::CanvasNotAtOrigin { z: 0.5 });
    }

    #[test]
    fn canvas_point_spans_extents() {
        let camera = valid_camera();
        let resolution = camera.resolution();

        let bottom_left = camera.canvas_point(0, 0, (0.0, 0.0), resolution);
        assert!(bottom_left == WorldPoint::new(0.0, 0.0, 0.0));

        let near_top_right =
            camera.canvas_point(resolution.0 - 1, resolution.1 - 1, (0.0, 0.0), resolution);
        assert!(near_top_right.x < 5.0 && near_top_right.x > 4.9);
        assert!(near_top_right.y < 4.0 && near_top_right.y > 3.9);
    }

    #[test]
    fn focal_point_lies_at_focal_length() {
        let camera = valid_camera();
        let canvas_point = WorldPoint::new(1.0, 1.0, 0.0);
        let focal = camera.focal_point(&canvas_point);
        assert!(((focal - WorldPoint::new(2.5, 2.0, 6.0)).norm() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn lens_origin_stays_on_aperture_disk() {
        let camera = Camera::builder()
            .eye(WorldPoint::new(0.0, 0.0, 4.0))
            .canvas_origin(WorldPoint::new(0.0, 0.0, 0.0))
            .canvas_width(1.0)
            .canvas_height(1.0)
            .pixels_per_unit(NonZeroU32::MIN)
            .focal_length(1.0)
            .aperture(0.5)
            .build()
            .unwrap();

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let origin = camera.lens_origin(&mut rng);
            assert!(origin.z == 4.0);
            assert!((origin - WorldPoint::new(0.0, 0.0, 4.0)).norm() <= 0.25 + 1e-12);
        }
    }

    #[test]
    fn pinhole_camera_has_fixed_origin() {
        let camera = valid_camera();
        let mut rng = SmallRng::seed_from_u64(7);
        assert!(camera.lens_origin(&mut rng) == WorldPoint::new(2.5, 2.0, 6.0));
    }
}
