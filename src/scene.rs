use std::num::NonZeroU32;

use crate::camera::Camera;
use crate::error::ValidationError;
use crate::geometry::{EPSILON, FloatType, Ray};
use crate::primitives::{Hit, Primitive};
use crate::util::Color;

/// Integrator settings shared by every ray of a render.
#[derive(Copy, Clone, Debug)]
pub struct RenderParams {
    max_bounces: NonZeroU32,
    void_color: Color,
    render_distance: FloatType,
}

impl RenderParams {
    pub fn new(
        max_bounces: NonZeroU32,
        void_color: Color,
        render_distance: FloatType,
    ) -> Result<Self, ValidationError> {
        if render_distance <= 0.0 {
            return Err(ValidationError::NonPositiveRenderDistance {
                value: render_distance,
            });
        }
        Ok(RenderParams {
            max_bounces,
            void_color,
            render_distance,
        })
    }

    pub fn max_bounces(&self) -> u32 {
        self.max_bounces.get()
    }

    pub fn void_color(&self) -> Color {
        self.void_color
    }

    pub fn render_distance(&self) -> FloatType {
        self.render_distance
    }
}

/// The world to render: a camera and a flat list of primitives.
#[derive(Clone, Debug)]
pub struct Scene {
    camera: Camera,
    primitives: Vec<Primitive>,
    params: RenderParams,
}

impl Scene {
    pub fn new(camera: Camera, primitives: Vec<Primitive>, params: RenderParams) -> Self {
        Scene {
            camera,
            primitives,
            params,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Nearest intersection along the ray, linear scan over all primitives.
    ///
    /// The lower cutoff keeps scattered rays from immediately re-hitting the
    /// surface they left; the upper one is the configured render distance.
    /// Ties keep the earlier primitive (strictly smaller t wins).
    pub fn trace(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut nearest: Option<Hit> = None;
        for primitive in &self.primitives {
            if let Some(hit) = primitive.hit(ray, EPSILON, self.params.render_distance) {
                if nearest.as_ref().is_none_or(|n| hit.t < n.t) {
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }
}
