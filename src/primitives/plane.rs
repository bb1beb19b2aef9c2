use crate::error::ValidationError;
use crate::geometry::{EPSILON, FloatType, Ray, UnitVector, WorldPoint, WorldVector};
use crate::materials::Material;

use super::{Axis, Hit, transform::rotation_about};

/// Infinite two-sided plane through `point` with the given normal.
#[derive(Clone, Debug)]
pub struct Plane {
    point: WorldPoint,
    normal: UnitVector,
    /// Precomputed plane constant, `point · normal`.
    d: FloatType,
    material: Material,
}

impl Plane {
    pub fn new(
        point: WorldPoint,
        normal: WorldVector,
        material: Material,
    ) -> Result<Self, ValidationError> {
        let normal = UnitVector::try_new(normal, EPSILON).ok_or(ValidationError::ZeroNormal)?;
        let d = point.coords.dot(&normal.into_inner());
        Ok(Plane {
            point,
            normal,
            d,
            material,
        })
    }

    /// Solves `(o + t·dir) · n = d` for t. A ray nearly parallel to the plane
    /// (|dir·n| ≤ 1e-4) never hits.
    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<Hit<'_>> {
        let n = self.normal.into_inner();
        let dn = ray.direction.dot(&n);
        if dn.abs() <= EPSILON {
            return None;
        }

        let t = (self.d - ray.origin.coords.dot(&n)) / dn;
        if t <= t_min || t > t_max {
            return None;
        }

        // The plane is two-sided, so the normal faces the ray origin.
        let normal = if dn < 0.0 { n } else { -n };
        Some(Hit {
            point: ray.point_at(t),
            normal: UnitVector::new_normalize(normal),
            ray: *ray,
            t,
            material: &self.material,
        })
    }

    pub fn contains_point(&self, point: &WorldPoint) -> bool {
        (point.coords.dot(&self.normal.into_inner()) - self.d).abs() < EPSILON
    }

    pub(crate) fn material(&self) -> &Material {
        &self.material
    }

    pub(crate) fn normal(&self) -> UnitVector {
        self.normal
    }

    pub fn translated(&self, offset: &WorldVector) -> Plane {
        let point = self.point + offset;
        Plane {
            point,
            normal: self.normal,
            d: point.coords.dot(&self.normal.into_inner()),
            material: self.material,
        }
    }

    /// Rotates the normal in place; the anchor point stays put.
    pub fn rotated(&self, axis: Axis, angle: FloatType) -> Plane {
        let normal = UnitVector::new_normalize(rotation_about(axis, angle) * self.normal.into_inner());
        Plane {
            point: self.point,
            normal,
            d: self.point.coords.dot(&normal.into_inner()),
            material: self.material,
        }
    }
}
